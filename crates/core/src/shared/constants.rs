pub const DEFAULT_SERVER_BASE_URL: &str = "http://127.0.0.1:5000";
pub const PROCESS_FACES_PATH: &str = "process_faces";

/// Minimum gap between two detector passes, in milliseconds.
pub const MIN_DETECTION_INTERVAL_MS: u64 = 300;

pub const START_DETECTION_LABEL: &str = "Start Face Detection";
pub const STOP_DETECTION_LABEL: &str = "Stop Detection";
pub const NO_ACCESS_MESSAGE: &str = "No access to Camera";

pub const FACE_BOX_BORDER_WIDTH: f32 = 2.0;
pub const FACE_BOX_CORNER_RADIUS: f32 = 5.0;

pub const CONFIG_DIR_NAME: &str = "FaceWatch";
pub const CONFIG_FILE_NAME: &str = "config.json";
