pub mod replay_camera;
