pub mod frame_result_projector;
pub mod overlay_rect;
pub mod overlay_renderer;
