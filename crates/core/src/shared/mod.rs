pub mod config;
pub mod constants;
pub mod session_logger;
