pub mod capture;
pub mod detection;
pub mod forwarding;
pub mod overlay;
pub mod shared;
pub mod viewer;
