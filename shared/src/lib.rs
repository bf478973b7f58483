pub mod constants;
pub mod email_capture;
pub mod session;
pub mod shared_wheel_game;
pub mod validation;
