pub mod app_state;
pub mod session_registry;
