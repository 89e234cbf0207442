pub mod calculation_service;
pub mod session_service;
