pub mod domain;
pub mod file_use_cases;
pub mod ports;
pub mod services;
