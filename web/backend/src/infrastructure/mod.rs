pub mod config;
pub mod driving;
