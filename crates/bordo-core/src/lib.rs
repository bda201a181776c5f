pub mod backend;
pub mod config;
pub mod mapper;
pub mod platform;
pub mod scheduler;
pub mod state;
