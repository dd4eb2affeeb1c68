pub mod commands;
pub mod config;
pub mod page;
pub mod platform;
