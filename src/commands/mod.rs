// Command handlers module
pub mod check;
pub mod config;
