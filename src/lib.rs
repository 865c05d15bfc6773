pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod matcher;
pub mod pipeline;
