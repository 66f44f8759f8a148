pub mod cli;
pub mod config;
pub mod error;
pub mod patcher;
pub mod scanner;
pub mod sync;
pub mod tags;
