pub mod benchmark;
pub mod bots;
pub mod config;
pub mod runner;
pub mod store;
pub mod util;
