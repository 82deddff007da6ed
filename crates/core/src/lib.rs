pub mod audit;
pub mod config;
pub mod emotion;
pub mod suggestion;
pub mod types;
