pub mod config;
pub mod tier;
