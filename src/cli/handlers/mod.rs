pub mod bench;
pub mod config;
pub mod info;
pub mod upcase;
