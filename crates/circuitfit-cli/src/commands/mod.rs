pub mod auth;
pub mod config;
pub mod routine;
pub mod stats;
pub mod workout;
