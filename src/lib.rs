pub mod api;
pub mod assets;
pub mod auth;
pub mod cli;
pub mod core;
