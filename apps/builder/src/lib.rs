pub mod builder;
pub mod config;
pub mod editors;
pub mod errors;
pub mod export;
pub mod format;
pub mod layout;
pub mod models;
pub mod persistence;
pub mod render;
pub mod routes;
pub mod state;
