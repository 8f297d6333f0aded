pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod sync;
