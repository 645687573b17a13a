//! Studies Portal
//!
//! Signup and login pages backed by a JSON credentials file.

pub mod api;
pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;
