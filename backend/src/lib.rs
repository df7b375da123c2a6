//! Events backend library.
//!
//! Exposes the event procedures server (`api`), its supporting layers, and the
//! headless admin page (`admin`) used by the `events-admin` front-end.

pub mod admin;
pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;
