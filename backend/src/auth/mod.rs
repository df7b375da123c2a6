//! Authentication module for sessions and access control.
//!
//! This module provides login, the JWT middleware that identifies the
//! caller, and the admin guard applied to mutating event procedures.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
