//! Module for the event procedures.
//!
//! Listing is public; creating and deleting require an admin session.

pub mod handlers;
pub mod routes;
