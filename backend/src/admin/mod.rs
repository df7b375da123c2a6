//! Headless admin events page.
//!
//! `page` holds the view state, `form` the pending event, `controller` runs
//! submit/delete against the procedures through `client`.

pub mod client;
pub mod controller;
pub mod form;
pub mod page;
