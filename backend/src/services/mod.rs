//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business operations
//! and orchestrate interactions between repositories and external systems,
//! such as validating events or uploading images.

pub mod event_service;
pub mod image_upload;
pub mod user_service;
