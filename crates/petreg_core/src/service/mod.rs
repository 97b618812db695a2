//! Registry use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and repository calls per submission.
//! - Keep front ends (CLI, UI bindings) free of storage details.

pub mod listing_service;
pub mod registration_service;
