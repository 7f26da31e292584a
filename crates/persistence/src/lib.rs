//! Persistence layer for the Livehouse backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations holding every transactional operation

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
