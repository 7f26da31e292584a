//! Shared utilities and common types for the Livehouse backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Offset pagination types
//! - Common validation logic

pub mod pagination;
pub mod validation;
