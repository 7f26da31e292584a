//! Domain layer for the Livehouse backend.
//!
//! This crate contains:
//! - Domain models (Group, Live, PerformanceRequest, Ticket)
//! - The coordination error taxonomy
//! - Domain events and the notification gateway abstraction

pub mod error;
pub mod models;
pub mod services;

pub use error::{CoordinationError, ErrorKind};
