//! Persistence layer for the Clinic Scheduler backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations of the domain store ports

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
