//! Shared utilities and common types for the Clinic Scheduler backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Page-based pagination parameters
//! - Common validation logic
//! - Password hashing with Argon2id
//! - JWT token utilities

pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
