//! Shared utilities and common types for the madrasa admin backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Common validation logic for request DTOs
//! - Offset pagination helpers

pub mod pagination;
pub mod validation;
