//! Domain layer for the madrasa admin backend.
//!
//! This crate contains:
//! - Domain models (students, classes, attendance, roles, finance, reports)
//! - The attendance state engine and role/invitation state machine
//! - Document rendering service traits

pub mod models;
pub mod services;
