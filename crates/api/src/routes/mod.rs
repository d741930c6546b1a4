//! HTTP route handlers.

pub mod attendance;
pub mod classes;
pub mod education_reports;
pub mod expenses;
pub mod fees;
pub mod health;
pub mod income;
pub mod notifications;
pub mod reports;
pub mod roles;
pub mod students;
