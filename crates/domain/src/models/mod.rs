//! Domain model definitions.

pub mod attendance;
pub mod classroom;
pub mod context;
pub mod education;
pub mod finance;
pub mod notification;
pub mod report;
pub mod role;
pub mod student;
