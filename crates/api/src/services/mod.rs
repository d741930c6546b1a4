//! API-level services.

pub mod report_export;
