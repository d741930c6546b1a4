//! Database entity definitions.
//!
//! Entities are direct mappings to database rows. Enum-valued columns are
//! stored as text and parsed on the way out; an unparseable value surfaces
//! as a decode error rather than a silent default.

pub mod attendance;
pub mod classroom;
pub mod education_report;
pub mod expense;
pub mod fee;
pub mod income;
pub mod notification;
pub mod pending_user_role;
pub mod student;
pub mod user_role;

pub(crate) fn decode_enum<T>(
    column: &'static str,
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, sqlx::Error> {
    parse(value)
        .ok_or_else(|| sqlx::Error::Decode(format!("invalid {column} value: {value}").into()))
}
