//! Repository implementations for database operations.

pub mod attendance;
pub mod classroom;
pub mod education_report;
pub mod expense;
pub mod fee;
pub mod income;
pub mod notification;
pub mod pending_user_role;
pub mod profile;
pub mod student;
pub mod user_role;

pub use attendance::AttendanceRepository;
pub use classroom::ClassRepository;
pub use education_report::EducationReportRepository;
pub use expense::ExpenseRepository;
pub use fee::FeeRepository;
pub use income::IncomeRepository;
pub use notification::NotificationRepository;
pub use pending_user_role::PendingUserRoleRepository;
pub use profile::ProfileRepository;
pub use student::StudentRepository;
pub use user_role::UserRoleRepository;
