use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::routes::{
    attendance, classes, education_reports, expenses, fees, health, income, notifications,
    reports, roles, students,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        // Students
        .route("/api/v1/students", get(students::list_students))
        .route("/api/v1/students", post(students::create_student))
        .route("/api/v1/students/:id", get(students::get_student))
        .route("/api/v1/students/:id", put(students::update_student))
        .route("/api/v1/students/:id", delete(students::delete_student))
        // Classes
        .route("/api/v1/classes", get(classes::list_classes))
        .route("/api/v1/classes", post(classes::create_class))
        .route("/api/v1/classes/:id", put(classes::update_class))
        .route("/api/v1/classes/:id", delete(classes::delete_class))
        // Attendance
        .route("/api/v1/attendance", post(attendance::mark_attendance))
        .route(
            "/api/v1/attendance/bulk",
            post(attendance::mark_attendance_bulk),
        )
        .route("/api/v1/attendance/status", get(attendance::attendance_status))
        .route("/api/v1/attendance", delete(attendance::clear_attendance))
        .route(
            "/api/v1/attendance/available",
            get(attendance::available_students),
        )
        .route("/api/v1/attendance/register", get(attendance::month_register))
        // Education reports
        .route(
            "/api/v1/education-reports",
            get(education_reports::list_reports),
        )
        .route(
            "/api/v1/education-reports",
            post(education_reports::create_report),
        )
        .route(
            "/api/v1/education-reports/:id",
            put(education_reports::update_report),
        )
        .route(
            "/api/v1/education-reports/:id",
            delete(education_reports::delete_report),
        )
        // Income
        .route("/api/v1/income", get(income::list_income))
        .route("/api/v1/income", post(income::create_income))
        .route("/api/v1/income/:id", put(income::update_income))
        .route("/api/v1/income/:id", delete(income::delete_income))
        // Expenses
        .route("/api/v1/expenses", get(expenses::list_expenses))
        .route("/api/v1/expenses", post(expenses::create_expense))
        .route("/api/v1/expenses/:id", put(expenses::update_expense))
        .route("/api/v1/expenses/:id", delete(expenses::delete_expense))
        // Fees
        .route("/api/v1/fees", get(fees::list_fees))
        .route("/api/v1/fees", post(fees::create_fee))
        .route("/api/v1/fees/:id", put(fees::update_fee))
        .route("/api/v1/fees/:id", delete(fees::delete_fee))
        // Roles and invitations
        .route("/api/v1/roles", get(roles::list_roles))
        .route("/api/v1/roles/assign", post(roles::assign_role))
        .route("/api/v1/roles/:id", delete(roles::revoke_role))
        .route("/api/v1/roles/join-requests", post(roles::submit_join_request))
        .route("/api/v1/roles/pending", get(roles::list_pending))
        .route("/api/v1/roles/invitations", get(roles::my_invitations))
        .route(
            "/api/v1/roles/pending/:id/accept",
            post(roles::accept_invitation),
        )
        .route(
            "/api/v1/roles/pending/:id/reject",
            post(roles::reject_invitation),
        )
        // Notifications
        .route(
            "/api/v1/notifications",
            get(notifications::list_notifications),
        )
        .route(
            "/api/v1/notifications/:id/read",
            post(notifications::mark_read),
        )
        .route(
            "/api/v1/notifications/read-all",
            post(notifications::mark_all_read),
        )
        // Reports and exports
        .route(
            "/api/v1/reports/financial-summary",
            get(reports::financial_summary),
        )
        .route("/api/v1/reports/export/income", post(reports::export_income))
        .route(
            "/api/v1/reports/export/expenses",
            post(reports::export_expenses),
        )
        .route(
            "/api/v1/reports/export/attendance-register",
            post(reports::export_attendance_register),
        )
        .route(
            "/api/v1/reports/export/education-register",
            post(reports::export_education_register),
        );

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live));

    Router::new()
        .merge(api_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
