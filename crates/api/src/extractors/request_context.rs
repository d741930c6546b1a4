//! Request context extractor.
//!
//! Authentication is handled by the deployment's gateway; this service
//! trusts the identity headers it forwards and materializes them as an
//! explicit context threaded into every workflow operation.

use std::ops::Deref;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use domain::models::context::{Locale, RequestContext};

use crate::app::AppState;
use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const MADRASA_ID_HEADER: &str = "x-madrasa-id";
pub const LOCALE_HEADER: &str = "x-locale";

/// Authenticated caller identity from gateway headers. Derefs to the domain
/// [`RequestContext`], so handlers read `auth.user_id` directly.
#[derive(Debug, Clone)]
pub struct AuthContext(pub RequestContext);

impl Deref for AuthContext {
    type Target = RequestContext;

    fn deref(&self) -> &RequestContext {
        &self.0
    }
}

fn header_uuid(parts: &Parts, name: &'static str) -> Result<Uuid, ApiError> {
    let value = parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized(format!("Missing {} header", name)))?;

    Uuid::parse_str(value)
        .map_err(|_| ApiError::Unauthorized(format!("Invalid {} header", name)))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = header_uuid(parts, USER_ID_HEADER)?;
        let madrasa_id = header_uuid(parts, MADRASA_ID_HEADER)?;

        let locale = parts
            .headers
            .get(LOCALE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(Locale::from_tag)
            .unwrap_or_default();

        Ok(AuthContext(
            RequestContext::new(user_id, madrasa_id).with_locale(locale),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder();
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn header_uuid_parses_valid_value() {
        let id = Uuid::new_v4();
        let parts = parts(&[(USER_ID_HEADER, &id.to_string())]);
        assert_eq!(header_uuid(&parts, USER_ID_HEADER).unwrap(), id);
    }

    #[test]
    fn missing_or_malformed_header_is_unauthorized() {
        let empty = parts(&[]);
        assert!(matches!(
            header_uuid(&empty, USER_ID_HEADER),
            Err(ApiError::Unauthorized(_))
        ));

        let bad = parts(&[(USER_ID_HEADER, "not-a-uuid")]);
        assert!(matches!(
            header_uuid(&bad, USER_ID_HEADER),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn deref_exposes_context_fields() {
        let user_id = Uuid::new_v4();
        let madrasa_id = Uuid::new_v4();
        let auth = AuthContext(RequestContext::new(user_id, madrasa_id).with_locale(Locale::En));

        assert_eq!(auth.user_id, user_id);
        assert_eq!(auth.madrasa_id, madrasa_id);
        assert_eq!(auth.locale, Locale::En);
    }
}
