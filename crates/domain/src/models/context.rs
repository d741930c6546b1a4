//! Per-request context threaded through every workflow operation.
//!
//! The original UI kept current user, tenant and language in ambient
//! providers; here the triple is an explicit value so every operation can be
//! exercised without a request pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display locale for user-facing strings in exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Urdu (right-to-left), the application default.
    #[default]
    Ur,
    En,
}

impl Locale {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "en" => Locale::En,
            _ => Locale::Ur,
        }
    }
}

/// The acting identity and tenant for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Authenticated user id, as established by the fronting auth gateway.
    pub user_id: Uuid,
    /// Tenant (madrasa) every touched record must belong to.
    pub madrasa_id: Uuid,
    pub locale: Locale,
}

impl RequestContext {
    pub fn new(user_id: Uuid, madrasa_id: Uuid) -> Self {
        Self {
            user_id,
            madrasa_id,
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_from_tag() {
        assert_eq!(Locale::from_tag("en"), Locale::En);
        assert_eq!(Locale::from_tag("EN"), Locale::En);
        assert_eq!(Locale::from_tag("ur"), Locale::Ur);
        assert_eq!(Locale::from_tag("fr"), Locale::Ur);
    }

    #[test]
    fn default_locale_is_urdu() {
        let ctx = RequestContext::new(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(ctx.locale, Locale::Ur);
    }
}
