use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token claims.
///
/// The subject carries the authenticated user id. Expiry is optional:
/// tokens carry no `exp` unless one is set explicitly, and such tokens
/// stay valid until the signing secret changes. Extra fields round-trip
/// through the flattened map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom fields (flattened into the token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims identifying an authenticated subject, stamped with the
    /// current issue time and no expiry.
    pub fn for_subject(subject: impl ToString) -> Self {
        Self {
            sub: Some(subject.to_string()),
            iat: Some(Utc::now().timestamp()),
            ..Self::default()
        }
    }

    /// Set the subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiry to `hours` from now.
    pub fn with_expiry_in_hours(mut self, hours: i64) -> Self {
        self.exp = Some((Utc::now() + Duration::hours(hours)).timestamp());
        self
    }

    /// Set the expiration timestamp directly.
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Add a custom claim.
    pub fn with_claim(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// The subject claim, if present.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }
}
