//! Request context carrying the (optional) authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sharehub_entity::user::IdentityRef;

/// Context for the current request.
///
/// Uploads and downloads work anonymously, so the identity is optional;
/// management operations check it through the authorization policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated identity, if any.
    pub identity: Option<IdentityRef>,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for an authenticated request.
    pub fn authenticated(
        identity: IdentityRef,
        ip_address: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            identity: Some(identity),
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Creates a context for an anonymous request.
    pub fn anonymous(ip_address: String, user_agent: Option<String>) -> Self {
        Self {
            identity: None,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Returns the identity reference, if authenticated.
    pub fn identity(&self) -> Option<&IdentityRef> {
        self.identity.as_ref()
    }

    /// Returns whether the current identity has administrative rights.
    pub fn is_admin(&self) -> bool {
        self.identity
            .as_ref()
            .is_some_and(|who| who.role.can_administer())
    }
}
