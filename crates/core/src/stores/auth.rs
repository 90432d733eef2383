//! Auth session and the short-lived session cookie.
//!
//! The session (profile + bearer token) lasts until explicit logout. The
//! cookie that gates dashboard routes is issued alongside it but expires on
//! its own after an hour.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Name of the session cookie checked by the route gate and the façade.
pub const SESSION_COOKIE_NAME: &str = "auth_token";

/// Session cookie lifetime in seconds (1 hour).
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 60 * 60;

/// Logged-in user and bearer token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl AuthState {
    /// Store the session and issue the cookie that goes with it.
    pub fn set_auth(&mut self, user: User, token: String, now: DateTime<Utc>) -> SessionCookie {
        let cookie = SessionCookie::issue(token.clone(), now);
        self.user = Some(user);
        self.token = Some(token);
        self.is_authenticated = true;
        cookie
    }

    /// Forget the session. The caller must also drop the cookie.
    pub fn logout(&mut self) {
        *self = Self::default();
    }
}

/// Client-held copy of the `auth_token` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionCookie {
    /// A cookie for `token` valid for [`SESSION_COOKIE_MAX_AGE_SECS`].
    #[must_use]
    pub fn issue(token: String, now: DateTime<Utc>) -> Self {
        Self {
            value: token,
            expires_at: now + Duration::seconds(SESSION_COOKIE_MAX_AGE_SECS),
        }
    }

    /// Whether the cookie is still sent at `now`.
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at && !self.value.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn user() -> User {
        User {
            id: UserId::new(1),
            username: "emilys".to_string(),
            email: "emily.johnson@x.dummyjson.com".to_string(),
            first_name: "Emily".to_string(),
            last_name: "Johnson".to_string(),
            gender: "female".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn test_set_auth_issues_hour_long_cookie() {
        let now = Utc::now();
        let mut auth = AuthState::default();
        let cookie = auth.set_auth(user(), "tok".to_string(), now);

        assert!(auth.is_authenticated);
        assert_eq!(auth.token.as_deref(), Some("tok"));
        assert_eq!(cookie.value, "tok");
        assert!(cookie.is_live(now + Duration::minutes(59)));
        assert!(!cookie.is_live(now + Duration::minutes(60)));
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut auth = AuthState::default();
        auth.set_auth(user(), "tok".to_string(), Utc::now());
        auth.logout();
        assert_eq!(auth, AuthState::default());
    }

    #[test]
    fn test_persisted_shape() {
        let mut auth = AuthState::default();
        auth.set_auth(user(), "tok".to_string(), Utc::now());
        let value = serde_json::to_value(&auth).unwrap();
        assert_eq!(value["isAuthenticated"], true);
        assert_eq!(value["user"]["firstName"], "Emily");
    }
}
