//! Cookie-backed session storage.
//!
//! The whole session travels in the cookie value, so there is no server-side
//! state. The value is encoded, not signed: clients can read and edit it.
//! Keep secrets and anything trusted for authorization out of wizard sessions.

use crate::codec::{decode_session, encode_session};
use crate::options::CookieOptions;
use async_trait::async_trait;
use waypoint_core::{Session, SessionError, SessionStorage};

/// Browsers cap a single cookie at roughly 4KB.
pub const MAX_COOKIE_SIZE: usize = 4096;

#[derive(Debug, Clone)]
pub struct CookieSessionStorage {
    options: CookieOptions,
}

impl CookieSessionStorage {
    pub fn new(options: CookieOptions) -> Self {
        Self { options }
    }

    /// Storage with the wizard cookie defaults for `name`.
    pub fn for_wizard(name: impl Into<String>) -> Self {
        Self::new(CookieOptions::for_wizard(name))
    }

    pub fn options(&self) -> &CookieOptions {
        &self.options
    }
}

#[async_trait]
impl SessionStorage for CookieSessionStorage {
    async fn get_session(&self, cookie_header: Option<&str>) -> Result<Session, SessionError> {
        let Some(raw) = self.options.find_value(cookie_header) else {
            return Ok(Session::new());
        };

        match decode_session(&raw) {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::debug!(cookie = %self.options.name, error = %e, "Discarding unreadable session cookie");
                Ok(Session::new())
            }
        }
    }

    async fn commit_session(&self, session: &Session) -> Result<String, SessionError> {
        let cookie = self.options.build(encode_session(session)?).to_string();
        if cookie.len() > MAX_COOKIE_SIZE {
            return Err(SessionError::CookieTooLarge {
                size: cookie.len(),
                limit: MAX_COOKIE_SIZE,
            });
        }
        Ok(cookie)
    }

    async fn destroy_session(&self, _session: &Session) -> Result<String, SessionError> {
        Ok(self.options.removal().to_string())
    }
}
