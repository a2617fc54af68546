use crate::error::SessionError;
use crate::session::Session;
use async_trait::async_trait;
use std::sync::Arc;

/// Session Storage: The Persistence Seam
///
/// A `SessionStorage` turns a `Cookie` request header into a [`Session`] and a
/// session back into a `Set-Cookie` header value. Where the data actually
/// lives (in the cookie itself, in memory, in a database) is up to the
/// implementation.
#[async_trait]
pub trait SessionStorage: Send + Sync + 'static {
    /// Load the session named by the request's `Cookie` header.
    ///
    /// A missing or unknown cookie yields a fresh, empty session.
    async fn get_session(&self, cookie_header: Option<&str>) -> Result<Session, SessionError>;

    /// Persist the session and return the `Set-Cookie` header value.
    async fn commit_session(&self, session: &Session) -> Result<String, SessionError>;

    /// Drop the session and return a `Set-Cookie` header value that clears the cookie.
    async fn destroy_session(&self, session: &Session) -> Result<String, SessionError>;
}

#[async_trait]
impl<S: SessionStorage + ?Sized> SessionStorage for Arc<S> {
    async fn get_session(&self, cookie_header: Option<&str>) -> Result<Session, SessionError> {
        (**self).get_session(cookie_header).await
    }

    async fn commit_session(&self, session: &Session) -> Result<String, SessionError> {
        (**self).commit_session(session).await
    }

    async fn destroy_session(&self, session: &Session) -> Result<String, SessionError> {
        (**self).destroy_session(session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keeps everything in the cookie as raw JSON; enough to exercise the trait.
    struct JsonCookie;

    #[async_trait]
    impl SessionStorage for JsonCookie {
        async fn get_session(&self, cookie_header: Option<&str>) -> Result<Session, SessionError> {
            match cookie_header.and_then(|h| h.strip_prefix("s=")) {
                Some(raw) => serde_json::from_str(raw).map_err(|e| SessionError::Decode(e.to_string())),
                None => Ok(Session::new()),
            }
        }

        async fn commit_session(&self, session: &Session) -> Result<String, SessionError> {
            let raw = serde_json::to_string(session).map_err(|e| SessionError::Encode(e.to_string()))?;
            Ok(format!("s={raw}"))
        }

        async fn destroy_session(&self, _session: &Session) -> Result<String, SessionError> {
            Ok("s=; Max-Age=0".to_string())
        }
    }

    #[tokio::test]
    async fn test_arc_storage_delegates() {
        let storage: Arc<dyn SessionStorage> = Arc::new(JsonCookie);

        let mut session = storage.get_session(None).await.unwrap();
        assert!(session.is_empty());
        session.set("step", 1).unwrap();

        let cookie = storage.commit_session(&session).await.unwrap();
        let reloaded = storage.get_session(Some(&cookie)).await.unwrap();
        assert_eq!(reloaded, session);

        let cleared = storage.destroy_session(&reloaded).await.unwrap();
        assert!(cleared.contains("Max-Age=0"));
    }
}
