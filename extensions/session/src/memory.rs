use crate::options::CookieOptions;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use waypoint_core::{Session, SessionData, SessionError, SessionStorage};

struct Entry {
    data: SessionData,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Lifetime of a stored session when the cookie options set no `Max-Age`.
pub const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

/// Process-local session storage. The cookie carries only a session id.
///
/// Sessions vanish on restart and are not shared between processes; use it
/// for tests, demos and single-instance deployments. Every session expires:
/// after the cookie's `Max-Age`, or [`DEFAULT_TTL_SECS`] without one. Expired
/// entries are pruned on each commit.
pub struct MemorySessionStorage {
    options: CookieOptions,
    sessions: Mutex<HashMap<String, Entry>>,
}

impl MemorySessionStorage {
    pub fn new(options: CookieOptions) -> Self {
        Self {
            options,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn for_wizard(name: impl Into<String>) -> Self {
        Self::new(CookieOptions::for_wizard(name))
    }

    /// Number of stored sessions, expired ones included until the next commit.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let ttl = self.options.max_age.unwrap_or(DEFAULT_TTL_SECS);
        TimeDelta::try_seconds(ttl).and_then(|ttl| now.checked_add_signed(ttl))
    }
}

impl std::fmt::Debug for MemorySessionStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySessionStorage")
            .field("cookie", &self.options.name)
            .field("session_count", &self.len())
            .finish()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn get_session(&self, cookie_header: Option<&str>) -> Result<Session, SessionError> {
        let Some(id) = self.options.find_value(cookie_header) else {
            return Ok(Session::with_id(uuid::Uuid::new_v4().to_string()));
        };

        let now = Utc::now();
        let mut sessions = self.sessions.lock();
        match sessions.get(&id) {
            Some(entry) if !entry.is_expired(now) => {
                Ok(Session::from_data(Some(id), entry.data.clone()))
            }
            Some(_) => {
                sessions.remove(&id);
                tracing::debug!(session_id = %id, "Session expired");
                Ok(Session::with_id(uuid::Uuid::new_v4().to_string()))
            }
            None => {
                tracing::debug!(session_id = %id, "Unknown session id, starting fresh");
                Ok(Session::with_id(uuid::Uuid::new_v4().to_string()))
            }
        }
    }

    async fn commit_session(&self, session: &Session) -> Result<String, SessionError> {
        let id = session
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let now = Utc::now();
        let entry = Entry {
            data: session.data().clone(),
            expires_at: self.expiry_from(now),
        };

        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now));
        if sessions.len() < before {
            tracing::debug!(pruned = before - sessions.len(), "Expired sessions pruned");
        }
        sessions.insert(id.clone(), entry);
        drop(sessions);

        Ok(self.options.build(id).to_string())
    }

    async fn destroy_session(&self, session: &Session) -> Result<String, SessionError> {
        if let Some(id) = session.id() {
            self.sessions.lock().remove(id);
        }
        Ok(self.options.removal().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Mode;

    fn request_cookie(set_cookie: &str) -> String {
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_cookie_holds_only_the_id() {
        let storage = MemorySessionStorage::new(CookieOptions::for_mode("intake", Mode::Dev));
        let mut session = storage.get_session(None).await.unwrap();
        let id = session.id().unwrap().to_string();
        session.set("diagnosis", "confidential").unwrap();

        let set_cookie = storage.commit_session(&session).await.unwrap();
        assert_eq!(request_cookie(&set_cookie), format!("intake={id}"));
        assert!(!set_cookie.contains("confidential"));
        assert_eq!(storage.len(), 1);

        let loaded = storage
            .get_session(Some(&request_cookie(&set_cookie)))
            .await
            .unwrap();
        assert_eq!(loaded.id(), Some(id.as_str()));
        assert!(loaded.has("diagnosis"));
    }

    #[tokio::test]
    async fn test_unknown_id_starts_fresh() {
        let storage = MemorySessionStorage::new(CookieOptions::for_mode("intake", Mode::Dev));
        let session = storage.get_session(Some("intake=missing")).await.unwrap();
        assert!(session.is_empty());
        assert_ne!(session.id(), Some("missing"));
    }

    #[tokio::test]
    async fn test_expired_sessions_are_dropped() {
        let options = CookieOptions::for_mode("intake", Mode::Dev).with_max_age(0);
        let storage = MemorySessionStorage::new(options);

        let mut session = storage.get_session(None).await.unwrap();
        session.set("step", 2).unwrap();
        let set_cookie = storage.commit_session(&session).await.unwrap();

        let loaded = storage
            .get_session(Some(&request_cookie(&set_cookie)))
            .await
            .unwrap();
        assert!(loaded.is_empty());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_commit_prunes_expired_sessions() {
        let options = CookieOptions::for_mode("intake", Mode::Dev).with_max_age(0);
        let storage = MemorySessionStorage::new(options);

        for _ in 0..500 {
            let session = storage.get_session(None).await.unwrap();
            storage.commit_session(&session).await.unwrap();
        }
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_sessions_expire_without_max_age() {
        let storage = MemorySessionStorage::new(CookieOptions::for_mode("intake", Mode::Dev));
        let session = storage.get_session(None).await.unwrap();
        storage.commit_session(&session).await.unwrap();

        let sessions = storage.sessions.lock();
        let expires_at = sessions.values().next().unwrap().expires_at.unwrap();
        let ttl = expires_at - Utc::now();
        assert!(ttl <= TimeDelta::seconds(DEFAULT_TTL_SECS));
        assert!(ttl > TimeDelta::seconds(DEFAULT_TTL_SECS - 60));
    }

    #[tokio::test]
    async fn test_destroy_removes_entry() {
        let storage = MemorySessionStorage::new(CookieOptions::for_mode("intake", Mode::Dev));
        let session = storage.get_session(None).await.unwrap();
        storage.commit_session(&session).await.unwrap();
        assert_eq!(storage.len(), 1);

        let cleared = storage.destroy_session(&session).await.unwrap();
        assert!(storage.is_empty());
        assert!(cleared.contains("Max-Age=0"));
    }
}
