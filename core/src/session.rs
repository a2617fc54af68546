//! Session - Per-request Key/Value State
//!
//! A session is loaded from the incoming cookie, mutated by the wizard step,
//! and committed back into a `Set-Cookie` header. Values are stored as
//! `serde_json::Value` so any serializable type can be saved.

use crate::error::SessionError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key/value data carried by a session.
pub type SessionData = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Storage-assigned identifier. Cookie-only storages leave this empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    data: SessionData,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            data: SessionData::new(),
        }
    }

    pub fn from_data(id: Option<String>, data: SessionData) -> Self {
        Self { id, data }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn into_data(self) -> SessionData {
        self.data
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Read a value and deserialize it into `T`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        self.data
            .get(key)
            .map(|value| {
                serde_json::from_value(value.clone())
                    .map_err(|e| SessionError::Decode(format!("{key}: {e}")))
            })
            .transpose()
    }

    /// Store a value, replacing any previous value for `key`.
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> Result<(), SessionError> {
        let key = key.into();
        let value =
            serde_json::to_value(value).map_err(|e| SessionError::Encode(format!("{key}: {e}")))?;
        self.data.insert(key, value);
        Ok(())
    }

    pub fn unset(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Address {
        street: String,
        zip: u32,
    }

    #[test]
    fn test_set_and_get_as() {
        let mut session = Session::new();
        session.set("name", "Ada").unwrap();
        session
            .set(
                "address",
                Address {
                    street: "Main".to_string(),
                    zip: 12345,
                },
            )
            .unwrap();

        assert_eq!(session.get("name"), Some(&Value::from("Ada")));
        let address: Address = session.get_as("address").unwrap().unwrap();
        assert_eq!(address.zip, 12345);
        assert_eq!(session.get_as::<String>("missing").unwrap(), None);
    }

    #[test]
    fn test_get_as_type_mismatch_is_decode_error() {
        let mut session = Session::new();
        session.set("age", "not a number").unwrap();
        assert!(matches!(
            session.get_as::<u32>("age"),
            Err(SessionError::Decode(_))
        ));
    }

    #[test]
    fn test_unset_and_clear() {
        let mut session = Session::with_id("sid-1");
        session.set("a", 1).unwrap();
        session.set("b", 2).unwrap();

        assert_eq!(session.unset("a"), Some(Value::from(1)));
        assert!(!session.has("a"));
        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.id(), Some("sid-1"));
    }
}
