use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use waypoint_core::{Session, SessionError};

/// Session -> JSON -> URL-safe base64. The result needs no cookie escaping.
pub(crate) fn encode_session(session: &Session) -> Result<String, SessionError> {
    let json = serde_json::to_vec(session).map_err(|e| SessionError::Encode(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

pub(crate) fn decode_session(raw: &str) -> Result<Session, SessionError> {
    let json = URL_SAFE_NO_PAD
        .decode(raw)
        .map_err(|e| SessionError::Decode(e.to_string()))?;
    serde_json::from_slice(&json).map_err(|e| SessionError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_value_is_cookie_safe() {
        let mut session = Session::new();
        session.set("note", "a; b=c, \"quoted\" ünïcode").unwrap();
        let encoded = encode_session(&session).unwrap();
        assert!(
            encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(decode_session(&encoded).unwrap(), session);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_session("!!not base64!!"),
            Err(SessionError::Decode(_))
        ));
        let not_json = URL_SAFE_NO_PAD.encode(b"plain text");
        assert!(matches!(
            decode_session(&not_json),
            Err(SessionError::Decode(_))
        ));
    }
}
