//! Admin sessions and credential verification.
//!
//! The session is an opaque, stateless cookie payload: a base64-encoded JSON
//! blob carrying a random id and its expiry. Nothing is persisted server-side,
//! so a restart does not log the admin out and logout is purely cookie
//! clearing.
//!
//! Credential checking is exact string equality against the configured
//! username/password; no hashing and no timing-safe compare. DESIGN.md
//! tracks this as a known weakness.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use folio_core::config::Config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub username: String,
    /// RFC 3339 expiry instant.
    pub expires_at: String,
}

/// Mint a fresh session for the configured admin, expiring
/// `config.session_hours` from now.
pub fn issue_session(config: &Config) -> Session {
    let expires_at = Utc::now() + Duration::hours(i64::from(config.session_hours));
    Session {
        session_id: uuid::Uuid::new_v4().to_string(),
        username: config.admin_username.clone(),
        expires_at: expires_at.to_rfc3339(),
    }
}

/// Serialize a session into its cookie-safe form.
pub fn encode_session(session: &Session) -> anyhow::Result<String> {
    let json = serde_json::to_string(session)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Parse and validate a cookie value. Returns `None` for anything that is
/// not a live session: bad base64, bad JSON, bad expiry format, or expired.
pub fn decode_session(raw: &str) -> Option<Session> {
    let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
    let session: Session = serde_json::from_slice(&bytes).ok()?;
    let expires_at = DateTime::parse_from_rfc3339(&session.expires_at).ok()?;
    if expires_at < Utc::now() {
        return None;
    }
    Some(session)
}

/// Verify a base64 `username:password` token against the configured admin
/// credentials. Empty, malformed, or mismatching tokens all verify false.
pub fn verify_token(token: &str, config: &Config) -> bool {
    let Ok(bytes) = STANDARD.decode(token) else {
        return false;
    };
    let Ok(text) = String::from_utf8(bytes) else {
        return false;
    };
    let Some((username, password)) = text.split_once(':') else {
        return false;
    };
    username == config.admin_username && password == config.admin_password
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: 0,
            db_path: ":memory:".to_string(),
            admin_username: "testadmin".to_string(),
            admin_password: "testpassword123".to_string(),
            session_hours: 24,
            geoip_path: "/nonexistent".to_string(),
            duckdb_memory_limit: "512MB".to_string(),
            https: false,
            cors_origins: vec![],
        }
    }

    fn token(username: &str, password: &str) -> String {
        STANDARD.encode(format!("{username}:{password}"))
    }

    #[test]
    fn verifies_valid_credentials() {
        assert!(verify_token(&token("testadmin", "testpassword123"), &test_config()));
    }

    #[test]
    fn rejects_credential_mismatches() {
        let config = test_config();
        assert!(!verify_token(&token("testadmin", "wrongpassword"), &config));
        assert!(!verify_token(&token("wronguser", "testpassword123"), &config));
        assert!(!verify_token(&token("wronguser", "wrongpassword"), &config));
        assert!(!verify_token(&token("", "testpassword123"), &config));
        assert!(!verify_token(&token("testadmin", ""), &config));
    }

    #[test]
    fn rejects_empty_and_malformed_tokens() {
        let config = test_config();
        assert!(!verify_token("", &config));
        assert!(!verify_token("not-valid-base64!!!", &config));
        assert!(!verify_token(&STANDARD.encode("no-separator"), &config));
    }

    #[test]
    fn handles_special_characters_in_credentials() {
        let mut config = test_config();
        config.admin_username = "admin@test.com".to_string();
        config.admin_password = "pass@word123!".to_string();
        assert!(verify_token(&token("admin@test.com", "pass@word123!"), &config));
    }

    #[test]
    fn session_round_trips_through_cookie_encoding() {
        let session = issue_session(&test_config());
        let encoded = encode_session(&session).unwrap();
        let decoded = decode_session(&encoded).unwrap();
        assert_eq!(decoded.session_id, session.session_id);
        assert_eq!(decoded.username, "testadmin");
    }

    #[test]
    fn expired_sessions_do_not_decode() {
        let session = Session {
            session_id: "s".to_string(),
            username: "testadmin".to_string(),
            expires_at: (Utc::now() - Duration::hours(1)).to_rfc3339(),
        };
        let encoded = encode_session(&session).unwrap();
        assert!(decode_session(&encoded).is_none());
    }

    #[test]
    fn garbage_cookie_values_do_not_decode() {
        assert!(decode_session("").is_none());
        assert!(decode_session("@@@@").is_none());
        assert!(decode_session(&URL_SAFE_NO_PAD.encode("{\"not\":\"a session\"}")).is_none());
    }
}
