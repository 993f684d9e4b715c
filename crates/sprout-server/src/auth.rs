// SPDX-License-Identifier: Apache-2.0

use axum::http::HeaderMap;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SESSION_COOKIE: &str = "admin_token";

/// Mints opaque session tokens: HMAC-SHA256 over a nanosecond
/// timestamp and a process counter, keyed by the server secret. The
/// secret never leaves the server and the token reveals nothing about
/// it.
pub struct TokenMinter {
    secret: String,
    counter: AtomicU64,
}

impl TokenMinter {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
            counter: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub fn mint(&self) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let material = format!("{nanos}:{seq}");
        // Hmac accepts keys of any length, so this cannot fail, but the
        // fallback keeps the token opaque either way.
        match Hmac::<Sha256>::new_from_slice(self.secret.as_bytes()) {
            Ok(mut mac) => {
                mac.update(material.as_bytes());
                URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
            }
            Err(_) => URL_SAFE_NO_PAD.encode(Sha256::digest(material.as_bytes())),
        }
    }
}

/// Digest-equality password check; no early-exit byte compare on the
/// secret itself.
#[must_use]
pub fn password_matches(expected: &str, supplied: &str) -> bool {
    Sha256::digest(expected.as_bytes()) == Sha256::digest(supplied.as_bytes())
}

/// Pulls the admin token out of the `cookie` header, if present.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get("cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

#[must_use]
pub fn session_cookie(token: &str, ttl_secs: u64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_secs}")
}

#[must_use]
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn tokens_are_unique_and_url_safe() {
        let minter = TokenMinter::new("secret");
        let a = minter.mint();
        let b = minter.mint();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn cookie_parsing_handles_multiple_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_static("theme=dark; admin_token=abc123; lang=ko"),
        );
        assert_eq!(session_token(&headers), Some("abc123".to_string()));

        headers.insert("cookie", HeaderValue::from_static("theme=dark"));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn password_check_accepts_exact_match_only() {
        assert!(password_matches("secret!", "secret!"));
        assert!(!password_matches("secret!", "secret"));
        assert!(!password_matches("secret!", ""));
    }
}
