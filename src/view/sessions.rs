// src/view/sessions.rs
use crate::errors::ServerError;
use crate::view::controller::ViewController;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Mutex;

pub const SESSION_COOKIE: &str = "listing_view";
pub const TOKEN_BYTES: usize = 32;

/// Generate a URL-safe session token from random bytes (base64, no padding).
pub fn generate_token<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buf)
}

struct Session {
    view: ViewController,
    last_seen: DateTime<Utc>,
}

/// Result of running a closure against a visitor's view.
pub struct SessionAccess<T> {
    pub token: String,
    /// A new session was created, so the response must set the cookie.
    pub created: bool,
    pub value: T,
}

/// One `ViewController` per visitor, keyed by the session cookie.
/// Holds at most `max_sessions` views.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Run `f` against the view for `token`, creating one with `make` when the
    /// token is missing or unknown. Idle sessions are pruned first.
    pub fn with_view<T, M, F>(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
        make: M,
        f: F,
    ) -> Result<SessionAccess<T>, ServerError>
    where
        M: FnOnce() -> ViewController,
        F: FnOnce(&mut ViewController) -> Result<T, ServerError>,
    {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| ServerError::Internal("session store poisoned".into()))?;

        let cutoff = now - self.idle_timeout;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_seen >= cutoff);
        if sessions.len() < before {
            tracing::debug!(pruned = before - sessions.len(), "idle sessions pruned");
        }

        let (token, created) = match token.filter(|t| sessions.contains_key(*t)) {
            Some(t) => (t.to_string(), false),
            None => {
                while sessions.len() >= self.max_sessions {
                    let Some(oldest) = sessions
                        .iter()
                        .min_by_key(|(_, s)| s.last_seen)
                        .map(|(k, _)| k.clone())
                    else {
                        break;
                    };
                    sessions.remove(&oldest);
                    tracing::debug!(limit = self.max_sessions, "session evicted");
                }

                let t = generate_token(&mut OsRng, TOKEN_BYTES);
                sessions.insert(
                    t.clone(),
                    Session {
                        view: make(),
                        last_seen: now,
                    },
                );
                tracing::debug!(active = sessions.len(), "session created");
                (t, true)
            }
        };

        let session = sessions
            .get_mut(&token)
            .ok_or_else(|| ServerError::Internal("session vanished".into()))?;
        session.last_seen = now;
        let value = f(&mut session.view)?;

        Ok(SessionAccess {
            token,
            created,
            value,
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

/// Pull the session token out of a `Cookie` header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|v| !v.is_empty())
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}
