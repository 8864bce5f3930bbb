//! Session-scoped transient notifications.
//!
//! A browser session is identified by an `HttpOnly` cookie holding a random
//! UUID. Notices pushed during one request are consumed (and removed) the
//! next time a page renders for that session. Nothing else is ever attached
//! to the session; in particular a successful login leaves no artifact here.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderValue};
use dashmap::DashMap;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "portal_session";

/// Notice severity, named after the CSS classes the views use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
        }
    }
}

/// A single transient notification.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Danger,
            message: message.into(),
        }
    }
}

/// In-process store of pending notices, keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct FlashStore {
    sessions: Arc<DashMap<Uuid, Vec<Notice>>>,
}

impl FlashStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notice for the session's next rendered page.
    pub fn push(&self, session: Uuid, notice: Notice) {
        self.sessions.entry(session).or_default().push(notice);
    }

    /// Drain every pending notice for the session.
    pub fn take(&self, session: Uuid) -> Vec<Notice> {
        self.sessions
            .remove(&session)
            .map(|(_, notices)| notices)
            .unwrap_or_default()
    }
}

/// The requesting browser's session, extracted from the cookie header.
///
/// A request without a (parseable) session cookie gets a fresh id; the
/// response helpers then emit the matching `Set-Cookie`.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub id: Uuid,
    fresh: bool,
}

impl Session {
    /// The `Set-Cookie` value to attach, if the session was just created.
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.fresh {
            return None;
        }
        HeaderValue::from_str(&format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, self.id)).ok()
    }

    fn from_cookie_header(parts: &Parts) -> Option<Uuid> {
        for value in parts.headers.get_all(header::COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            for pair in raw.split(';') {
                if let Some((name, id)) = pair.trim().split_once('=') {
                    if name == SESSION_COOKIE {
                        if let Ok(id) = id.trim().parse() {
                            return Some(id);
                        }
                    }
                }
            }
        }
        None
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match Self::from_cookie_header(parts) {
            Some(id) => Ok(Session { id, fresh: false }),
            None => Ok(Session {
                id: Uuid::new_v4(),
                fresh: true,
            }),
        }
    }
}
