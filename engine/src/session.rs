//! Session controller
//!
//! The controller is handed its logout handler when it is built. There is
//! no global callback slot: whoever owns the controller decides what
//! happens on logout (clear stored credentials, go back to the login
//! screen, ...).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutReason {
    /// The user asked to leave.
    UserRequested,
    /// The remote API rejected the session token.
    Expired,
}

/// Reacts to a session ending.
pub trait LogoutHandler: Send + Sync {
    fn on_logout(&self, user: &str, reason: LogoutReason);
}

impl<F> LogoutHandler for F
where
    F: Fn(&str, LogoutReason) + Send + Sync,
{
    fn on_logout(&self, user: &str, reason: LogoutReason) {
        self(user, reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Active { user: String },
    LoggedOut,
}

pub struct SessionController<H: LogoutHandler> {
    handler: H,
    state: SessionState,
}

impl<H: LogoutHandler> SessionController<H> {
    pub fn new(handler: H) -> Self {
        SessionController {
            handler,
            state: SessionState::LoggedOut,
        }
    }

    /// Starts a session for `user`, replacing any active one. A replaced
    /// session is ended as user-requested so its handler still runs.
    pub fn start(&mut self, user: impl Into<String>) {
        self.end(LogoutReason::UserRequested);
        let user = user.into();
        tracing::info!(%user, "Session started");
        self.state = SessionState::Active { user };
    }

    pub fn logout(&mut self) -> bool {
        self.end(LogoutReason::UserRequested)
    }

    /// Ends the session because the API no longer accepts it.
    pub fn expire(&mut self) -> bool {
        self.end(LogoutReason::Expired)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active { user } => Some(user),
            SessionState::LoggedOut => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    // Returns whether a session was actually ended; no-op when already logged out
    fn end(&mut self, reason: LogoutReason) -> bool {
        match std::mem::replace(&mut self.state, SessionState::LoggedOut) {
            SessionState::Active { user } => {
                tracing::info!(%user, ?reason, "Session ended");
                self.handler.on_logout(&user, reason);
                true
            }
            SessionState::LoggedOut => false,
        }
    }
}
