//! Session state owned by the application's composition root.
//!
//! Authentication itself happens elsewhere; a store only remembers who is
//! signed in. It is created once, `init`ed on start, given a session after
//! a successful login, and `clear`ed on logout.

/// The signed-in user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

pub trait SessionStore {
    /// Restores whatever session the store still holds from a previous run.
    fn init(&mut self) -> Option<&User>;

    fn current_user(&self) -> Option<&User>;

    /// Bearer token for the active session.
    fn token(&self) -> Option<&str>;

    fn start(&mut self, session: Session);

    /// Forgets the active session and anything retained for the next `init`.
    fn clear(&mut self);

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// True when `owner_id` is the signed-in user.
    fn owns(&self, owner_id: &str) -> bool {
        self.current_user().is_some_and(|u| u.id == owner_id)
    }
}

/// A store that keeps everything in the instance itself.
///
/// `retained` plays the part of device storage: it survives until `clear`
/// and is what `init` restores from.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    retained: Option<Session>,
    active: Option<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that will restore `session` on `init`.
    pub fn with_retained(session: Session) -> Self {
        Self {
            retained: Some(session),
            active: None,
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn init(&mut self) -> Option<&User> {
        self.active = self.retained.clone();
        match &self.active {
            Some(session) => tracing::info!(user = %session.user.id, "session restored"),
            None => tracing::debug!("no session to restore"),
        }
        self.current_user()
    }

    fn current_user(&self) -> Option<&User> {
        self.active.as_ref().map(|s| &s.user)
    }

    fn token(&self) -> Option<&str> {
        self.active.as_ref().map(|s| s.token.as_str())
    }

    fn start(&mut self, session: Session) {
        tracing::info!(user = %session.user.id, "session started");
        self.retained = Some(session.clone());
        self.active = Some(session);
    }

    fn clear(&mut self) {
        if let Some(session) = self.active.take() {
            tracing::info!(user = %session.user.id, "session cleared");
        }
        self.retained = None;
    }
}
