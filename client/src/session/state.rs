//! Session state

/// Authentication state of the current session
///
/// ```text
/// LoggedOut --login(success)--> Authenticated   [opens the connection]
/// LoggedOut --login(failure)--> LoggedOut
/// Authenticated --logout()--> LoggedOut         [closes the connection]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    Authenticated,
}

impl SessionState {
    pub fn is_authenticated(self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}
