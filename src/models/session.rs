//! Login session state.

use crate::models::User;

/// Who is using the tracker right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(User),
}

impl Session {
    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::LoggedIn(user) => Some(user),
            Session::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn(_))
    }

    /// End the session, returning the user that was logged in.
    pub fn end(&mut self) -> Option<User> {
        match std::mem::take(self) {
            Session::LoggedIn(user) => Some(user),
            Session::LoggedOut => None,
        }
    }
}
