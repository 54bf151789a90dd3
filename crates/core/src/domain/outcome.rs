// Call Outcome

/// Result of a guarded call that did not fail.
///
/// `ReauthRequired` means the server rejected the session: the user has
/// already been alerted and the stored credentials cleared.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    ReauthRequired,
}

impl<T> Outcome<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Completed(value) => Outcome::Completed(f(value)),
            Outcome::ReauthRequired => Outcome::ReauthRequired,
        }
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::ReauthRequired => None,
        }
    }

    pub fn is_reauth_required(&self) -> bool {
        matches!(self, Outcome::ReauthRequired)
    }
}
