//! Bearer-token session state.
//!
//! A `Session` starts unauthenticated. Code outside this crate obtains a
//! token from the service and assigns it with `set_token`; the client does
//! not perform the login call itself.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The `Authorization` header pair, if a token is set.
    pub fn authorization(&self) -> Option<(String, String)> {
        self.token
            .as_ref()
            .map(|token| ("authorization".to_string(), format!("Bearer {token}")))
    }
}
