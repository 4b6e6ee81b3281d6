//! Session credential
//!
//! The platform authenticates every request with a browser session cookie.
//! The engine carries it on each call but never inspects it.

/// Opaque session credential
///
/// `Debug` never prints the value so credentials do not leak into logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionCredential(String);

impl SessionCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionCredential(<{} bytes>)", self.0.len())
    }
}
