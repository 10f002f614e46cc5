//! Admin authorization seam.
//!
//! Editing and bulk price adjustment are privileged operations. The store
//! only switches into edit mode when an [`Authorizer`] confirms admin
//! privilege, so the policy lives behind a trait and the production token
//! check stays swappable (tests use a stub that always grants).

/// Confirms whether the current caller holds admin privilege.
pub trait Authorizer {
    fn is_admin(&self) -> bool;
}

/// Name of the environment variable carrying the caller's admin token.
pub const ADMIN_TOKEN_ENV: &str = "MENU_PRESS_ADMIN_TOKEN";

/// Production authorizer: compares the configured admin token against the
/// `MENU_PRESS_ADMIN_TOKEN` environment variable.
///
/// A store with no token configured grants nobody — admin access must be
/// set up deliberately.
pub struct TokenAuth {
    expected: Option<String>,
    presented: Option<String>,
}

impl TokenAuth {
    pub fn from_env(expected: Option<&str>) -> Self {
        Self {
            expected: expected.map(str::to_string),
            presented: std::env::var(ADMIN_TOKEN_ENV).ok(),
        }
    }

    #[cfg(test)]
    fn with_presented(expected: Option<&str>, presented: Option<&str>) -> Self {
        Self {
            expected: expected.map(str::to_string),
            presented: presented.map(str::to_string),
        }
    }
}

impl Authorizer for TokenAuth {
    fn is_admin(&self) -> bool {
        match (&self.expected, &self.presented) {
            (Some(expected), Some(presented)) => !expected.is_empty() && expected == presented,
            _ => false,
        }
    }
}
