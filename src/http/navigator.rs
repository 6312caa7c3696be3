// src/http/navigator.rs
// DOCUMENTATION: Forced navigation on session expiry
// PURPOSE: Let the pipeline send the user back to login without touching globals

use std::sync::atomic::{AtomicUsize, Ordering};

/// Receives the "go to login" side effect
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Navigator for command-line use: tells the user where to log in again
pub struct LoginRedirect {
    login_route: String,
    redirects: AtomicUsize,
}

impl LoginRedirect {
    pub fn new(login_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
            redirects: AtomicUsize::new(0),
        }
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// How many times a redirect was requested
    pub fn redirect_count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for LoginRedirect {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
        log::warn!("Session expired, redirecting to {}", self.login_route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_counts() {
        let navigator = LoginRedirect::new("/auth/login");
        assert_eq!(navigator.redirect_count(), 0);
        navigator.redirect_to_login();
        assert_eq!(navigator.redirect_count(), 1);
        assert_eq!(navigator.login_route(), "/auth/login");
    }
}
