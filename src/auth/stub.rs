//! Deterministic sign-in stub

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::{Credentials, SignIn, SignInOutcome, UserProfile};

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 6;

/// Stub sign-in with deterministic rules and optional simulated latency.
///
/// A username is accepted when it is non-empty and contains only ASCII
/// alphanumerics or underscores; the password must be at least
/// [`MIN_PASSWORD_LEN`] characters. Granted outcomes carry a fresh token
/// derived from the username and a per-stub nonce.
pub struct StubSignIn {
    latency: Duration,
    nonce: AtomicU64,
}

impl StubSignIn {
    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
            nonce: AtomicU64::new(0),
        }
    }

    /// Stub that sleeps for `latency` on every attempt
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            nonce: AtomicU64::new(0),
        }
    }

    fn issue_token(&self, username: &str) -> String {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let mut hasher = Sha256::new();
        hasher.update(username.as_bytes());
        hasher.update(nonce.to_be_bytes());
        hex::encode(hasher.finalize())
    }
}

impl Default for StubSignIn {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignIn for StubSignIn {
    async fn attempt_sign_in(&self, credentials: &Credentials) -> SignInOutcome {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let username_ok = !credentials.username.is_empty()
            && credentials
                .username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !username_ok {
            tracing::debug!(username = %credentials.username, "sign-in denied: bad username");
            return SignInOutcome::Denied {
                message: "Invalid username".to_string(),
            };
        }

        if credentials.password.len() < MIN_PASSWORD_LEN {
            tracing::debug!(username = %credentials.username, "sign-in denied: bad password");
            return SignInOutcome::Denied {
                message: "Invalid password".to_string(),
            };
        }

        SignInOutcome::Granted {
            token: self.issue_token(&credentials.username),
            user: UserProfile {
                username: credentials.username.clone(),
            },
        }
    }
}
