//! Sign-in capability seam and its stub implementation

mod stub;

pub use stub::StubSignIn;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Credentials presented to the sign-in capability.
///
/// Deserializes from a login request body; missing fields default to
/// empty strings and are left for the capability to reject.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Public profile of a signed-in user
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserProfile {
    pub username: String,
}

/// Outcome of a sign-in attempt.
///
/// A denied attempt is a normal outcome, not an error: the login route
/// reports it as a 200 payload carrying the message.
#[derive(Debug, Clone)]
pub enum SignInOutcome {
    Granted { token: String, user: UserProfile },
    Denied { message: String },
}

/// The external sign-in capability
#[async_trait]
pub trait SignIn: Send + Sync {
    async fn attempt_sign_in(&self, credentials: &Credentials) -> SignInOutcome;
}
