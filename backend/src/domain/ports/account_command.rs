//! Driving port for account registration and profile changes.
//!
//! Credentials are verified elsewhere; registration only creates the account
//! that the session then refers to.
use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Error, User, UserId};

/// Raw registration input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
}

/// Raw profile fields. Onboarding needs every field; a profile update only
/// touches the ones present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
    pub branch: Option<String>,
    pub year: Option<u8>,
    pub college_name: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account with the starting balance.
    ///
    /// # Errors
    ///
    /// `conflict` when the username or email is taken.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Store the full profile and mark the user onboarded.
    async fn complete_onboarding(
        &self,
        user: &UserId,
        fields: ProfileFields,
    ) -> Result<User, Error>;

    /// Change only the provided profile fields.
    async fn update_profile(&self, user: &UserId, fields: ProfileFields) -> Result<User, Error>;

    /// Set the seed used to generate the user's avatar. A missing or blank
    /// seed clears it.
    async fn update_avatar_seed(&self, user: &UserId, seed: Option<String>)
    -> Result<User, Error>;
}
