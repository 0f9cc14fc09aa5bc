//! Account registration, onboarding, and profile maintenance.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AccountCommand, AccountQuery, ProfileFields, Registration, UserRepository,
};
use crate::domain::service_support::{map_user_error, user_validation};
use crate::domain::{
    AcademicYear, AvatarSeed, EmailAddress, Error, OnboardingDetails, ProfilePatch, User, UserId,
    UserValidationError, Username,
};

/// Service implementing [`AccountCommand`] and [`AccountQuery`].
pub struct AccountService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountService<U> {
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    async fn load(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(user_not_found)
    }
}

fn user_not_found() -> Error {
    Error::not_found("user not found")
}

fn onboarding_details(fields: ProfileFields) -> Result<OnboardingDetails, UserValidationError> {
    let missing = |field| UserValidationError::MissingProfileField { field };
    OnboardingDetails::try_new(
        fields.full_name.ok_or(missing("fullName"))?,
        fields.contact_number.ok_or(missing("contactNumber"))?,
        fields.branch.ok_or(missing("branch"))?,
        fields.year.ok_or(missing("year"))?,
        fields.college_name.ok_or(missing("collegeName"))?,
    )
}

fn profile_patch(fields: ProfileFields) -> Result<ProfilePatch, UserValidationError> {
    Ok(ProfilePatch {
        full_name: fields.full_name,
        contact_number: fields.contact_number,
        branch: fields.branch,
        year: fields.year.map(AcademicYear::new).transpose()?,
        college_name: fields.college_name,
    })
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let username = Username::new(&registration.username).map_err(user_validation)?;
        let email = EmailAddress::new(&registration.email).map_err(user_validation)?;
        let taken = self
            .users
            .exists_with_username_or_email(&username, &email)
            .await
            .map_err(map_user_error)?;
        if taken {
            return Err(Error::conflict("user already exists"));
        }

        let user = User::register(UserId::random(), username, email, self.clock.utc());
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    async fn complete_onboarding(
        &self,
        user: &UserId,
        fields: ProfileFields,
    ) -> Result<User, Error> {
        let details = onboarding_details(fields).map_err(user_validation)?;
        let updated = self
            .users
            .save_profile(user, &details.into_profile(), true)
            .await
            .map_err(map_user_error)?
            .ok_or_else(user_not_found)?;
        info!(user_id = %user, "onboarding completed");
        Ok(updated)
    }

    async fn update_profile(&self, user: &UserId, fields: ProfileFields) -> Result<User, Error> {
        let patch = profile_patch(fields).map_err(user_validation)?;
        let current = self.load(user).await?;
        let mut profile = current.profile;
        patch.apply_to(&mut profile);
        self.users
            .save_profile(user, &profile, current.is_onboarded)
            .await
            .map_err(map_user_error)?
            .ok_or_else(user_not_found)
    }

    async fn update_avatar_seed(
        &self,
        user: &UserId,
        seed: Option<String>,
    ) -> Result<User, Error> {
        let seed = match seed {
            Some(raw) => AvatarSeed::parse(raw).map_err(user_validation)?,
            None => None,
        };
        let updated = self
            .users
            .set_avatar_seed(user, seed)
            .await
            .map_err(map_user_error)?
            .ok_or_else(user_not_found)?;
        info!(user_id = %user, "avatar seed updated");
        Ok(updated)
    }
}

#[async_trait]
impl<U> AccountQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn current(&self, user: &UserId) -> Result<User, Error> {
        self.load(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockUserRepository, UserPersistenceError};
    use crate::outbound::memory::InMemoryStore;
    use crate::test_support::MutableClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn service() -> AccountService<InMemoryStore> {
        AccountService::new(
            Arc::new(InMemoryStore::default()),
            Arc::new(MutableClock::at(2024, 2, 1)),
        )
    }

    fn registration(username: &str, email: &str) -> Registration {
        Registration {
            username: username.to_owned(),
            email: email.to_owned(),
        }
    }

    fn full_profile(year: u8) -> ProfileFields {
        ProfileFields {
            full_name: Some("Ada Lovelace".to_owned()),
            contact_number: Some("+44 20 7946 0000".to_owned()),
            branch: Some("CSE".to_owned()),
            year: Some(year),
            college_name: Some("Analytical College".to_owned()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn register_grants_the_starting_balance(service: AccountService<InMemoryStore>) {
        let user = service
            .register(registration(" ada ", "Ada@Example.COM"))
            .await
            .expect("registered");

        assert_eq!(user.points, 50);
        assert!(!user.is_onboarded);
        assert_eq!(user.username.as_ref(), "ada");
        assert_eq!(user.email.as_ref(), "ada@example.com");
        let current = service.current(&user.id).await;
        assert_eq!(current, Ok(user));
    }

    #[rstest]
    #[case(registration("ada", "other@example.com"))]
    #[case(registration("grace", "ADA@example.com"))]
    #[tokio::test]
    async fn register_rejects_taken_usernames_and_emails(
        service: AccountService<InMemoryStore>,
        #[case] duplicate: Registration,
    ) {
        service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect("first registration");

        let err = service.register(duplicate).await.expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case(registration("ab", "ab@example.com"), "username")]
    #[case(registration("abcdefghijklmnopqrstu", "long@example.com"), "username")]
    #[case(registration("valid", "not-an-email"), "email")]
    #[tokio::test]
    async fn register_validates_fields(
        service: AccountService<InMemoryStore>,
        #[case] input: Registration,
        #[case] field: &str,
    ) {
        let err = service.register(input).await.expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|details| details.get("field")),
            Some(&serde_json::json!(field))
        );
    }

    #[tokio::test]
    async fn register_maps_a_racing_duplicate_insert_to_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_with_username_or_email()
            .return_once(|_, _| Ok(false));
        repo.expect_insert()
            .return_once(|_| Err(UserPersistenceError::duplicate("email")));
        let service = AccountService::new(Arc::new(repo), Arc::new(MutableClock::at(2024, 2, 1)));

        let err = service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn onboarding_requires_every_field(service: AccountService<InMemoryStore>) {
        let user = service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect("registered");
        let incomplete = ProfileFields {
            branch: None,
            ..full_profile(2)
        };

        let err = service
            .complete_onboarding(&user.id, incomplete)
            .await
            .expect_err("missing branch");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);

        let onboarded = service
            .complete_onboarding(&user.id, full_profile(2))
            .await
            .expect("onboarded");
        assert!(onboarded.is_onboarded);
        assert_eq!(onboarded.profile.branch.as_deref(), Some("CSE"));
        assert_eq!(onboarded.points, 50);
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[tokio::test]
    async fn onboarding_rejects_years_outside_one_to_four(
        service: AccountService<InMemoryStore>,
        #[case] year: u8,
    ) {
        let user = service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect("registered");

        let err = service
            .complete_onboarding(&user.id, full_profile(year))
            .await
            .expect_err("bad year");
        assert_eq!(
            err.details().and_then(|details| details.get("field")),
            Some(&serde_json::json!("year"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn profile_update_changes_only_provided_fields(service: AccountService<InMemoryStore>) {
        let user = service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect("registered");
        service
            .complete_onboarding(&user.id, full_profile(2))
            .await
            .expect("onboarded");

        let updated = service
            .update_profile(
                &user.id,
                ProfileFields {
                    year: Some(3),
                    ..ProfileFields::default()
                },
            )
            .await
            .expect("updated");

        assert_eq!(updated.profile.year.map(AcademicYear::get), Some(3));
        assert_eq!(updated.profile.full_name.as_deref(), Some("Ada Lovelace"));
        assert!(updated.is_onboarded);
    }

    #[rstest]
    #[tokio::test]
    async fn avatar_seed_is_trimmed_and_cleared_by_blank_input(
        service: AccountService<InMemoryStore>,
    ) {
        let user = service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect("registered");
        assert_eq!(user.avatar, crate::domain::DEFAULT_AVATAR);
        assert!(user.custom_avatar_seed.is_none());

        let seeded = service
            .update_avatar_seed(&user.id, Some("  lovelace  ".to_owned()))
            .await
            .expect("seed set");
        assert_eq!(
            seeded.custom_avatar_seed.as_ref().map(AsRef::as_ref),
            Some("lovelace")
        );
        assert_eq!(service.current(&user.id).await, Ok(seeded));

        let cleared = service
            .update_avatar_seed(&user.id, Some("   ".to_owned()))
            .await
            .expect("seed cleared");
        assert!(cleared.custom_avatar_seed.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn overlong_avatar_seeds_are_rejected(service: AccountService<InMemoryStore>) {
        let user = service
            .register(registration("ada", "ada@example.com"))
            .await
            .expect("registered");

        let err = service
            .update_avatar_seed(&user.id, Some("x".repeat(crate::domain::AVATAR_SEED_MAX + 1)))
            .await
            .expect_err("too long");
        assert_eq!(
            err.details().and_then(|details| details.get("field")),
            Some(&serde_json::json!("customAvatarSeed"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn avatar_seed_for_unknown_user_is_not_found(service: AccountService<InMemoryStore>) {
        let err = service
            .update_avatar_seed(&UserId::random(), None)
            .await
            .expect_err("unknown");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn current_of_unknown_user_is_not_found(service: AccountService<InMemoryStore>) {
        let err = service
            .current(&UserId::random())
            .await
            .expect_err("unknown");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
