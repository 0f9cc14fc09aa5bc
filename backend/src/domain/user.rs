//! User accounts, profile details, and their validated field types.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ledger::INITIAL_POINTS;

/// Validation errors raised by the user field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    InvalidEmail,
    YearOutOfRange { min: u8, max: u8 },
    MissingProfileField { field: &'static str },
    AvatarSeedTooLong { max: usize },
    EmptyAvatarSeed,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::YearOutOfRange { min, max } => {
                write!(f, "year must be between {min} and {max}")
            }
            Self::MissingProfileField { field } => write!(f, "{field} is required"),
            Self::AvatarSeedTooLong { max } => {
                write!(f, "avatar seed must be at most {max} characters")
            }
            Self::EmptyAvatarSeed => write!(f, "avatar seed must not be blank"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
///
/// The original string form is retained so it can be echoed back exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap a UUID read from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Minimum username length after trimming.
pub const USERNAME_MIN: usize = 3;
/// Maximum username length after trimming.
pub const USERNAME_MAX: usize = 20;

/// Public handle, unique across accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address, trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Year of study recorded on a profile, 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AcademicYear(u8);

impl AcademicYear {
    /// Lowest accepted year.
    pub const MIN: u8 = 1;
    /// Highest accepted year.
    pub const MAX: u8 = 4;

    /// Validate a year of study.
    pub fn new(year: u8) -> Result<Self, UserValidationError> {
        if (Self::MIN..=Self::MAX).contains(&year) {
            Ok(Self(year))
        } else {
            Err(UserValidationError::YearOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    /// Numeric year.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<AcademicYear> for u8 {
    fn from(value: AcademicYear) -> Self {
        value.0
    }
}

impl TryFrom<u8> for AcademicYear {
    type Error = UserValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Optional personal details collected during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
    pub branch: Option<String>,
    pub year: Option<AcademicYear>,
    pub college_name: Option<String>,
}

/// Complete profile required to finish onboarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingDetails {
    full_name: String,
    contact_number: String,
    branch: String,
    year: AcademicYear,
    college_name: String,
}

impl OnboardingDetails {
    /// Validate that every field is present and non-blank.
    pub fn try_new(
        full_name: impl AsRef<str>,
        contact_number: impl AsRef<str>,
        branch: impl AsRef<str>,
        year: u8,
        college_name: impl AsRef<str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            full_name: required("fullName", full_name.as_ref())?,
            contact_number: required("contactNumber", contact_number.as_ref())?,
            branch: required("branch", branch.as_ref())?,
            year: AcademicYear::new(year)?,
            college_name: required("collegeName", college_name.as_ref())?,
        })
    }

    /// Convert into the stored profile shape.
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            full_name: Some(self.full_name),
            contact_number: Some(self.contact_number),
            branch: Some(self.branch),
            year: Some(self.year),
            college_name: Some(self.college_name),
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<String, UserValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::MissingProfileField { field });
    }
    Ok(trimmed.to_owned())
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
    pub branch: Option<String>,
    pub year: Option<AcademicYear>,
    pub college_name: Option<String>,
}

impl ProfilePatch {
    /// Apply the provided fields over `profile`, trimming text values.
    pub fn apply_to(self, profile: &mut UserProfile) {
        let trim = |value: String| value.trim().to_owned();
        if let Some(value) = self.full_name {
            profile.full_name = Some(trim(value));
        }
        if let Some(value) = self.contact_number {
            profile.contact_number = Some(trim(value));
        }
        if let Some(value) = self.branch {
            profile.branch = Some(trim(value));
        }
        if let Some(year) = self.year {
            profile.year = Some(year);
        }
        if let Some(value) = self.college_name {
            profile.college_name = Some(trim(value));
        }
    }
}

/// Avatar URL given to every new account.
pub const DEFAULT_AVATAR: &str = "https://ui-avatars.com/api/?background=random&name=User";
/// Longest accepted avatar seed after trimming.
pub const AVATAR_SEED_MAX: usize = 64;

/// Seed for a generated avatar, chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AvatarSeed(String);

impl AvatarSeed {
    /// Trim a seed; blank input clears the seed and yields `None`.
    pub fn parse(raw: impl AsRef<str>) -> Result<Option<Self>, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.chars().count() > AVATAR_SEED_MAX {
            return Err(UserValidationError::AvatarSeedTooLong {
                max: AVATAR_SEED_MAX,
            });
        }
        Ok(Some(Self(trimmed.to_owned())))
    }
}

impl AsRef<str> for AvatarSeed {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AvatarSeed> for String {
    fn from(value: AvatarSeed) -> Self {
        value.0
    }
}

impl TryFrom<String> for AvatarSeed {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)?.ok_or(UserValidationError::EmptyAvatarSeed)
    }
}

/// Registered account and its point balance.
///
/// ## Invariants
/// - `username` and `email` are unique across users (enforced by the store).
/// - `points` is mutated only through the ledger and may be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub avatar: String,
    pub custom_avatar_seed: Option<AvatarSeed>,
    pub points: i64,
    pub is_onboarded: bool,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A freshly registered account holding the starting balance.
    ///
    /// # Examples
    /// ```
    /// use askboard::domain::{EmailAddress, User, UserId, Username};
    /// use chrono::Utc;
    ///
    /// let user = User::register(
    ///     UserId::random(),
    ///     Username::new("ada").expect("valid username"),
    ///     EmailAddress::new("Ada@Example.com").expect("valid email"),
    ///     Utc::now(),
    /// );
    /// assert_eq!(user.points, 50);
    /// assert_eq!(user.email.as_ref(), "ada@example.com");
    /// ```
    pub fn register(
        id: UserId,
        username: Username,
        email: EmailAddress,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            avatar: DEFAULT_AVATAR.to_owned(),
            custom_avatar_seed: None,
            points: INITIAL_POINTS,
            is_onboarded: false,
            profile: UserProfile::default(),
            created_at,
        }
    }
}
