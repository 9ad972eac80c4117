//! User data model.
//!
//! Users are created once on registration and never deleted. The only field
//! that changes afterwards is the list of complaints they have submitted,
//! which the store materialises from its own index when a user is read.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::Complaint;
use super::secret::{EntropyError, random_identifier, random_secret};

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// User id was empty.
    EmptyId,
    /// User id had leading or trailing whitespace.
    InvalidId,
    /// Secret code was empty or only whitespace.
    EmptySecret,
    /// Display name was empty or only whitespace.
    EmptyDisplayName,
    /// Email was empty or only whitespace.
    EmptyEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must not contain surrounding whitespace"),
            Self::EmptySecret => write!(f, "secret code must not be empty"),
            Self::EmptyDisplayName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Opaque user identifier.
///
/// Freshly generated identifiers are 32 lowercase hex characters; values
/// read back from clients are only required to be non-empty and free of
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Result<Self, EntropyError> {
        random_identifier().map(Self)
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Bearer secret issued to a user at registration.
///
/// The value is wiped from memory on drop and never printed by `Debug`.
/// Comparison is exact and case-sensitive.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SecretCode(String);

impl SecretCode {
    /// Validate and construct a [`SecretCode`] from caller input.
    ///
    /// # Examples
    /// ```
    /// use complaint_desk::domain::SecretCode;
    ///
    /// let secret = SecretCode::new("admin123").expect("non-empty secret");
    /// assert_eq!(secret.expose(), "admin123");
    /// assert!(SecretCode::new("   ").is_err());
    /// ```
    pub fn new(secret: impl Into<String>) -> Result<Self, UserValidationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(UserValidationError::EmptySecret);
        }
        Ok(Self(secret))
    }

    /// Generate a new random [`SecretCode`].
    pub fn random() -> Result<Self, EntropyError> {
        random_secret().map(Self)
    }

    /// Reveal the raw secret for comparison or for returning to its owner.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SecretCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretCode(***)")
    }
}

impl Drop for SecretCode {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Serialize for SecretCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

impl<'de> Deserialize<'de> for SecretCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Human readable name supplied at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`]; blank names are rejected.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact email, unique across users.
///
/// Uniqueness is checked by exact, case-sensitive comparison; no format
/// validation beyond presence is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`]; blank values are rejected.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered user as returned to its owner.
///
/// ## Invariants
/// - `complaints` holds exactly the complaints whose owner is `id`, in
///   submission order.
///
/// Serialises with snake_case keys:
/// `{"id","secret_code","name","email","complaints":[...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    secret_code: SecretCode,
    name: DisplayName,
    email: Email,
    #[serde(default)]
    complaints: Vec<Complaint>,
}

impl User {
    /// Assemble a user from validated components.
    pub fn new(
        id: UserId,
        secret_code: SecretCode,
        name: DisplayName,
        email: Email,
        complaints: Vec<Complaint>,
    ) -> Self {
        Self {
            id,
            secret_code,
            name,
            email,
            complaints,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Bearer secret for this user.
    pub fn secret_code(&self) -> &SecretCode {
        &self.secret_code
    }

    /// Display name given at registration.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Unique contact email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Complaints submitted by this user, oldest first.
    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }
}
