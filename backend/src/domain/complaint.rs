//! Complaint data model.
//!
//! A complaint is created once, may be resolved once, and is never deleted.
//! `resolved` only moves from `false` to `true`; there is no way back.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use super::secret::{EntropyError, random_identifier};

/// Lowest accepted rating.
pub const RATING_MIN: i64 = 1;
/// Highest accepted rating.
pub const RATING_MAX: i64 = 5;

/// Validation errors returned by the complaint value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplaintValidationError {
    /// Complaint id was empty.
    EmptyId,
    /// Complaint id had leading or trailing whitespace.
    InvalidId,
    /// Title was empty or only whitespace.
    EmptyTitle,
    /// Rating fell outside `RATING_MIN..=RATING_MAX`.
    RatingOutOfRange {
        /// The rejected rating.
        value: i64,
    },
}

impl fmt::Display for ComplaintValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "complaint id must not be empty"),
            Self::InvalidId => {
                write!(f, "complaint id must not contain surrounding whitespace")
            }
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::RatingOutOfRange { value } => write!(
                f,
                "rating must be between {RATING_MIN} and {RATING_MAX}, got {value}"
            ),
        }
    }
}

impl std::error::Error for ComplaintValidationError {}

/// Opaque complaint identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComplaintId(String);

impl ComplaintId {
    /// Validate and construct a [`ComplaintId`] from caller input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ComplaintValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`ComplaintId`].
    pub fn random() -> Result<Self, EntropyError> {
        random_identifier().map(Self)
    }

    fn from_owned(id: String) -> Result<Self, ComplaintValidationError> {
        if id.is_empty() {
            return Err(ComplaintValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(ComplaintValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ComplaintId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ComplaintId> for String {
    fn from(value: ComplaintId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ComplaintId {
    type Error = ComplaintValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Short complaint headline; blank titles are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    /// Validate and construct a [`Title`].
    pub fn new(title: impl Into<String>) -> Result<Self, ComplaintValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ComplaintValidationError::EmptyTitle);
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Title> for String {
    fn from(value: Title) -> Self {
        value.0
    }
}

impl TryFrom<String> for Title {
    type Error = ComplaintValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Satisfaction rating in the inclusive range 1..=5.
///
/// # Examples
/// ```
/// use complaint_desk::domain::Rating;
///
/// assert!(Rating::new(1).is_ok());
/// assert!(Rating::new(5).is_ok());
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Validate and construct a [`Rating`].
    pub fn new(value: i64) -> Result<Self, ComplaintValidationError> {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(ComplaintValidationError::RatingOutOfRange { value });
        }
        u8::try_from(value)
            .map(Self)
            .map_err(|_| ComplaintValidationError::RatingOutOfRange { value })
    }

    /// Numeric rating value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ComplaintValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated submission awaiting an identifier and timestamp from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintDraft {
    title: Title,
    summary: String,
    rating: Rating,
}

impl ComplaintDraft {
    /// Bundle validated submission fields. The summary may be empty.
    pub fn new(title: Title, summary: impl Into<String>, rating: Rating) -> Self {
        Self {
            title,
            summary: summary.into(),
            rating,
        }
    }

    /// Build a draft from raw inputs, validating title and rating.
    pub fn try_from_parts(
        title: impl Into<String>,
        summary: impl Into<String>,
        rating: i64,
    ) -> Result<Self, ComplaintValidationError> {
        Ok(Self::new(Title::new(title)?, summary, Rating::new(rating)?))
    }
}

/// Submitted complaint.
///
/// ## Invariants
/// - `user_id` names the user that submitted the complaint and never
///   changes.
/// - `resolved` starts `false` and can only become `true`.
///
/// Serialises as
/// `{"id","title","summary","rating","resolved","user_id","date"}` with an
/// RFC 3339 `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    id: ComplaintId,
    title: Title,
    summary: String,
    rating: Rating,
    resolved: bool,
    user_id: UserId,
    date: DateTime<Utc>,
}

impl Complaint {
    /// Open a new, unresolved complaint from a validated draft.
    pub fn open(id: ComplaintId, owner: UserId, draft: ComplaintDraft, date: DateTime<Utc>) -> Self {
        let ComplaintDraft {
            title,
            summary,
            rating,
        } = draft;
        Self {
            id,
            title,
            summary,
            rating,
            resolved: false,
            user_id: owner,
            date,
        }
    }

    /// Mark the complaint resolved. Resolving twice is a no-op.
    pub fn resolve(&mut self) {
        self.resolved = true;
    }

    /// Stable complaint identifier.
    pub fn id(&self) -> &ComplaintId {
        &self.id
    }

    /// Complaint headline.
    pub fn title(&self) -> &Title {
        &self.title
    }

    /// Free-text description, possibly empty.
    pub fn summary(&self) -> &str {
        self.summary.as_str()
    }

    /// Rating given by the submitter.
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Whether an administrator has resolved the complaint.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Identifier of the submitting user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Submission timestamp.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
