use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::data::models::ValidationError;

/// Ease factor every record starts from (and returns to on reset)
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Floor the ease factor never drops below
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Highest accepted recall quality
pub const MAX_QUALITY: i32 = 5;

/// Lowest quality that still counts as a successful recall
pub const PASSING_QUALITY: i32 = 3;

/// Kind of learning content a record schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Vocabulary,
    Phrase,
    Flashcard,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Vocabulary => "vocabulary",
            ContentType::Phrase => "phrase",
            ContentType::Flashcard => "flashcard",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vocabulary" => Ok(ContentType::Vocabulary),
            "phrase" => Ok(ContentType::Phrase),
            "flashcard" => Ok(ContentType::Flashcard),
            other => Err(ValidationError::UnknownContentType(other.to_string())),
        }
    }
}

// Same error text as the path parameter parse
impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A candidate item as handed over by the content provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRef {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

impl ContentRef {
    pub fn new(id: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            id: id.into(),
            content_type,
        }
    }

    pub fn key(&self) -> ContentKey {
        ContentKey::new(self.content_type, self.id.clone())
    }
}

/// Identity of a record inside one learner's collection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
    pub content_type: ContentType,
    pub content_id: String,
}

impl ContentKey {
    pub fn new(content_type: ContentType, content_id: impl Into<String>) -> Self {
        Self {
            content_type,
            content_id: content_id.into(),
        }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.content_type, self.content_id)
    }
}

/// Scheduling state of one content item for one learner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub learner_id: String,
    pub content_id: String,
    pub content_type: ContentType,
    pub interval_days: i32,
    pub ease_factor: f64,
    pub due_at: DateTime<Utc>,
    pub correct_streak: i32,
    pub incorrect_count: i32,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl ReviewRecord {
    /// Record for an item that has never been reviewed: due since the epoch.
    pub fn new(learner_id: impl Into<String>, key: &ContentKey) -> Self {
        Self {
            learner_id: learner_id.into(),
            content_id: key.content_id.clone(),
            content_type: key.content_type,
            interval_days: 0,
            ease_factor: INITIAL_EASE_FACTOR,
            due_at: DateTime::<Utc>::UNIX_EPOCH,
            correct_streak: 0,
            incorrect_count: 0,
            last_seen_at: None,
        }
    }

    pub fn key(&self) -> ContentKey {
        ContentKey::new(self.content_type, self.content_id.clone())
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }

    /// Moves the due date to `now + interval_days` and stamps the review time.
    pub(crate) fn schedule_from(&mut self, now: DateTime<Utc>) {
        self.due_at = now + Duration::days(i64::from(self.interval_days));
        self.last_seen_at = Some(now);
    }
}

/// Validated recall quality in `0..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if (0..=MAX_QUALITY).contains(&value) {
            Ok(Quality(value as u8))
        } else {
            Err(ValidationError::QualityOutOfRange(value))
        }
    }

    pub fn value(self) -> i32 {
        i32::from(self.0)
    }

    pub fn is_passing(self) -> bool {
        self.value() >= PASSING_QUALITY
    }
}

/// What the learner produced when the item was shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOutcome {
    /// Graded recall quality, expected in `0..=5`
    Graded(i32),
    /// Plain right/wrong answer
    Boolean(bool),
}

impl ReviewOutcome {
    /// Rejects out-of-range grades before anything is mutated.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            ReviewOutcome::Graded(q) => Quality::new(q).map(|_| ()),
            ReviewOutcome::Boolean(_) => Ok(()),
        }
    }

    pub fn is_correct(&self) -> Result<bool, ValidationError> {
        match *self {
            ReviewOutcome::Graded(q) => Ok(Quality::new(q)?.is_passing()),
            ReviewOutcome::Boolean(correct) => Ok(correct),
        }
    }

    /// Graded view of the outcome. Right/wrong answers map to "good" (4) and "again" (1).
    pub fn quality(&self) -> Result<Quality, ValidationError> {
        match *self {
            ReviewOutcome::Graded(q) => Quality::new(q),
            ReviewOutcome::Boolean(true) => Quality::new(4),
            ReviewOutcome::Boolean(false) => Quality::new(1),
        }
    }
}
