use crate::core::models::ClassId;
use crate::core::types::iso_calendar_day;
use crate::errors::{Error, Result, require_format};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

const KEY_SEPARATOR: &str = "::";

/// `(class, date)` pair addressing one lesson occurrence's notes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LessonContentKey {
    pub class_id: ClassId,
    pub date: NaiveDate,
}

impl LessonContentKey {
    pub fn new(class_id: impl Into<ClassId>, date: NaiveDate) -> Self {
        Self {
            class_id: class_id.into(),
            date,
        }
    }

    /// Parses `classId::YYYY-MM-DD`. The class id may itself contain `::`;
    /// the last separator splits off the date.
    pub fn parse(raw: &str) -> Result<Self> {
        let (class_id, date) = require_format(
            raw.rsplit_once(KEY_SEPARATOR),
            format!(
                "Invalid lesson content key: '{}'. Expected 'classId::YYYY-MM-DD'.",
                raw
            ),
        )?;
        if class_id.is_empty() {
            return Err(Error::Format(format!(
                "Invalid lesson content key: '{}'. Class id is empty.",
                raw
            )));
        }
        Ok(Self::new(class_id, iso_calendar_day(date)?))
    }
}

impl fmt::Display for LessonContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.class_id,
            KEY_SEPARATOR,
            self.date.format("%Y-%m-%d")
        )
    }
}

impl Serialize for LessonContentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LessonContentKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        LessonContentKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

impl LessonContent {
    /// Whether the user has entered anything worth a badge.
    pub fn has_content(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        filled(&self.title) || filled(&self.notes) || !self.links.is_empty()
    }
}

/// User annotations per lesson occurrence, persisted verbatim as a JSON object
/// keyed by `classId::YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonContentMap(BTreeMap<LessonContentKey, LessonContent>);

impl LessonContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, class_id: &str, date: NaiveDate) -> Option<&LessonContent> {
        self.0.get(&LessonContentKey::new(class_id, date))
    }

    pub fn has_content(&self, class_id: &str, date: NaiveDate) -> bool {
        self.get(class_id, date).is_some_and(LessonContent::has_content)
    }

    /// New map with `content` stored for `(class_id, date)`. Entries are never
    /// dropped, even when emptied.
    pub fn with_content(&self, class_id: &str, date: NaiveDate, content: LessonContent) -> Self {
        let mut next = self.0.clone();
        next.insert(LessonContentKey::new(class_id, date), content);
        Self(next)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LessonContentKey, &LessonContent)> {
        self.0.iter()
    }
}
