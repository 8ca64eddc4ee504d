use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::extensions::string::ToIsoSeparators;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

// ==========
// DayOfWeek
// ==========

/// Weekday numbered Monday=1 .. Sunday=7.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum DayOfWeek {
    #[strum(serialize = "mon", serialize = "monday", to_string = "MON")]
    Mon,
    #[strum(serialize = "tue", serialize = "tuesday", to_string = "TUE")]
    Tue,
    #[strum(serialize = "wed", serialize = "wednesday", to_string = "WED")]
    Wed,
    #[strum(serialize = "thu", serialize = "thursday", to_string = "THU")]
    Thu,
    #[strum(serialize = "fri", serialize = "friday", to_string = "FRI")]
    Fri,
    #[strum(serialize = "sat", serialize = "saturday", to_string = "SAT")]
    Sat,
    #[strum(serialize = "sun", serialize = "sunday", to_string = "SUN")]
    Sun,
}

impl DayOfWeek {
    pub fn number(self) -> u8 {
        match self {
            DayOfWeek::Mon => 1,
            DayOfWeek::Tue => 2,
            DayOfWeek::Wed => 3,
            DayOfWeek::Thu => 4,
            DayOfWeek::Fri => 5,
            DayOfWeek::Sat => 6,
            DayOfWeek::Sun => 7,
        }
    }

    /// Accepts 1..=7, and 0 as the 0-based Sunday some sources emit.
    pub fn from_number(n: u8) -> Result<Self> {
        match n {
            1 => Ok(DayOfWeek::Mon),
            2 => Ok(DayOfWeek::Tue),
            3 => Ok(DayOfWeek::Wed),
            4 => Ok(DayOfWeek::Thu),
            5 => Ok(DayOfWeek::Fri),
            6 => Ok(DayOfWeek::Sat),
            0 | 7 => Ok(DayOfWeek::Sun),
            other => Err(Error::Format(format!(
                "Invalid weekday number: {}. Expected 1 (Monday) to 7 (Sunday).",
                other
            ))),
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Self::from_number(n);
        }
        Self::from_str(s).map_err(|_| {
            Error::Format(format!(
                "Invalid day of the week: '{}'. Valid days: {}",
                s,
                valid_csv::<DayOfWeek>()
            ))
        })
    }
}

impl Serialize for DayOfWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u8),
            Name(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => DayOfWeek::from_number(n),
            Raw::Name(s) => DayOfWeek::try_from(&s),
        }
        .map_err(serde::de::Error::custom)
    }
}

// ==================
// Rotation tag/week
// ==================

/// Which rotation week a recurring item belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, AsRefStr, EnumIterDerive,
)]
#[strum(ascii_case_insensitive)]
pub enum RotationTag {
    #[strum(serialize = "A", serialize = "week a", serialize = "1", to_string = "A")]
    A,
    #[strum(serialize = "B", serialize = "week b", serialize = "2", to_string = "B")]
    B,
    #[default]
    #[strum(
        serialize = "every",
        serialize = "every week",
        serialize = "every-week",
        serialize = "both",
        serialize = "",
        to_string = "every"
    )]
    EveryWeek,
}

impl RotationTag {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Format(format!(
                "Invalid rotation week: '{}'. Valid values: {}",
                s.trim(),
                valid_csv::<RotationTag>()
            ))
        })
    }

    /// Whether an item with this tag is active in `week`. Tagged items on a
    /// timetable without an anchor (`RotationWeek::None`) count as every week.
    pub fn is_active_in(self, week: RotationWeek) -> bool {
        match (self, week) {
            (RotationTag::EveryWeek, _) => true,
            (_, RotationWeek::None) => true,
            (RotationTag::A, RotationWeek::One) => true,
            (RotationTag::B, RotationWeek::Two) => true,
            _ => false,
        }
    }
}

impl Serialize for RotationTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for RotationTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(RotationTag::EveryWeek),
            Some(s) => RotationTag::try_from(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Rotation week of a concrete date relative to the timetable's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIterDerive)]
pub enum RotationWeek {
    #[strum(to_string = "1")]
    One,
    #[strum(to_string = "2")]
    Two,
    #[strum(to_string = "none")]
    None,
}

// =========
// Priority
// =========

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Format(format!(
                "Invalid priority: '{}'. Valid priorities: {}",
                s.trim(),
                valid_csv::<Priority>()
            ))
        })
    }
}

// ==========
// TimeOfDay
// ==========

/// Wall-clock time as whole minutes since midnight. `24:00` is allowed so a
/// day can end at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(pub u32);

impl TimeOfDay {
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Parses `H:MM` / `HH:MM`.
    pub fn try_from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let (h, m) = raw
            .split_once(':')
            .ok_or_else(|| Self::error(raw, "expected 'H:MM'"))?;

        let digits = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(Self::error(raw, "expected 'H:MM'"));
        }

        let hours: u32 = h.parse().map_err(|_| Self::error(raw, "bad hour"))?;
        let minutes: u32 = m.parse().map_err(|_| Self::error(raw, "bad minute"))?;
        if minutes > 59 {
            return Err(Self::error(raw, "minutes must be 00-59"));
        }
        let total = hours * 60 + minutes;
        if total > MINUTES_PER_DAY {
            return Err(Self::error(raw, "time must not be after 24:00"));
        }
        Ok(TimeOfDay(total))
    }

    pub fn try_from_minutes(minutes: u32) -> Result<Self> {
        if minutes > MINUTES_PER_DAY {
            return Err(Error::Format(format!(
                "Minute of day {} is outside 0..={}.",
                minutes, MINUTES_PER_DAY
            )));
        }
        Ok(TimeOfDay(minutes))
    }

    fn error(input: &str, why: &str) -> Error {
        Error::Format(format!("Invalid time '{}': {}.", input, why))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::try_from_str(&s).map_err(serde::de::Error::custom)
    }
}

// ==========
// DayBounds
// ==========

/// Visible planning window of a day, in whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBounds {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for DayBounds {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 16,
        }
    }
}

impl DayBounds {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self> {
        let bounds = Self {
            start_hour,
            end_hour,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(Error::InvalidTimetable(format!(
                "Day bounds {}:00-{}:00 must satisfy start < end <= 24.",
                self.start_hour, self.end_hour
            )));
        }
        Ok(())
    }

    /// Minute of the day the bounds open at, capped at midnight so an
    /// unvalidated timetable cannot overflow.
    pub fn start_minutes(&self) -> u32 {
        self.start_hour.saturating_mul(60).min(MINUTES_PER_DAY)
    }

    pub fn end_minutes(&self) -> u32 {
        self.end_hour.saturating_mul(60).min(MINUTES_PER_DAY)
    }
}

impl fmt::Display for DayBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00-{}:00", self.start_hour, self.end_hour)
    }
}

// ==============
// Calendar days
// ==============

/// Calendar day of an ISO date (`YYYY-MM-DD`) or ISO date-time string. The
/// date portion is taken literally. A time part only has to open with
/// `HH:MM`; seconds and offset are ignored.
pub fn iso_calendar_day(input: &str) -> Result<NaiveDate> {
    let normalized = input.to_iso_separators();
    let (date_part, time_part) = match normalized.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (normalized.as_str(), None),
    };

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| {
        Error::Format(format!(
            "Invalid date: '{}'. Expected an ISO date such as 2024-03-04.",
            input.trim()
        ))
    })?;

    if let Some(time) = time_part {
        let b = time.as_bytes();
        let hh_mm = b.len() >= 5
            && b[..2].iter().all(u8::is_ascii_digit)
            && b[2] == b':'
            && b[3..5].iter().all(u8::is_ascii_digit);
        if !hh_mm {
            return Err(Error::Format(format!(
                "Invalid date-time: '{}'. Expected a time such as 09:00 after 'T'.",
                input.trim()
            )));
        }
    }

    Ok(date)
}

/// Serde adapter writing `YYYY-MM-DD` and reading any form accepted by
/// [`iso_calendar_day`].
pub mod iso_date {
    use super::iso_calendar_day;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        iso_calendar_day(&raw).map_err(serde::de::Error::custom)
    }
}

pub mod iso_date_opt {
    use super::iso_calendar_day;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => iso_calendar_day(s)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// =====
// Bool
// =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "yes", serialize = "on", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "no", serialize = "off", to_string = "False")]
    TextFalse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s.trim()) {
            Ok(fmt) => Ok(Bool(matches!(fmt, BoolFormat::TextTrue))),
            Err(_) => Err(Error::Format(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Flag(b) => Ok(Bool(b)),
            Raw::Text(s) => Bool::try_from_str(&s).map_err(serde::de::Error::custom),
        }
    }
}

// =========
// Policies
// =========

/// What the day view does with lessons that overlap in time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    #[default]
    #[strum(serialize = "render-both", to_string = "render-both")]
    RenderBoth,
    #[strum(serialize = "first-wins", to_string = "first-wins")]
    FirstWins,
}

impl OverlapPolicy {
    pub fn help(&self) -> &'static str {
        match self {
            OverlapPolicy::RenderBoth => "Show every overlapping lesson and log a warning.",
            OverlapPolicy::FirstWins => {
                "Show the earliest declared lesson; later overlapping ones are hidden and logged."
            }
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Format(format!(
                "Invalid overlap policy: '{}'. Allowed policies: {}",
                s.trim(),
                valid_csv::<OverlapPolicy>()
            ))
        })
    }
}

/// Ordering of the unscheduled to-do list.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum TaskListOrder {
    #[default]
    #[strum(serialize = "priority-first", to_string = "priority-first")]
    PriorityFirst,
    #[strum(serialize = "oldest-first", to_string = "oldest-first")]
    OldestFirst,
    #[strum(serialize = "newest-first", to_string = "newest-first")]
    NewestFirst,
}

impl TaskListOrder {
    pub fn help(&self) -> &'static str {
        match self {
            TaskListOrder::PriorityFirst => "Open tasks first, then highest priority, then oldest.",
            TaskListOrder::OldestFirst => "Open tasks first, then by creation time.",
            TaskListOrder::NewestFirst => "Open tasks first, newest created on top.",
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Format(format!(
                "Invalid task list order: '{}'. Allowed orders: {}",
                s.trim(),
                valid_csv::<TaskListOrder>()
            ))
        })
    }
}
