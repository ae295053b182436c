//! # Course Records
//!
//! One entry of the NTHU open course-data feed. The feed is a JSON array of
//! flat objects keyed by Chinese column headers, every value a string.
//!
//! Several columns pack multiple values into one string:
//!
//! | Column                 | Separator                                   |
//! |------------------------|---------------------------------------------|
//! | `class_room_and_time`  | newline between rooms, tab between room/time |
//! | `teacher`              | newline between teachers, tab between names  |
//! | `expertise`            | tab                                          |
//! | `required_optional_note` | tab                                        |
//! | `program`              | `/`                                          |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ConditionError;

/// Marker the feed puts in `停開註記` for suspended courses.
pub const SUSPENDED_MARK: &str = "停開";

/// A single course from the upstream feed.
///
/// The decoded upstream object is kept as-is and is what the record
/// serializes back to, `null`s and unknown columns included. Typed access
/// goes through [`Course::field`], which folds a missing key, `null` and the
/// empty string into `None`.
///
/// Decoding fails when a known column holds anything but a string or `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Course {
    columns: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Course {
    type Error = String;

    fn try_from(columns: Map<String, Value>) -> Result<Self, Self::Error> {
        for field in CourseField::ALL {
            match columns.get(field.key()) {
                None | Some(Value::Null) | Some(Value::String(_)) => {}
                Some(other) => {
                    return Err(format!(
                        "column {} ({}) must be a string, got {}",
                        field.key(),
                        field.name(),
                        other
                    ))
                }
            }
        }
        Ok(Self { columns })
    }
}

impl Serialize for Course {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.columns.serialize(serializer)
    }
}

/// One classroom booking from `教室與上課時間`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub room: String,
    pub time: Option<String>,
}

/// One instructor from `授課教師`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Teacher {
    pub chinese_name: String,
    pub english_name: Option<String>,
}

impl Course {
    /// Set `field` to `value`, replacing whatever was there.
    pub fn with(mut self, field: CourseField, value: impl Into<String>) -> Self {
        self.columns
            .insert(field.key().to_string(), Value::String(value.into()));
        self
    }

    /// Value of `field`, or `None` when the column is missing, `null` or empty.
    pub fn field(&self, field: CourseField) -> Option<&str> {
        self.columns
            .get(field.key())
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Raw column by feed key, including columns [`CourseField`] does not know.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.columns.get(key)
    }

    /// The upstream object, in upstream key order.
    pub fn columns(&self) -> &Map<String, Value> {
        &self.columns
    }

    /// Enrolment cap, `None` when uncapped.
    pub fn size_cap(&self) -> Option<u32> {
        self.field(CourseField::SizeLimit)
            .and_then(|v| v.trim().parse().ok())
    }

    /// Seats held for freshmen, `0` when none.
    pub fn freshman_reserved(&self) -> u32 {
        self.field(CourseField::FreshmanReservation)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn is_suspended(&self) -> bool {
        self.field(CourseField::Suspend)
            .is_some_and(|v| v.trim() == SUSPENDED_MARK)
    }

    pub fn sessions(&self) -> Vec<Session> {
        entries(self.field(CourseField::ClassRoomAndTime))
            .map(|line| {
                let (room, time) = split_pair(line);
                Session {
                    room: room.to_string(),
                    time: time.map(str::to_string),
                }
            })
            .collect()
    }

    pub fn teachers(&self) -> Vec<Teacher> {
        entries(self.field(CourseField::Teacher))
            .map(|line| {
                let (chinese, english) = split_pair(line);
                Teacher {
                    chinese_name: chinese.to_string(),
                    english_name: english.map(str::to_string),
                }
            })
            .collect()
    }

    pub fn expertises(&self) -> Vec<&str> {
        split_list(self.field(CourseField::Expertise), '\t')
    }

    pub fn programs(&self) -> Vec<&str> {
        split_list(self.field(CourseField::Program), '/')
    }

    pub fn required_optional_notes(&self) -> Vec<&str> {
        split_list(self.field(CourseField::RequiredOptionalNote), '\t')
    }
}

fn entries(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

fn split_pair(line: &str) -> (&str, Option<&str>) {
    match line.split_once('\t') {
        Some((head, tail)) => {
            let tail = tail.trim();
            (head.trim(), (!tail.is_empty()).then_some(tail))
        }
        None => (line, None),
    }
}

fn split_list(value: Option<&str>, sep: char) -> Vec<&str> {
    value
        .unwrap_or_default()
        .split(sep)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

// =============================================================================
// Field catalogue
// =============================================================================

/// Every column of the feed, addressable by feed key or snake-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseField {
    Id,
    ChineseTitle,
    EnglishTitle,
    Credit,
    SizeLimit,
    FreshmanReservation,
    Object,
    GeType,
    Language,
    Note,
    Suspend,
    ClassRoomAndTime,
    Teacher,
    Prerequisite,
    LimitNote,
    Expertise,
    Program,
    NoExtraSelection,
    RequiredOptionalNote,
}

impl CourseField {
    pub const ALL: [CourseField; 19] = [
        Self::Id,
        Self::ChineseTitle,
        Self::EnglishTitle,
        Self::Credit,
        Self::SizeLimit,
        Self::FreshmanReservation,
        Self::Object,
        Self::GeType,
        Self::Language,
        Self::Note,
        Self::Suspend,
        Self::ClassRoomAndTime,
        Self::Teacher,
        Self::Prerequisite,
        Self::LimitNote,
        Self::Expertise,
        Self::Program,
        Self::NoExtraSelection,
        Self::RequiredOptionalNote,
    ];

    /// Column header used by the upstream feed.
    pub fn key(self) -> &'static str {
        match self {
            Self::Id => "科號",
            Self::ChineseTitle => "課程中文名稱",
            Self::EnglishTitle => "課程英文名稱",
            Self::Credit => "學分數",
            Self::SizeLimit => "人限",
            Self::FreshmanReservation => "新生保留人數",
            Self::Object => "通識對象",
            Self::GeType => "通識類別",
            Self::Language => "授課語言",
            Self::Note => "備註",
            Self::Suspend => "停開註記",
            Self::ClassRoomAndTime => "教室與上課時間",
            Self::Teacher => "授課教師",
            Self::Prerequisite => "擋修說明",
            Self::LimitNote => "課程限制說明",
            Self::Expertise => "第一二專長對應",
            Self::Program => "學分學程對應",
            Self::NoExtraSelection => "不可加簽說明",
            Self::RequiredOptionalNote => "必選修說明",
        }
    }

    /// Snake-case name of the column.
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::ChineseTitle => "chinese_title",
            Self::EnglishTitle => "english_title",
            Self::Credit => "credit",
            Self::SizeLimit => "size_limit",
            Self::FreshmanReservation => "freshman_reservation",
            Self::Object => "object",
            Self::GeType => "ge_type",
            Self::Language => "language",
            Self::Note => "note",
            Self::Suspend => "suspend",
            Self::ClassRoomAndTime => "class_room_and_time",
            Self::Teacher => "teacher",
            Self::Prerequisite => "prerequisite",
            Self::LimitNote => "limit_note",
            Self::Expertise => "expertise",
            Self::Program => "program",
            Self::NoExtraSelection => "no_extra_selection",
            Self::RequiredOptionalNote => "required_optional_note",
        }
    }
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CourseField {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s || field.name() == s)
            .ok_or_else(|| ConditionError::UnknownField(s.to_string()))
    }
}
