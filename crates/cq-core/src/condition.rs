//! # Field Conditions
//!
//! A [`Condition`] tests one column of a [`Course`] either against a
//! case-insensitive regular expression (substring search, the pattern may
//! match anywhere in the value) or against an exact literal.

use regex::{Regex, RegexBuilder};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::course::{Course, CourseField};
use crate::error::ConditionError;

/// How the matcher is applied to the field value.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Compiled case-insensitive pattern.
    Pattern(Regex),
    /// Byte-for-byte equality. No case folding, no trimming.
    Exact(String),
}

/// Predicate over a single course column.
#[derive(Debug, Clone)]
pub struct Condition {
    field: CourseField,
    matcher: Matcher,
}

impl Condition {
    /// Build a condition. With `regex_mode` the matcher is compiled here,
    /// so an invalid pattern fails construction instead of evaluating false.
    pub fn new(
        field: CourseField,
        matcher: impl Into<String>,
        regex_mode: bool,
    ) -> Result<Self, ConditionError> {
        let matcher = matcher.into();
        let matcher = if regex_mode {
            Matcher::Pattern(RegexBuilder::new(&matcher).case_insensitive(true).build()?)
        } else {
            Matcher::Exact(matcher)
        };
        Ok(Self { field, matcher })
    }

    pub fn pattern(field: CourseField, pattern: &str) -> Result<Self, ConditionError> {
        Self::new(field, pattern, true)
    }

    pub fn exact(field: CourseField, value: impl Into<String>) -> Self {
        Self {
            field,
            matcher: Matcher::Exact(value.into()),
        }
    }

    /// Resolve `field` by feed key or snake-case name, then build.
    pub fn parse(field: &str, matcher: &str, regex_mode: bool) -> Result<Self, ConditionError> {
        Self::new(field.parse()?, matcher, regex_mode)
    }

    pub fn field(&self) -> CourseField {
        self.field
    }

    /// The pattern source or the literal.
    pub fn matcher(&self) -> &str {
        match &self.matcher {
            Matcher::Pattern(re) => re.as_str(),
            Matcher::Exact(value) => value,
        }
    }

    pub fn mode(&self) -> &Matcher {
        &self.matcher
    }

    pub fn is_regex(&self) -> bool {
        matches!(self.matcher, Matcher::Pattern(_))
    }

    /// A missing or empty column never matches.
    pub fn check(&self, course: &Course) -> bool {
        let Some(value) = course.field(self.field) else {
            return false;
        };
        match &self.matcher {
            Matcher::Pattern(re) => re.is_match(value),
            Matcher::Exact(expected) => value == expected,
        }
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Condition", 3)?;
        state.serialize_field("field", self.field.name())?;
        state.serialize_field("matcher", self.matcher())?;
        state.serialize_field("regex", &self.is_regex())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> Course {
        Course::default().with(CourseField::EnglishTitle, title)
    }

    fn programming() -> Condition {
        Condition::pattern(CourseField::EnglishTitle, "Programming").unwrap()
    }

    #[test]
    fn test_pattern_matches_substring() {
        assert!(programming().check(&titled("Intro to Programming")));
    }

    #[test]
    fn test_pattern_mode_is_case_insensitive_regex() {
        let cond = programming();
        match cond.mode() {
            Matcher::Pattern(re) => assert!(re.is_match("PROGRAMMING")),
            other => panic!("expected pattern matcher, got {other:?}"),
        }
    }

    #[test]
    fn test_pattern_is_case_insensitive() {
        assert!(programming().check(&titled("programming basics")));
        assert!(programming().check(&titled("PROGRAMMING LANGUAGES")));
    }

    #[test]
    fn test_pattern_rejects_other_titles() {
        assert!(!programming().check(&titled("Mathematics")));
    }

    #[test]
    fn test_pattern_anchors_only_when_written() {
        let cond = Condition::pattern(CourseField::EnglishTitle, "gram").unwrap();
        assert!(cond.check(&titled("Programming")));

        let cond = Condition::pattern(CourseField::EnglishTitle, "^Intro").unwrap();
        assert!(cond.check(&titled("Intro to Programming")));
        assert!(!cond.check(&titled("An Intro to Programming")));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let course = Course::default().with(CourseField::ChineseTitle, "程式設計");
        assert!(!programming().check(&course));
        assert!(!Condition::pattern(CourseField::EnglishTitle, ".*")
            .unwrap()
            .check(&course));
        assert!(!Condition::exact(CourseField::EnglishTitle, "").check(&course));
    }

    #[test]
    fn test_empty_field_never_matches() {
        let course = titled("");
        assert!(!Condition::pattern(CourseField::EnglishTitle, "")
            .unwrap()
            .check(&course));
        assert!(!Condition::exact(CourseField::EnglishTitle, "").check(&course));
    }

    #[test]
    fn test_exact_is_case_sensitive_and_untrimmed() {
        let cond = Condition::exact(CourseField::EnglishTitle, "Calculus");
        assert!(cond.check(&titled("Calculus")));
        assert!(!cond.check(&titled("calculus")));
        assert!(!cond.check(&titled("Calculus ")));
        assert!(!cond.check(&titled("Calculus (I)")));
    }

    #[test]
    fn test_exact_mode_does_not_interpret_pattern() {
        let cond = Condition::new(CourseField::EnglishTitle, "C++", false).unwrap();
        assert!(!cond.is_regex());
        assert!(matches!(cond.mode(), Matcher::Exact(literal) if literal == "C++"));
        assert!(cond.check(&titled("C++")));
        assert!(!cond.check(&titled("C")));
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let err = Condition::new(CourseField::EnglishTitle, "Programming(", true).unwrap_err();
        assert!(matches!(err, ConditionError::Pattern(_)));
    }

    #[test]
    fn test_parse_by_feed_key() {
        let cond = Condition::parse("課程英文名稱", "Programming", true).unwrap();
        assert_eq!(cond.field(), CourseField::EnglishTitle);
        assert!(cond.check(&titled("Intro to Programming")));
    }

    #[test]
    fn test_parse_unknown_field() {
        let err = Condition::parse("title", "Programming", true).unwrap_err();
        assert!(matches!(err, ConditionError::UnknownField(_)));
    }

    #[test]
    fn test_serializes_for_logs() {
        let value = serde_json::to_value(programming()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "field": "english_title",
                "matcher": "Programming",
                "regex": true,
            })
        );
    }
}
