//! # cq-core — course records and the filtering model
//!
//! Decodes entries of the NTHU open course-data feed into [`Course`] and
//! selects subsets of them with [`Condition`]s combined in a [`Filter`].
//!
//! ```
//! use cq_core::{Condition, Course, CourseField, Filter};
//!
//! let courses: Vec<Course> =
//!     serde_json::from_str(r#"[{"課程英文名稱": "Intro to Programming"}, {"課程英文名稱": "Calculus"}]"#)
//!         .unwrap();
//! let filter = Filter::single(Condition::pattern(CourseField::EnglishTitle, "programming").unwrap());
//! assert_eq!(filter.apply(&courses).len(), 1);
//! ```

pub mod condition;
pub mod course;
pub mod filter;

mod error;

pub use condition::{Condition, Matcher};
pub use course::{Course, CourseField, Session, Teacher};
pub use error::ConditionError;
pub use filter::{filter_courses, Filter};
