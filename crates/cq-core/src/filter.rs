//! # Filter Pipeline
//!
//! Applies a conjunction of [`Condition`]s to a slice of courses. The result
//! borrows from the input, keeps its order and never modifies it.

use crate::condition::Condition;
use crate::course::Course;

/// All conditions must hold for a course to pass.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    pub fn single(condition: Condition) -> Self {
        Self::new(vec![condition])
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// An empty filter matches every course.
    pub fn matches(&self, course: &Course) -> bool {
        self.conditions.iter().all(|cond| cond.check(course))
    }

    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        courses.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Courses satisfying `condition`, in input order.
pub fn filter_courses<'a>(courses: &'a [Course], condition: &Condition) -> Vec<&'a Course> {
    courses.iter().filter(|c| condition.check(c)).collect()
}
