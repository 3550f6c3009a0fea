//! Per-task data.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Visibility class of a test case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestcaseKind {
    #[default]
    Public,
    Opaque,
    Secret,
}

impl TestcaseKind {
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

/// One entry of `TestCases.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub program: String,
    /// Integer or fractional points awarded for passing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Number>,
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "TestcaseKind::is_public"
    )]
    pub kind: TestcaseKind,
}

/// A single numbered task (`Q<n>` folder).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskData {
    /// 1-based, contiguous across the mission.
    pub question_number: usize,
    pub task_description: String,
    pub starter_code: String,
    pub saved_code: String,
    pub test_prepend: String,
    pub test_postpend: String,
    pub test_cases: Vec<TestCase>,
}

impl TaskData {
    /// An empty task with the given question number.
    #[must_use]
    pub fn new(question_number: usize) -> Self {
        Self {
            question_number,
            ..Self::default()
        }
    }
}
