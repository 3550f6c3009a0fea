//! Multiple-choice questions embedded in a task description.
//!
//! A description is a question when its first three characters are `MCQ`
//! (any case). The rest of the text is a JSON document:
//!
//! ```text
//! MCQ
//! {
//!     "choices": [{ "option": "...", "hint": "..." }],
//!     "answer": 0,
//!     "solution": 1
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::json;

/// Reserved tag marking a description as a multiple-choice question.
pub const MCQ_TAG: &str = "MCQ";

/// One selectable option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqChoice {
    #[serde(rename = "option")]
    pub content: String,
    #[serde(default)]
    pub hint: String,
}

/// Structured view of a task description that follows the MCQ convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqQuestion {
    #[serde(default)]
    pub choices: Vec<McqChoice>,
    /// Index of the choice picked by the student.
    #[serde(default)]
    pub answer: i64,
    /// Index of the correct choice; `-1` when not set.
    #[serde(default = "unset_solution")]
    pub solution: i64,
}

const fn unset_solution() -> i64 {
    -1
}

impl Default for McqQuestion {
    fn default() -> Self {
        Self {
            choices: Vec::new(),
            answer: 0,
            solution: unset_solution(),
        }
    }
}

/// Whether `text` starts with the MCQ tag, ignoring case.
#[must_use]
pub fn has_mcq_tag(text: &str) -> bool {
    text.get(..MCQ_TAG.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(MCQ_TAG))
}

/// Decode a task description as a multiple-choice question.
///
/// Returns `None` when the tag is missing or the JSON after it is malformed;
/// a broken question is treated as ordinary text rather than an error.
#[must_use]
pub fn try_decode(text: &str) -> Option<McqQuestion> {
    if !has_mcq_tag(text) {
        return None;
    }
    match serde_json::from_str::<McqQuestion>(&text[MCQ_TAG.len()..]) {
        Ok(question) => Some(question),
        Err(e) => {
            tracing::debug!(%e, "MCQ tag present but body is not valid JSON");
            None
        }
    }
}

/// Decode with the `(is_mcq, question)` shape used by editors: a failed
/// decode yields `false` and an empty stub question.
#[must_use]
pub fn decode_or_stub(text: &str) -> (bool, McqQuestion) {
    try_decode(text).map_or_else(|| (false, McqQuestion::default()), |q| (true, q))
}

/// Encode a question as task description text.
///
/// # Errors
///
/// Returns [`CoreError::Json`] if serialization fails.
pub fn encode(question: &McqQuestion) -> Result<String, CoreError> {
    Ok(format!("{MCQ_TAG}\n{}", json::to_pretty_string(question)?))
}
