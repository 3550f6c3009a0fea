//! Task property schema.
//!
//! Every persisted task field maps to exactly one file inside its `Q<n>`
//! folder. [`TaskProperty`] enumerates the fields; [`PropertySchema`] binds
//! each one to a file name and is passed by value to the reader and the
//! planner so both agree on the layout.
//!
//! ```text
//! Q<n>/Problem.md        task_description
//! Q<n>/StarterCode.js    starter_code
//! Q<n>/SavedCode.js      saved_code      (absent => starter_code)
//! Q<n>/TestPrepend.js    test_prepend    (absent => "")
//! Q<n>/TestPostpend.js   test_postpend   (absent => "")
//! Q<n>/TestCases.json    test_cases      (absent => [])
//! ```

use std::fmt;

use crate::errors::CoreError;
use crate::json;
use crate::task::{TaskData, TestCase};

// ---------------------------------------------------------------------------
// TaskProperty
// ---------------------------------------------------------------------------

/// One persisted field of a [`TaskData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskProperty {
    TaskDescription,
    StarterCode,
    SavedCode,
    TestPrepend,
    TestPostpend,
    TestCases,
}

impl TaskProperty {
    /// Number of persisted task properties.
    pub const COUNT: usize = 6;

    /// All properties in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::TaskDescription,
        Self::StarterCode,
        Self::SavedCode,
        Self::TestPrepend,
        Self::TestPostpend,
        Self::TestCases,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskDescription => "taskDescription",
            Self::StarterCode => "starterCode",
            Self::SavedCode => "savedCode",
            Self::TestPrepend => "testPrepend",
            Self::TestPostpend => "testPostpend",
            Self::TestCases => "testCases",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// Borrow this property's value from `task`.
    #[must_use]
    pub fn get(self, task: &TaskData) -> PropertyRef<'_> {
        match self {
            Self::TaskDescription => PropertyRef::Text(&task.task_description),
            Self::StarterCode => PropertyRef::Text(&task.starter_code),
            Self::SavedCode => PropertyRef::Text(&task.saved_code),
            Self::TestPrepend => PropertyRef::Text(&task.test_prepend),
            Self::TestPostpend => PropertyRef::Text(&task.test_postpend),
            Self::TestCases => PropertyRef::TestCases(&task.test_cases),
        }
    }

    /// Store `value` into this property's field of `task`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the value's type does not match
    /// the property (text for a list property or vice versa).
    pub fn set(self, task: &mut TaskData, value: PropertyValue) -> Result<(), CoreError> {
        match (self, value) {
            (Self::TaskDescription, PropertyValue::Text(text)) => task.task_description = text,
            (Self::StarterCode, PropertyValue::Text(text)) => task.starter_code = text,
            (Self::SavedCode, PropertyValue::Text(text)) => task.saved_code = text,
            (Self::TestPrepend, PropertyValue::Text(text)) => task.test_prepend = text,
            (Self::TestPostpend, PropertyValue::Text(text)) => task.test_postpend = text,
            (Self::TestCases, PropertyValue::TestCases(cases)) => task.test_cases = cases,
            (property, value) => {
                return Err(CoreError::Validation(format!(
                    "cannot assign a {} value to {property}",
                    value.type_name()
                )));
            }
        }
        Ok(())
    }

    /// Whether `value` equals this property's default, in which case the
    /// file is not worth materializing when a task is created.
    #[must_use]
    pub fn is_default_value(self, value: PropertyRef<'_>) -> bool {
        match value {
            PropertyRef::Text(text) => text.is_empty(),
            PropertyRef::TestCases(cases) => cases.is_empty(),
        }
    }

    /// Decode file content into a value for this property.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] if a structured file does not parse.
    pub fn from_text(self, content: &str) -> Result<PropertyValue, CoreError> {
        match self {
            Self::TestCases => {
                if content.trim().is_empty() {
                    return Ok(PropertyValue::TestCases(Vec::new()));
                }
                let cases: Vec<TestCase> = serde_json::from_str(content)?;
                Ok(PropertyValue::TestCases(cases))
            }
            _ => Ok(PropertyValue::Text(content.to_string())),
        }
    }

    /// Encode a value as file content. Text is stored verbatim; test cases
    /// as JSON indented with four spaces.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] if serialization fails.
    pub fn to_text(self, value: PropertyRef<'_>) -> Result<String, CoreError> {
        match value {
            PropertyRef::Text(text) => Ok(text.to_string()),
            PropertyRef::TestCases(cases) => json::to_pretty_string(cases),
        }
    }
}

impl fmt::Display for TaskProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Borrowed view of a property value.
#[derive(Debug, Clone, Copy)]
pub enum PropertyRef<'a> {
    Text(&'a str),
    TestCases(&'a [TestCase]),
}

impl PropertyRef<'_> {
    /// Structural equality used for change detection.
    ///
    /// Text compares byte-for-byte. Test case lists compare element-wise over
    /// every field, in order. Values of different types are never equal.
    #[must_use]
    pub fn same_as(&self, other: &PropertyRef<'_>) -> bool {
        match (self, other) {
            (PropertyRef::Text(a), PropertyRef::Text(b)) => text_equal(a, b),
            (PropertyRef::TestCases(a), PropertyRef::TestCases(b)) => test_cases_equal(a, b),
            _ => false,
        }
    }
}

/// Owned property value produced by decoding a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    TestCases(Vec<TestCase>),
}

impl PropertyValue {
    #[must_use]
    pub fn as_property_ref(&self) -> PropertyRef<'_> {
        match self {
            Self::Text(text) => PropertyRef::Text(text),
            Self::TestCases(cases) => PropertyRef::TestCases(cases),
        }
    }

    const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::TestCases(_) => "test case list",
        }
    }
}

fn text_equal(a: &str, b: &str) -> bool {
    a == b
}

fn test_cases_equal(a: &[TestCase], b: &[TestCase]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.answer == y.answer && x.program == y.program && x.score == y.score && x.kind == y.kind
        })
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A property bound to its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub property: TaskProperty,
    pub file_name: &'static str,
}

/// Immutable table binding every [`TaskProperty`] to a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySchema {
    file_names: [&'static str; TaskProperty::COUNT],
}

impl Default for PropertySchema {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl PropertySchema {
    /// The layout used by mission repositories.
    pub const STANDARD: Self = Self {
        file_names: [
            "Problem.md",
            "StarterCode.js",
            "SavedCode.js",
            "TestPrepend.js",
            "TestPostpend.js",
            "TestCases.json",
        ],
    };

    #[must_use]
    pub const fn descriptor(&self, property: TaskProperty) -> PropertyDescriptor {
        PropertyDescriptor {
            property,
            file_name: self.file_names[property.index()],
        }
    }

    #[must_use]
    pub const fn file_name(&self, property: TaskProperty) -> &'static str {
        self.file_names[property.index()]
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = PropertyDescriptor> + '_ {
        TaskProperty::ALL
            .into_iter()
            .map(|property| self.descriptor(property))
    }

    /// Look up the property persisted under `file_name`.
    #[must_use]
    pub fn property_for_file(&self, file_name: &str) -> Option<TaskProperty> {
        self.iter()
            .find(|descriptor| descriptor.file_name == file_name)
            .map(|descriptor| descriptor.property)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::task::TestcaseKind;

    #[test]
    fn file_names_are_unique() {
        let schema = PropertySchema::STANDARD;
        let names: HashSet<&str> = schema.iter().map(|d| d.file_name).collect();
        assert_eq!(names.len(), TaskProperty::COUNT);
    }

    #[rstest]
    #[case("Problem.md", TaskProperty::TaskDescription)]
    #[case("StarterCode.js", TaskProperty::StarterCode)]
    #[case("SavedCode.js", TaskProperty::SavedCode)]
    #[case("TestPrepend.js", TaskProperty::TestPrepend)]
    #[case("TestPostpend.js", TaskProperty::TestPostpend)]
    #[case("TestCases.json", TaskProperty::TestCases)]
    fn resolves_property_from_file_name(#[case] file: &str, #[case] expected: TaskProperty) {
        assert_eq!(
            PropertySchema::STANDARD.property_for_file(file),
            Some(expected)
        );
    }

    #[test]
    fn unknown_file_has_no_property() {
        assert_eq!(PropertySchema::STANDARD.property_for_file("notes.txt"), None);
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let order: Vec<TaskProperty> = PropertySchema::STANDARD
            .iter()
            .map(|d| d.property)
            .collect();
        assert_eq!(order, TaskProperty::ALL.to_vec());
    }

    #[test]
    fn get_and_set_cover_every_property() {
        let mut task = TaskData::new(1);
        for property in TaskProperty::ALL {
            let value = match property {
                TaskProperty::TestCases => PropertyValue::TestCases(vec![TestCase::default()]),
                other => PropertyValue::Text(format!("{other} text")),
            };
            property.set(&mut task, value.clone()).unwrap();
            assert!(property.get(&task).same_as(&value.as_property_ref()), "{property}");
        }
        assert_eq!(task.saved_code, "savedCode text");
    }

    #[test]
    fn set_rejects_mismatched_value() {
        let mut task = TaskData::new(1);
        let err = TaskProperty::TestCases
            .set(&mut task, PropertyValue::Text("[]".into()))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn defaults_are_empty_values() {
        let task = TaskData::new(1);
        for property in TaskProperty::ALL {
            assert!(property.is_default_value(property.get(&task)));
        }
        assert!(!TaskProperty::TestPrepend.is_default_value(PropertyRef::Text("x")));
    }

    #[test]
    fn test_cases_pretty_print_with_four_spaces() {
        let cases = vec![TestCase {
            answer: "2".into(),
            program: "inc(1);".into(),
            score: Some(1_i64.into()),
            kind: TestcaseKind::Public,
        }];
        let text = TaskProperty::TestCases
            .to_text(PropertyRef::TestCases(&cases))
            .unwrap();
        assert_eq!(
            text,
            "[\n    {\n        \"answer\": \"2\",\n        \"program\": \"inc(1);\",\n        \"score\": 1\n    }\n]"
        );

        let decoded = TaskProperty::TestCases.from_text(&text).unwrap();
        assert_eq!(decoded, PropertyValue::TestCases(cases));
    }

    #[test]
    fn fractional_score_does_not_discard_test_cases() {
        let text = r#"[{"answer": "1", "program": "half();", "score": 0.5}, {"answer": "2", "program": "full();"}]"#;
        let PropertyValue::TestCases(cases) = TaskProperty::TestCases.from_text(text).unwrap() else {
            panic!("expected test cases");
        };
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].score, serde_json::Number::from_f64(0.5));
        assert_eq!(cases[1].score, None);
    }

    #[test]
    fn blank_test_case_file_is_an_empty_list() {
        let decoded = TaskProperty::TestCases.from_text("  \n").unwrap();
        assert_eq!(decoded, PropertyValue::TestCases(Vec::new()));
    }

    #[test]
    fn malformed_test_cases_are_an_error() {
        let err = TaskProperty::TestCases.from_text("[{").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn text_is_identity() {
        let text = "function f() {\r\n  return 1;\r\n}";
        let decoded = TaskProperty::StarterCode.from_text(text).unwrap();
        assert_eq!(decoded, PropertyValue::Text(text.to_string()));
        assert_eq!(
            TaskProperty::StarterCode
                .to_text(decoded.as_property_ref())
                .unwrap(),
            text
        );
    }

    #[test]
    fn equality_is_structural_over_test_case_fields() {
        let base = TestCase {
            answer: "1".into(),
            program: "p".into(),
            score: None,
            kind: TestcaseKind::Public,
        };
        let mut scored = base.clone();
        scored.score = Some(0_i64.into());
        let mut secret = base.clone();
        secret.kind = TestcaseKind::Secret;

        let a = [base.clone()];
        assert!(PropertyRef::TestCases(&a).same_as(&PropertyRef::TestCases(&[base])));
        assert!(!PropertyRef::TestCases(&a).same_as(&PropertyRef::TestCases(&[scored])));
        assert!(!PropertyRef::TestCases(&a).same_as(&PropertyRef::TestCases(&[secret])));
        assert!(!PropertyRef::TestCases(&[]).same_as(&PropertyRef::Text("")));
    }
}
