//! Selector snapshots: the identifying attributes captured for an element.
//!
//! Two snapshots exist per element. The "base" is recorded with the step; a
//! "compare" snapshot is read live for each candidate during replay. Neither
//! is mutated after capture.

use serde::{Deserialize, Serialize};

/// Identifying DOM attributes of one element at a point in time. Every field
/// is independently optional; an attribute the recorder could not read is
/// simply absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_text: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
}

impl ElementSelector {
    /// Number of attributes that were actually recorded.
    pub fn recorded_attribute_count(&self) -> usize {
        let scalars = [
            &self.href,
            &self.id,
            &self.input_type,
            &self.name,
            &self.placeholder,
            &self.tag_name,
            &self.text_content,
        ];
        let arrays = [&self.class_list, &self.labels, &self.parent_text];

        scalars.iter().filter(|v| v.is_some()).count()
            + arrays.iter().filter(|v| v.is_some()).count()
    }

    /// True when no attribute was recorded at all. Such a selector carries no
    /// identity and cannot be re-located.
    pub fn is_empty(&self) -> bool {
        self.recorded_attribute_count() == 0
    }
}
