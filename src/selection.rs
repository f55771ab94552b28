use crate::catalog::{format_label, Weight, DEFAULT_FAMILY, DEFAULT_WEIGHT};
use serde::Serialize;

/// The user's current choice of sample text, family, weight and style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub text: String,
    pub font_family: String,
    pub font_weight: Weight,
    pub is_italic: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            text: String::new(),
            font_family: DEFAULT_FAMILY.to_string(),
            font_weight: DEFAULT_WEIGHT,
            is_italic: false,
        }
    }
}

impl Selection {
    /// Variant label of the selected weight/style, e.g. `"700italic"`.
    pub fn label(&self) -> String {
        format_label(self.font_weight, self.is_italic)
    }
}
