use serde::{Deserialize, Serialize};

use crate::{Fields, Id};

/// Keys of a class record owned by the store at creation.
pub const CLASS_RESERVED: [&str; 3] = ["id", "enrolled", "active"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymClass {
    pub id: Id,
    pub enrolled: u32,
    pub active: bool,
    #[serde(flatten)]
    pub fields: Fields,
}

impl GymClass {
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }
}

#[derive(Debug, Default, Clone)]
pub struct ClassFilter {
    pub active: Option<bool>,
    pub search: Option<String>,
}

impl ClassFilter {
    pub fn accepts(&self, class: &GymClass) -> bool {
        if let Some(active) = self.active {
            if class.active != active {
                return false;
            }
        }
        match &self.search {
            Some(term) => crate::fields_contain(&class.fields, term),
            None => true,
        }
    }
}
