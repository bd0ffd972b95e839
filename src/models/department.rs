use serde::{Deserialize, Serialize};

use super::{lenient_string, trimmed};
use crate::list::{Entity, SaveMode};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
}

impl Department {
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

impl Entity for Department {
    type Lookups = ();

    const RESOURCE: &'static str = "departments";
    const DELETE_PROMPT: &'static str = "⚠️ Bạn có chắc chắn muốn xóa khoa này?";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn payload(&self) -> Self {
        Self {
            id: None,
            name: trimmed(&self.name),
            code: trimmed(&self.code),
        }
    }

    fn missing_required(&self, _mode: SaveMode) -> Option<&'static str> {
        if self.name.is_empty() {
            Some("name")
        } else if self.code.is_empty() {
            Some("code")
        } else {
            None
        }
    }

    fn search_fields(&self, _lookups: &()) -> Vec<String> {
        vec![self.name.clone(), self.code.clone()]
    }
}
