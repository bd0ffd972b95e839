use serde::{Deserialize, Serialize};

use super::{lenient_string, trimmed};
use crate::list::{Entity, SaveMode};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,
}

impl ClassEntity {
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.year)
    }
}

impl Entity for ClassEntity {
    type Lookups = ();

    const RESOURCE: &'static str = "classes";
    const DELETE_PROMPT: &'static str =
        "⚠️ Bạn có chắc chắn muốn xóa lớp học này?\n\nThao tác này không thể hoàn tác!";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn payload(&self) -> Self {
        Self {
            id: None,
            name: trimmed(&self.name),
            year: trimmed(&self.year),
        }
    }

    fn missing_required(&self, _mode: SaveMode) -> Option<&'static str> {
        if self.name.is_empty() {
            Some("name")
        } else if self.year.is_empty() {
            Some("year")
        } else {
            None
        }
    }

    fn search_fields(&self, _lookups: &()) -> Vec<String> {
        vec![self.name.clone(), self.year.clone()]
    }
}
