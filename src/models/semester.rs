use serde::{Deserialize, Serialize};

use super::{lenient_string, trimmed};
use crate::list::{Entity, SaveMode};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub semester: String,
}

impl Entity for Semester {
    type Lookups = ();

    const RESOURCE: &'static str = "semesters";
    const DELETE_PROMPT: &'static str =
        "⚠️ Bạn có chắc chắn muốn xóa học kỳ này?\n\nThao tác này không thể hoàn tác!";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn payload(&self) -> Self {
        Self {
            id: None,
            semester: trimmed(&self.semester),
        }
    }

    fn missing_required(&self, _mode: SaveMode) -> Option<&'static str> {
        self.semester.is_empty().then_some("semester")
    }

    fn search_fields(&self, _lookups: &()) -> Vec<String> {
        vec![self.semester.clone()]
    }
}

/// Semester as listed by the portal endpoints, with a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterInfo {
    pub id: i64,
    pub semester: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SemesterInfo {
    pub fn display(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.semester)
    }

    /// Offered when the semester list cannot be fetched.
    pub fn fallback() -> Vec<SemesterInfo> {
        [
            (1, "2024-2", "Học kỳ 2 (2024-2025)"),
            (2, "2024-1", "Học kỳ 1 (2024-2025)"),
            (3, "2024-3", "Học kỳ hè (2024-2025)"),
        ]
        .into_iter()
        .map(|(id, semester, display)| SemesterInfo {
            id,
            semester: semester.to_string(),
            display_name: Some(display.to_string()),
        })
        .collect()
    }
}
