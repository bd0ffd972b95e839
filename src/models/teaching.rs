use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ClassEntity, Course, LecturerDetails, lenient_string, trimmed};
use crate::api::ApiClient;
use crate::list::{Entity, Lookups, SaveMode, id_set, refresh_list, resolve_label};

/// Assignment of a lecturer to teach a course for a class in a time slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teaching {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub lecturer_id: Option<i64>,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub period: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub day_of_week: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_room: String,
}

#[derive(Debug, Clone, Default)]
pub struct TeachingLookups {
    pub lecturers: Vec<LecturerDetails>,
    pub courses: Vec<Course>,
    pub classes: Vec<ClassEntity>,
}

impl TeachingLookups {
    pub fn lecturer_name(&self, lecturer_id: Option<i64>) -> String {
        resolve_label(lecturer_id, &self.lecturers, |l| Some(l.id), LecturerDetails::label)
    }

    pub fn course_name(&self, course_id: Option<i64>) -> String {
        resolve_label(course_id, &self.courses, |c| Some(c.id), Course::label)
    }

    pub fn class_name(&self, class_id: Option<i64>) -> String {
        resolve_label(class_id, &self.classes, |c| c.id, ClassEntity::label)
    }
}

#[async_trait]
impl Lookups for TeachingLookups {
    async fn refresh(&self, api: &dyn ApiClient) -> Self {
        Self {
            lecturers: refresh_list(api, "lecturers/with-details", &self.lecturers).await,
            courses: refresh_list(api, "courses", &self.courses).await,
            classes: refresh_list(api, "classes", &self.classes).await,
        }
    }
}

impl Entity for Teaching {
    type Lookups = TeachingLookups;

    const RESOURCE: &'static str = "teachings";
    const DELETE_PROMPT: &'static str =
        "⚠️ Bạn có chắc chắn muốn xóa phân công giảng dạy này?\n\nThao tác này không thể hoàn tác!";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn payload(&self) -> Self {
        Self {
            id: None,
            lecturer_id: id_set(self.lecturer_id),
            course_id: id_set(self.course_id),
            class_id: id_set(self.class_id),
            period: trimmed(&self.period),
            day_of_week: trimmed(&self.day_of_week),
            class_room: trimmed(&self.class_room),
        }
    }

    fn missing_required(&self, _mode: SaveMode) -> Option<&'static str> {
        if self.lecturer_id.is_none() {
            Some("lecturerId")
        } else if self.course_id.is_none() {
            Some("courseId")
        } else if self.class_id.is_none() {
            Some("classId")
        } else {
            None
        }
    }

    fn search_fields(&self, lookups: &TeachingLookups) -> Vec<String> {
        vec![
            lookups.lecturer_name(self.lecturer_id),
            lookups.course_name(self.course_id),
            self.period.clone(),
            self.day_of_week.clone(),
            self.class_room.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::filter_records;

    fn lookups() -> TeachingLookups {
        TeachingLookups {
            lecturers: vec![
                LecturerDetails {
                    id: 1,
                    lecturer_code: "GV01".to_string(),
                    full_name: Some("Trần Thị C".to_string()),
                    ..LecturerDetails::default()
                },
                LecturerDetails {
                    id: 2,
                    lecturer_code: "GV02".to_string(),
                    full_name: None,
                    ..LecturerDetails::default()
                },
            ],
            courses: vec![Course {
                id: 7,
                course_code: "MATH201".to_string(),
                name: "Toán cao cấp".to_string(),
            }],
            classes: vec![],
        }
    }

    #[test]
    fn lecturer_label_falls_back_to_code() {
        let l = lookups();
        assert_eq!(l.lecturer_name(Some(1)), "Trần Thị C");
        assert_eq!(l.lecturer_name(Some(2)), "GV02");
        assert_eq!(l.class_name(Some(1)), "Unknown");
    }

    #[test]
    fn joined_course_name_is_searchable() {
        let l = lookups();
        let rows = vec![
            Teaching {
                id: Some(1),
                lecturer_id: Some(2),
                course_id: Some(7),
                class_id: Some(1),
                period: "4-6".to_string(),
                day_of_week: "Thứ 3".to_string(),
                class_room: "B202".to_string(),
            },
            Teaching {
                id: Some(2),
                lecturer_id: Some(1),
                course_id: None,
                class_id: Some(1),
                ..Teaching::default()
            },
        ];

        let hits = filter_records(&rows, "toán CAO", |t| t.search_fields(&l));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, Some(1));

        let hits = filter_records(&rows, "trần", |t| t.search_fields(&l));
        assert_eq!(hits.iter().map(|t| t.id).collect::<Vec<_>>(), vec![Some(2)]);
    }

    #[test]
    fn all_three_keys_are_required() {
        let draft = Teaching {
            lecturer_id: Some(1),
            course_id: Some(7),
            class_id: Some(0),
            ..Teaching::default()
        };
        assert_eq!(draft.payload().missing_required(SaveMode::Create), Some("classId"));
    }
}
