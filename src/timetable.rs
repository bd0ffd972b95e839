//! Projection of free-form (day, period) schedule strings onto a weekly
//! grid: 7 day columns, 10 period rows.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::{ScheduleItem, TeacherScheduleInfo};

pub const FIRST_PERIOD: u32 = 1;
pub const LAST_PERIOD: u32 = 10;

pub const PALETTE: [&str; 7] = [
    "#ff6b35", "#3182ce", "#38a169", "#805ad5", "#319795", "#d53f8c", "#ecc94b",
];

pub const UNASSIGNED_ROOM: &str = "Chưa xác định";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub label: &'static str,
    pub value: &'static str,
    pub index: u8,
}

pub const DAYS: [DayColumn; 7] = [
    DayColumn { label: "Thứ 2", value: "Monday", index: 1 },
    DayColumn { label: "Thứ 3", value: "Tuesday", index: 2 },
    DayColumn { label: "Thứ 4", value: "Wednesday", index: 3 },
    DayColumn { label: "Thứ 5", value: "Thursday", index: 4 },
    DayColumn { label: "Thứ 6", value: "Friday", index: 5 },
    DayColumn { label: "Thứ 7", value: "Saturday", index: 6 },
    DayColumn { label: "Chủ nhật", value: "Sunday", index: 7 },
];

pub const PERIODS: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

const START_TIMES: [&str; 10] = [
    "07:00", "07:50", "08:40", "09:45", "10:35", "11:25", "13:00", "13:50", "14:40", "15:45",
];
const END_TIMES: [&str; 10] = [
    "07:45", "08:35", "09:25", "10:30", "11:20", "12:10", "13:45", "14:35", "15:25", "16:30",
];

static RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)").expect("valid regex"));

/// Inclusive period range, both ends within `FIRST_PERIOD..=LAST_PERIOD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodRange {
    pub start: u32,
    pub end: u32,
}

impl Default for PeriodRange {
    fn default() -> Self {
        Self { start: FIRST_PERIOD, end: FIRST_PERIOD }
    }
}

/// A block on the weekly grid. `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridEvent {
    pub day: u8,
    pub start: u32,
    pub end: u32,
    pub title: String,
    pub subtitle: Option<String>,
    pub lecturer: Option<String>,
    pub room: String,
    pub credit: Option<u32>,
    pub color: &'static str,
}

/// Anything that occupies a slot on the timetable.
pub trait ScheduleEntry {
    fn course_code(&self) -> &str;
    fn course_name(&self) -> &str;
    fn period(&self) -> &str;
    fn day_of_week(&self) -> &str;
    fn room(&self) -> String;

    fn subtitle(&self) -> Option<String> {
        None
    }

    fn lecturer(&self) -> Option<String> {
        None
    }

    fn credit(&self) -> Option<u32> {
        None
    }
}

/// Clamps a run of ASCII digits into the period range; runs too long for
/// `u64` count as past the last period.
fn clamp_digits(digits: &str) -> u32 {
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    value.clamp(FIRST_PERIOD as u64, LAST_PERIOD as u64) as u32
}

pub fn parse_period(text: &str) -> PeriodRange {
    let text = text.trim();
    if let Some(caps) = RANGE.captures(text) {
        let start = clamp_digits(&caps[1]);
        let end = clamp_digits(&caps[2]).max(start);
        return PeriodRange { start, end };
    }
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        let period = clamp_digits(text);
        return PeriodRange { start: period, end: period };
    }
    PeriodRange::default()
}

/// Column for a day name, English or Vietnamese. Unknown names land on Monday.
pub fn day_to_index(text: &str) -> u8 {
    let text = text.trim();
    DAYS.iter()
        .find(|day| day.value == text || day.label == text)
        .map(|day| day.index)
        .unwrap_or(1)
}

/// Clock label for the start (or end) of a period, `None` outside 1..=10.
pub fn period_time(period: u32, is_end: bool) -> Option<&'static str> {
    let idx = period.checked_sub(1)? as usize;
    let table = if is_end { &END_TIMES } else { &START_TIMES };
    table.get(idx).copied()
}

pub fn to_events<T: ScheduleEntry>(items: &[T]) -> Vec<GridEvent> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let range = parse_period(item.period());
            GridEvent {
                day: day_to_index(item.day_of_week()),
                start: range.start,
                end: range.end + 1,
                title: format!("{} - {}", item.course_code(), item.course_name()),
                subtitle: item.subtitle(),
                lecturer: item.lecturer(),
                room: item.room(),
                credit: item.credit(),
                color: PALETTE[i % PALETTE.len()],
            }
        })
        .collect()
}

impl ScheduleEntry for ScheduleItem {
    fn course_code(&self) -> &str {
        &self.course_code
    }

    fn course_name(&self) -> &str {
        &self.course_name
    }

    fn period(&self) -> &str {
        self.period.as_deref().unwrap_or_default()
    }

    fn day_of_week(&self) -> &str {
        self.day_of_week.as_deref().unwrap_or_default()
    }

    fn room(&self) -> String {
        [&self.classroom, &self.room]
            .into_iter()
            .flatten()
            .find(|r| !r.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| UNASSIGNED_ROOM.to_string())
    }

    fn lecturer(&self) -> Option<String> {
        self.lecturer_name.clone()
    }

    fn credit(&self) -> Option<u32> {
        Some(self.credit)
    }
}

impl ScheduleEntry for TeacherScheduleInfo {
    fn course_code(&self) -> &str {
        &self.course_code
    }

    fn course_name(&self) -> &str {
        &self.course_name
    }

    fn period(&self) -> &str {
        &self.period
    }

    fn day_of_week(&self) -> &str {
        &self.day_of_week
    }

    fn room(&self) -> String {
        self.classroom.clone()
    }

    fn subtitle(&self) -> Option<String> {
        self.students.first().map(|s| s.class_name.clone())
    }
}
