//! Calendar events.

use serde::{Deserialize, Serialize};

use crate::{Record, RecordId, Seeded};

pub const CATEGORIES: &[&str] = &["全部", "工作", "个人", "学习", "健康"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(collection = "u-calendar-data", categories = CATEGORIES)]
pub struct Event {
    pub id: RecordId,
    #[record(search)]
    pub title: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`, 24-hour.
    pub time: String,
    #[record(search)]
    pub description: String,
    pub category: String,
}

impl Event {
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            date: date.into(),
            time: time.into(),
            description: description.into(),
            category: category.into(),
        }
    }
}

impl Seeded for Event {
    fn defaults() -> Vec<Self> {
        let seed = [
            ("团队周会", "2024-03-11", "10:00", "同步本周进度", "工作"),
            ("牙医复诊", "2024-03-12", "15:30", "带上病历", "健康"),
            ("Rust 读书会", "2024-03-12", "19:00", "所有权与借用", "学习"),
            ("妈妈生日", "2024-03-16", "18:00", "订蛋糕", "个人"),
        ];
        seed.into_iter()
            .zip(1..)
            .map(|((title, date, time, description, category), id)| Event {
                id,
                ..Event::new(title, date, time, description, category)
            })
            .collect()
    }
}

/// Events on `date`, ordered by time of day.
pub fn events_on<'a>(items: impl IntoIterator<Item = &'a Event>, date: &str) -> Vec<&'a Event> {
    let mut events: Vec<&Event> = items.into_iter().filter(|e| e.date == date).collect();
    events.sort_by(|a, b| a.time.cmp(&b.time));
    events
}
