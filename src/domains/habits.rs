//! Habit tracker. Ticking a habit off for today extends its streak;
//! unticking takes the day back.

use serde::{Deserialize, Serialize};

use crate::aggregate::{count_where, Aggregate};
use crate::{Record, RecordId, Seeded};

pub const CATEGORIES: &[&str] = &["全部", "健康", "学习", "工作", "生活"];

/// Wire name of the daily completion flag.
pub const COMPLETED_TODAY: &str = "completedToday";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: RecordId,
    pub name: String,
    /// Free-text goal, e.g. "每天 30 分钟".
    pub target: String,
    pub streak: u32,
    pub completed_today: bool,
    pub category: String,
}

impl Habit {
    pub fn new(
        name: impl Into<String>,
        target: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            target: target.into(),
            streak: 0,
            completed_today: false,
            category: category.into(),
        }
    }
}

// Implemented by hand for the streak coupling in `on_toggle`.
impl Record for Habit {
    const COLLECTION: &'static str = "u-habits-data";
    const CATEGORIES: &'static [&'static str] = CATEGORIES;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.target.as_str()]
    }

    fn on_toggle(&mut self, field: &str, now: bool) {
        if field != COMPLETED_TODAY {
            return;
        }
        self.streak = if now {
            self.streak.saturating_add(1)
        } else {
            self.streak.saturating_sub(1)
        };
    }
}

impl Seeded for Habit {
    fn defaults() -> Vec<Self> {
        let seed = [
            ("晨跑", "每天 3 公里", 12, true, "健康"),
            ("背单词", "每天 50 个", 5, false, "学习"),
            ("整理收件箱", "下班前清空", 0, false, "工作"),
            ("早睡", "23:00 前入睡", 3, false, "生活"),
        ];
        seed.into_iter()
            .zip(1..)
            .map(|((name, target, streak, completed_today, category), id)| Habit {
                id,
                streak,
                completed_today,
                ..Habit::new(name, target, category)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HabitSummary {
    pub total: usize,
    pub completed_today: usize,
    pub best_streak: u32,
}

impl Aggregate<Habit> for HabitSummary {
    fn compute<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Habit>,
    {
        let items: Vec<&Habit> = items.into_iter().collect();
        HabitSummary {
            total: items.len(),
            completed_today: count_where(items.iter().copied(), |h| h.completed_today),
            best_streak: items.iter().map(|h| h.streak).max().unwrap_or(0),
        }
    }
}
