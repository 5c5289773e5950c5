//! Bookmarks (saved links).

use serde::{Deserialize, Serialize};

use crate::{Record, RecordId, Seeded};

pub const CATEGORIES: &[&str] = &["全部", "工作", "学习", "娱乐", "其他"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(collection = "u-links-data", categories = CATEGORIES)]
pub struct Bookmark {
    pub id: RecordId,
    #[record(search)]
    pub name: String,
    #[record(search)]
    pub url: String,
    pub description: String,
    pub category: String,
}

impl Bookmark {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            url: url.into(),
            description: description.into(),
            category: category.into(),
        }
    }
}

impl Seeded for Bookmark {
    fn defaults() -> Vec<Self> {
        let seed = [
            ("Team wiki", "https://wiki.example.com/team", "团队文档", "工作"),
            ("Rust 程序设计语言", "https://doc.rust-lang.org/book/", "官方教程", "学习"),
            ("Standup board", "https://board.example.com/TEAM-daily", "每日站会", "工作"),
            ("Bilibili", "https://www.bilibili.com", "视频", "娱乐"),
            ("天气", "https://weather.example.com", "出门前看看", "其他"),
        ];
        seed.into_iter()
            .zip(1..)
            .map(|((name, url, description, category), id)| Bookmark {
                id,
                ..Bookmark::new(name, url, description, category)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::CategoryCounts;
    use crate::{InMemoryStorage, StorageExt};

    #[test]
    fn description_is_not_searched() {
        let mut store = InMemoryStorage::new().collection::<Bookmark>().unwrap();
        store.set_search("官方教程");
        assert!(store.visible().is_empty());
    }

    #[test]
    fn counts_per_category() {
        let store = InMemoryStorage::new().collection::<Bookmark>().unwrap();
        let counts: CategoryCounts = store.aggregate();
        assert_eq!(counts.0, vec![("工作", 2), ("学习", 1), ("娱乐", 1), ("其他", 1)]);
    }
}
