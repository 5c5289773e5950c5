//! Image gallery with likes.

use serde::{Deserialize, Serialize};

use crate::aggregate::{count_where, Aggregate};
use crate::{Record, RecordId, Seeded};

pub const CATEGORIES: &[&str] = &["全部", "风景", "人物", "建筑", "艺术"];

/// Wire name of the like flag.
pub const LIKED: &str = "liked";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(collection = "u-images-data", categories = CATEGORIES)]
pub struct Image {
    pub id: RecordId,
    #[record(search)]
    pub title: String,
    #[record(search)]
    pub description: String,
    pub date: String,
    pub liked: bool,
    pub category: String,
}

impl Image {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            date: date.into(),
            liked: false,
            category: category.into(),
        }
    }
}

impl Seeded for Image {
    fn defaults() -> Vec<Self> {
        let seed = [
            ("黄山日出", "云海之上的第一缕光", "2024-01-15", true, "风景"),
            ("街头肖像", "老城区的修鞋匠", "2024-02-03", false, "人物"),
            ("外滩夜景", "黄浦江畔的万国建筑", "2024-02-20", true, "建筑"),
            ("水墨练习", "临摹齐白石的虾", "2024-03-01", false, "艺术"),
        ];
        seed.into_iter()
            .zip(1..)
            .map(|((title, description, date, liked, category), id)| Image {
                id,
                liked,
                ..Image::new(title, description, date, category)
            })
            .collect()
    }
}

/// Number of liked images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Likes(pub usize);

impl Aggregate<Image> for Likes {
    fn compute<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Image>,
    {
        Likes(count_where(items, |image| image.liked))
    }
}
