//! Bookshelf: books with a reading status and a 0-5 star rating.

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;
use crate::{Record, RecordId, Seeded};

pub const CATEGORIES: &[&str] = &["全部", "文学", "科技", "历史", "哲学"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[serde(rename = "未开始")]
    NotStarted,
    #[serde(rename = "阅读中")]
    Reading,
    #[serde(rename = "已读完")]
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(collection = "ubookshelf-data", categories = CATEGORIES)]
pub struct Book {
    pub id: RecordId,
    #[record(search)]
    pub title: String,
    #[record(search)]
    pub author: String,
    pub rating: u8,
    pub status: ReadingStatus,
    pub category: String,
}

impl Book {
    /// Ratings above five stars are capped.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        rating: u8,
        status: ReadingStatus,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            author: author.into(),
            rating: rating.min(5),
            status,
            category: category.into(),
        }
    }
}

impl Seeded for Book {
    fn defaults() -> Vec<Self> {
        let seed = [
            ("红楼梦", "曹雪芹", 5, ReadingStatus::Finished, "文学"),
            ("三体", "刘慈欣", 5, ReadingStatus::Reading, "科技"),
            ("人类简史", "尤瓦尔·赫拉利", 4, ReadingStatus::NotStarted, "历史"),
            ("苏菲的世界", "乔斯坦·贾德", 4, ReadingStatus::Finished, "哲学"),
        ];
        seed.into_iter()
            .zip(1..)
            .map(|((title, author, rating, status, category), id)| Book {
                id,
                ..Book::new(title, author, rating, status, category)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShelfSummary {
    pub not_started: usize,
    pub reading: usize,
    pub finished: usize,
    /// None for an empty shelf.
    pub average_rating: Option<f64>,
}

impl Aggregate<Book> for ShelfSummary {
    fn compute<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Book>,
    {
        let mut summary = ShelfSummary::default();
        let mut rated = 0u32;
        let mut total = 0u32;
        for book in items {
            match book.status {
                ReadingStatus::NotStarted => summary.not_started += 1,
                ReadingStatus::Reading => summary.reading += 1,
                ReadingStatus::Finished => summary.finished += 1,
            }
            rated += 1;
            total += u32::from(book.rating);
        }
        if rated > 0 {
            summary.average_rating = Some(f64::from(total) / f64::from(rated));
        }
        summary
    }
}
