//! File catalogue entries. Only metadata is stored, never file contents.

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;
use crate::{Record, RecordId, Seeded};

pub const CATEGORIES: &[&str] = &["全部", "文档", "图片", "视频", "其他"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(collection = "u-files-data", categories = CATEGORIES)]
pub struct FileEntry {
    pub id: RecordId,
    #[record(search)]
    pub name: String,
    /// File extension or MIME-ish label, e.g. `pdf`.
    #[serde(rename = "type")]
    pub file_type: String,
    /// Size in bytes.
    pub size: u64,
    pub date: String,
    pub category: String,
}

impl FileEntry {
    pub fn new(
        name: impl Into<String>,
        file_type: impl Into<String>,
        size: u64,
        date: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            file_type: file_type.into(),
            size,
            date: date.into(),
            category: category.into(),
        }
    }
}

impl Seeded for FileEntry {
    fn defaults() -> Vec<Self> {
        let seed = [
            ("年度报告.pdf", "pdf", 2_457_600, "2024-02-28", "文档"),
            ("团建合影.jpg", "jpg", 3_145_728, "2024-03-02", "图片"),
            ("产品演示.mp4", "mp4", 52_428_800, "2024-03-05", "视频"),
            ("备份.zip", "zip", 10_485_760, "2024-03-06", "其他"),
        ];
        seed.into_iter()
            .zip(1..)
            .map(|((name, file_type, size, date, category), id)| FileEntry {
                id,
                ..FileEntry::new(name, file_type, size, date, category)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageUsage {
    pub files: usize,
    pub total_bytes: u64,
}

impl Aggregate<FileEntry> for StorageUsage {
    fn compute<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a FileEntry>,
    {
        items
            .into_iter()
            .fold(StorageUsage::default(), |usage, file| StorageUsage {
                files: usage.files + 1,
                total_bytes: usage.total_bytes + file.size,
            })
    }
}

/// Human-readable size, binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Total size of the files in one category.
pub fn category_size<'a>(items: impl IntoIterator<Item = &'a FileEntry>, category: &str) -> u64 {
    items
        .into_iter()
        .filter(|f| f.category == category)
        .map(|f| f.size)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_over_seed() {
        let usage = StorageUsage::compute(&FileEntry::defaults());
        assert_eq!(usage.files, 4);
        assert_eq!(usage.total_bytes, 2_457_600 + 3_145_728 + 52_428_800 + 10_485_760);
    }

    #[test]
    fn sizes_format_in_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3_145_728), "3.0 MB");
    }

    #[test]
    fn size_per_category() {
        let files = FileEntry::defaults();
        assert_eq!(category_size(&files, "视频"), 52_428_800);
        assert_eq!(category_size(&files, "文档") + category_size(&files, "图片"), 5_603_328);
    }
}
