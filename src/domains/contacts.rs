//! Contacts address book.

use serde::{Deserialize, Serialize};

use crate::{Record, RecordId, Seeded};

pub const CATEGORIES: &[&str] = &["全部", "家人", "朋友", "同事", "客户"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(collection = "u-contacts-data", categories = CATEGORIES)]
pub struct Contact {
    pub id: RecordId,
    #[record(search)]
    pub name: String,
    #[record(search)]
    pub phone: String,
    #[record(search)]
    pub email: String,
    pub address: String,
    pub category: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            category: category.into(),
        }
    }
}

impl Seeded for Contact {
    fn defaults() -> Vec<Self> {
        let seed = [
            ("张伟", "138-0000-1111", "zhangwei@example.com", "北京市朝阳区", "家人"),
            ("李娜", "139-2222-3333", "lina@example.com", "上海市浦东新区", "朋友"),
            ("王强", "137-4444-5555", "wangqiang@example.com", "深圳市南山区", "同事"),
            ("Acme 采购部", "010-8888-6666", "purchasing@acme.example.com", "杭州市西湖区", "客户"),
        ];
        seed.into_iter()
            .zip(1..)
            .map(|((name, phone, email, address, category), id)| Contact {
                id,
                ..Contact::new(name, phone, email, address, category)
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
    fn search_matches_phone_fragments() {
        let mut store = InMemoryStorage::new().collection::<Contact>().unwrap();
        store.set_search("4444");
        let names: Vec<_> = store.visible().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["王强"]);
    }

    #[test]
    fn counts_per_relationship() {
        let store = InMemoryStorage::new().collection::<Contact>().unwrap();
        let counts: CategoryCounts = store.aggregate();
        assert_eq!(counts.get("家人"), 1);
        assert_eq!(counts.get("客户"), 1);
        assert_eq!(counts.0.len(), 4);
    }
}
