//! Sample catalog contents.

use crate::{author::repository::AuthorRecordOwned, book::repository::BookRecordOwned};

pub fn authors() -> Vec<AuthorRecordOwned> {
    vec![
        AuthorRecordOwned {
            id: "1".into(),
            name: "J.K. Rowling".into(),
        },
        AuthorRecordOwned {
            id: "2".into(),
            name: "J.R.R. Tolkien".into(),
        },
    ]
}

pub fn books() -> Vec<BookRecordOwned> {
    vec![
        BookRecordOwned {
            id: "1".into(),
            title: "Harry Potter and the Sorcerer's Stone".into(),
            author_id: "1".into(),
        },
        BookRecordOwned {
            id: "2".into(),
            title: "The Lord of the Rings".into(),
            author_id: "2".into(),
        },
    ]
}
