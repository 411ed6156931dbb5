//! In-memory catalog of books and authors.
//!
//! [`catalog::CatalogStore`] owns both collections and keeps them consistent:
//! author names and book titles are unique, and every book points at an
//! existing author.

pub mod author;
pub mod book;
pub mod catalog;
pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod request;
pub mod seed;
pub mod tracing;
