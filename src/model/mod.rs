//! Catalog records handed out to callers.
//!
//! Records are owned clones of the stored values; mutating them has no effect on the store.

pub mod author;
pub mod book;
