//! Book management module.
//!
//! Provides the book side of the catalog:
//! - Command handlers for create, update, and delete operations
//! - Query manager for retrieving books and their authors
//! - Repository abstraction for data storage

/// Book creation command handler.
pub mod create_book_command;

/// Book deletion command handler.
pub mod delete_book_command;

/// Book query manager for data retrieval.
pub mod query_manager;

/// Book repository abstraction and implementations.
pub mod repository;

/// Book update command handler.
pub mod update_book_command;
