// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the AgriSync offline core.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, typed query
//! modules for the sync queue, audit log, and data cache, and storage
//! accounting against the configured hard ceiling.

pub mod database;
pub mod migrations;
pub mod queries;
pub mod store;
pub mod usage;

pub use database::Database;
pub use store::SqliteStore;
pub use usage::estimate_usage;
