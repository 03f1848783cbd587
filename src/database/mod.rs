/*!
 * Database module for persistent storage of translations.
 *
 * This module provides SQLite-based persistence for:
 * - Stored template originals and their translations, keyed by
 *   (filename, language)
 * - Comment translations, keyed by (point_id, language)
 *
 * The site's `points` table lives in the same database but is owned by
 * the site itself; this module only reads from it.
 */

// Allow dead code and unused imports - database types are for library consumers
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::DatabaseConnection;
pub use repository::Repository;
