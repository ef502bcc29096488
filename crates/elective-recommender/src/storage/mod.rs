//! Storage module - CSV-backed tables for courses, students and their tags
//!
//! Plain single-writer file I/O: no locking against concurrent processes.

pub mod csv_store;
pub mod tag_table;

pub use csv_store::{CourseRecord, CourseStore, StudentRecord, StudentStore};
pub use tag_table::{join_tags, split_tags, TagRow, TagTable};
