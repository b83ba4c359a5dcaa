// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod category;
pub mod commit;

pub use category::Category;
pub use commit::{ChangedFile, CommitRecord, CommitSummary, FileStatus, ResultSet};
