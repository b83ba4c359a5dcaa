// file: src/repository/mod.rs
// description: Repository reference parsing and file classification exports
// reference: Internal module structure

pub mod classifier;
pub mod reference;
pub mod rules;

pub use classifier::{FileClassifier, MatchTier};
pub use reference::RepositoryRef;
pub use rules::{CategoryRules, builtin_rules};
