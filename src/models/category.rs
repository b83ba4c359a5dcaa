// file: src/models/category.rs
// description: functional category assigned to every changed file
// reference: closed classification enum

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Development,
    Test,
    Build,
    Infrastructure,
}

impl Category {
    /// Fixed classification order. Earlier categories win on overlap.
    pub const ALL: [Category; 4] = [
        Category::Development,
        Category::Test,
        Category::Build,
        Category::Infrastructure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Development => "development",
            Category::Test => "test",
            Category::Build => "build",
            Category::Infrastructure => "infrastructure",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Category::Development => 0,
            Category::Test => 1,
            Category::Build => 2,
            Category::Infrastructure => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
