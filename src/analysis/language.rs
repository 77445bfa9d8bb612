// Language families recognised by extension

use serde::{Deserialize, Serialize};

/// Coarse language family of a file, decided purely by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    R,
    /// JavaScript and TypeScript share one family
    JavaScript,
}

impl Language {
    /// Map a (case-insensitive) extension without the dot to its family
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" => Some(Language::Python),
            "r" => Some(Language::R),
            "js" | "ts" => Some(Language::JavaScript),
            _ => None,
        }
    }

    /// Label added to the tech stack when the family is present
    pub fn tech_label(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::R => "R",
            Language::JavaScript => "JavaScript/TypeScript",
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &["py"],
            Language::R => &["r"],
            Language::JavaScript => &["js", "ts"],
        }
    }
}
