//! Reference tables for skill matching.
//!
//! The vocabulary is the list of skill names a candidate is credited with;
//! the keyword groups are the phrases a job description is scanned for when
//! building the missing-skill list. Both are plain data so callers can ship
//! their own tables in TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Dsa,
    CoreCs,
    SystemDesign,
    Web,
    Cloud,
    Languages,
}

impl SkillCategory {
    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Dsa => "DSA",
            SkillCategory::CoreCs => "Core CS",
            SkillCategory::SystemDesign => "System Design",
            SkillCategory::Web => "Web",
            SkillCategory::Cloud => "Cloud",
            SkillCategory::Languages => "Languages",
        }
    }
}

/// Phrases that signal one category. Phrases are expected in lower case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub category: SkillCategory,
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCatalog {
    #[serde(default)]
    pub vocabulary: Vec<String>,
    /// Scanned in order; the order decides which missing skills survive
    /// truncation.
    #[serde(default)]
    pub keywords: Vec<KeywordGroup>,
}

const DEFAULT_VOCABULARY: &[&str] = &[
    "Java",
    "Python",
    "JavaScript",
    "React",
    "Node.js",
    "SQL",
    "MongoDB",
    "Git",
    "Data Structures",
    "Algorithms",
    "HTML",
    "CSS",
    "REST APIs",
    "Problem Solving",
    "Communication",
];

const DEFAULT_KEYWORDS: &[(SkillCategory, &[&str])] = &[
    (
        SkillCategory::Dsa,
        &[
            "data structures",
            "algorithms",
            "leetcode",
            "complexity",
            "arrays",
            "trees",
            "graphs",
            "dynamic programming",
            "sorting",
            "searching",
        ],
    ),
    (
        SkillCategory::CoreCs,
        &[
            "operating systems",
            "dbms",
            "networking",
            "oops",
            "sql",
            "nosql",
            "databases",
            "os",
            "computer networks",
        ],
    ),
    (
        SkillCategory::SystemDesign,
        &[
            "system design",
            "scalability",
            "distributed",
            "microservices",
            "architecture",
            "caching",
            "load balancing",
            "api design",
        ],
    ),
    (
        SkillCategory::Web,
        &[
            "react",
            "angular",
            "vue",
            "node",
            "javascript",
            "typescript",
            "html",
            "css",
            "web",
            "frontend",
            "backend",
        ],
    ),
    (
        SkillCategory::Cloud,
        &[
            "aws",
            "azure",
            "gcp",
            "cloud",
            "docker",
            "kubernetes",
            "devops",
            "ci/cd",
        ],
    ),
    (
        SkillCategory::Languages,
        &["java", "python", "c++", "c#", "go", "rust", "kotlin", "swift"],
    ),
];

impl Default for SkillCatalog {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect(),
            keywords: DEFAULT_KEYWORDS
                .iter()
                .map(|(category, phrases)| KeywordGroup {
                    category: *category,
                    phrases: phrases.iter().map(|p| p.to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl SkillCatalog {
    /// Parse a catalog from TOML.
    ///
    /// Keyword phrases are lower-cased on the way in so hand-written tables
    /// behave like the built-in one.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut catalog: SkillCatalog = toml::from_str(content)?;
        for group in &mut catalog.keywords {
            for phrase in &mut group.phrases {
                *phrase = phrase.to_lowercase();
            }
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if given, otherwise the built-in tables.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn default_tables_are_complete() {
        let catalog = SkillCatalog::default();
        assert_eq!(catalog.vocabulary.len(), 15);
        let order: Vec<_> = catalog.keywords.iter().map(|g| g.category).collect();
        assert_eq!(
            order,
            vec![
                SkillCategory::Dsa,
                SkillCategory::CoreCs,
                SkillCategory::SystemDesign,
                SkillCategory::Web,
                SkillCategory::Cloud,
                SkillCategory::Languages,
            ]
        );
        assert!(catalog
            .keywords
            .iter()
            .flat_map(|g| g.phrases.iter())
            .all(|p| *p == p.to_lowercase()));
    }

    #[test]
    fn parses_custom_catalog() {
        let catalog = SkillCatalog::from_toml_str(indoc! {r#"
            vocabulary = ["Rust", "Tokio"]

            [[keywords]]
            category = "languages"
            phrases = ["Rust", "zig"]

            [[keywords]]
            category = "system_design"
            phrases = ["event sourcing"]
        "#})
        .unwrap();

        assert_eq!(catalog.vocabulary, vec!["Rust", "Tokio"]);
        assert_eq!(catalog.keywords[0].category, SkillCategory::Languages);
        assert_eq!(catalog.keywords[0].phrases, vec!["rust", "zig"]);
        assert_eq!(catalog.keywords[1].category, SkillCategory::SystemDesign);
    }

    #[test]
    fn rejects_unknown_category() {
        let err = SkillCatalog::from_toml_str(indoc! {r#"
            [[keywords]]
            category = "astrology"
            phrases = ["tarot"]
        "#});
        assert!(err.is_err());
    }
}
