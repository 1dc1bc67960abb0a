//! Company profiles and the directory they are looked up in.
//!
//! Profiles are reference data owned by whoever supplies them; this module
//! only parses and filters. A malformed file is rejected as a whole.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, Result, ValidationError};

/// Share of interview weight per area, in percent. Expected to sum to ~100
/// but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FocusDistribution {
    #[serde(default)]
    pub dsa: u32,
    #[serde(default)]
    pub core_cs: u32,
    #[serde(default)]
    pub system_design: u32,
    #[serde(default)]
    pub hr: u32,
}

impl FocusDistribution {
    /// Above this DSA share a company counts as DSA-heavy.
    pub const DSA_HEAVY_THRESHOLD: u32 = 35;

    pub fn is_dsa_heavy(&self) -> bool {
        self.dsa > Self::DSA_HEAVY_THRESHOLD
    }

    /// Sum of all shares. Widened so any parsed file can be summed.
    pub fn total(&self) -> u64 {
        [self.dsa, self.core_cs, self.system_design, self.hr]
            .into_iter()
            .map(u64::from)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewPattern {
    #[serde(rename = "DSA-heavy")]
    DsaHeavy,
    #[serde(rename = "Tech-heavy")]
    TechHeavy,
    #[serde(rename = "HR-heavy")]
    HrHeavy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: String,
    pub name: String,
    pub job_description: String,
    pub focus_distribution: FocusDistribution,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub interview_pattern: Option<InterviewPattern>,
    #[serde(default = "default_approved")]
    pub approved: bool,
    #[serde(default)]
    pub guidelines: Vec<String>,
}

fn default_approved() -> bool {
    true
}

impl CompanyProfile {
    /// Minimal profile with only the fields the estimator reads.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        job_description: impl Into<String>,
        focus_distribution: FocusDistribution,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            job_description: job_description.into(),
            focus_distribution,
            city: None,
            industry: None,
            interview_pattern: None,
            approved: true,
            guidelines: Vec::new(),
        }
    }
}

/// City filter value that matches every company.
pub const ALL_CITIES: &str = "All Cities";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyDirectory {
    #[serde(default)]
    pub companies: Vec<CompanyProfile>,
}

impl CompanyDirectory {
    /// Parse a `[[companies]]` TOML document.
    ///
    /// # Errors
    /// Fails on malformed TOML, an empty list, or duplicate ids.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let directory: CompanyDirectory = toml::from_str(content)?;
        if directory.companies.is_empty() {
            return Err(ValidationError::EmptyCollection("companies".into()).into());
        }
        for (i, company) in directory.companies.iter().enumerate() {
            if directory.companies[..i].iter().any(|c| c.id == company.id) {
                return Err(ValidationError::InvalidValue {
                    field: "companies.id".into(),
                    message: format!("duplicate company id '{}'", company.id),
                }
                .into());
            }
            if company.focus_distribution.total() > 100 {
                warn!(
                    id = %company.id,
                    total = company.focus_distribution.total(),
                    "focus distribution sums past 100%"
                );
            }
        }
        Ok(directory)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn find(&self, id: &str) -> Option<&CompanyProfile> {
        self.companies.iter().find(|c| c.id == id)
    }

    /// Like [`find`](Self::find) but reports a missing id as an error.
    pub fn get(&self, id: &str) -> Result<&CompanyProfile> {
        self.find(id).ok_or_else(|| CoreError::NotFound {
            kind: "company",
            id: id.to_string(),
        })
    }

    /// Approved companies whose name contains `query` (case-insensitive),
    /// optionally restricted to one city.
    pub fn search(&self, query: &str, city: Option<&str>) -> Vec<&CompanyProfile> {
        let query = query.to_lowercase();
        let city = city.filter(|c| *c != ALL_CITIES);
        self.companies
            .iter()
            .filter(|c| c.approved)
            .filter(|c| c.name.to_lowercase().contains(&query))
            .filter(|c| match city {
                Some(city) => c.city.as_deref() == Some(city),
                None => true,
            })
            .collect()
    }

    /// Distinct cities in first-seen order.
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = Vec::new();
        for city in self.companies.iter().filter_map(|c| c.city.as_deref()) {
            if !cities.contains(&city) {
                cities.push(city);
            }
        }
        cities
    }
}
