//! Skill match estimator.
//!
//! A keyword-containment heuristic that gives directional feedback on how a
//! candidate lines up with a company's job description. It is deliberately
//! lenient: a vocabulary skill counts as matched when it shows up in either
//! the candidate text or the job description.
//!
//! Algorithm:
//! 1. Lower-case candidate text and job description.
//! 2. matched = vocabulary entries contained in either text.
//! 3. missing = keyword phrases contained in the JD but not the candidate
//!    text, title-cased, de-duplicated case-insensitively, in catalog order.
//! 4. score = max(40, min(85, 50 + 3·matched) - penalty·min(missing, 5)),
//!    penalty 3 for DSA-heavy companies, else 2.
//! 5. Only the first 6 missing skills are reported.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::{SkillCatalog, SkillCategory};
use super::company::CompanyProfile;

const BASE_SCORE: u32 = 50;
const POINTS_PER_MATCH: u32 = 3;
const MAX_SCORE: u32 = 85;
const MIN_SCORE: u32 = 40;
const PENALTY_DSA_HEAVY: u32 = 3;
const PENALTY_DEFAULT: u32 = 2;
/// Missing skills that cost points. Asymmetric with the display cap below.
const PENALIZED_MISSING: usize = 5;
const DISPLAYED_MISSING: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub name: String,
    pub category: SkillCategory,
    pub priority: Priority,
}

/// Coarse preparation estimate derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrepEstimate {
    #[serde(rename = "2-4 weeks")]
    TwoToFourWeeks,
    #[serde(rename = "4-6 weeks")]
    FourToSixWeeks,
    #[serde(rename = "6-8 weeks")]
    SixToEightWeeks,
}

impl PrepEstimate {
    pub fn from_score(score: u32) -> Self {
        if score > 70 {
            PrepEstimate::TwoToFourWeeks
        } else if score > 55 {
            PrepEstimate::FourToSixWeeks
        } else {
            PrepEstimate::SixToEightWeeks
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PrepEstimate::TwoToFourWeeks => "2-4 weeks",
            PrepEstimate::FourToSixWeeks => "4-6 weeks",
            PrepEstimate::SixToEightWeeks => "6-8 weeks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    #[serde(rename = "Strong Match")]
    Strong,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Needs Work")]
    NeedsWork,
}

impl MatchVerdict {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            MatchVerdict::Strong
        } else if score >= 60 {
            MatchVerdict::Good
        } else {
            MatchVerdict::NeedsWork
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub company_id: String,
    /// Always within 40..=85.
    pub score: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<MissingSkill>,
    pub estimated_prep_weeks: PrepEstimate,
    pub verdict: MatchVerdict,
}

/// Score `candidate_text` against `company`'s job description.
///
/// Pure and deterministic; any string and any parsed profile is accepted.
pub fn estimate_match(
    candidate_text: &str,
    company: &CompanyProfile,
    catalog: &SkillCatalog,
) -> MatchResult {
    let candidate = candidate_text.to_lowercase();
    let jd = company.job_description.to_lowercase();
    let dsa_heavy = company.focus_distribution.is_dsa_heavy();

    let matched_skills: Vec<String> = catalog
        .vocabulary
        .iter()
        .filter(|skill| {
            let needle = skill.to_lowercase();
            candidate.contains(&needle) || jd.contains(&needle)
        })
        .cloned()
        .collect();

    let priority = if dsa_heavy {
        Priority::High
    } else {
        Priority::Medium
    };
    let mut missing_skills: Vec<MissingSkill> = Vec::new();
    for group in &catalog.keywords {
        for phrase in &group.phrases {
            if !jd.contains(phrase.as_str()) || candidate.contains(phrase.as_str()) {
                continue;
            }
            let name = title_case(phrase);
            let seen = missing_skills
                .iter()
                .any(|s| s.name.to_lowercase() == name.to_lowercase());
            if !seen {
                missing_skills.push(MissingSkill {
                    name,
                    category: group.category,
                    priority,
                });
            }
        }
    }

    let base = (BASE_SCORE + POINTS_PER_MATCH * matched_skills.len() as u32).min(MAX_SCORE);
    let penalty = if dsa_heavy {
        PENALTY_DSA_HEAVY
    } else {
        PENALTY_DEFAULT
    };
    let deduction = penalty * missing_skills.len().min(PENALIZED_MISSING) as u32;
    let score = base.saturating_sub(deduction).max(MIN_SCORE);

    debug!(
        company = %company.id,
        matched = matched_skills.len(),
        missing = missing_skills.len(),
        score,
        "match estimated"
    );

    missing_skills.truncate(DISPLAYED_MISSING);
    MatchResult {
        company_id: company.id.clone(),
        score,
        matched_skills,
        missing_skills,
        estimated_prep_weeks: PrepEstimate::from_score(score),
        verdict: MatchVerdict::from_score(score),
    }
}

impl SkillCatalog {
    /// Method form of [`estimate_match`].
    pub fn estimate(&self, candidate_text: &str, company: &CompanyProfile) -> MatchResult {
        estimate_match(candidate_text, company, self)
    }
}

/// Upper-case the first character of every space-separated word.
fn title_case(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
