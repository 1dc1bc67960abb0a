//! Candidate-to-company skill matching.

mod catalog;
mod company;
mod estimator;

pub use catalog::{KeywordGroup, SkillCatalog, SkillCategory};
pub use company::{
    CompanyDirectory, CompanyProfile, FocusDistribution, InterviewPattern, ALL_CITIES,
};
pub use estimator::{
    estimate_match, MatchResult, MatchVerdict, MissingSkill, PrepEstimate, Priority,
};
