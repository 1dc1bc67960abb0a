use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use placeprep_core::matching::{estimate_match, CompanyDirectory, SkillCatalog};
use placeprep_core::Config;

#[derive(Args)]
pub struct MatchArgs {
    /// Company id from the directory
    #[arg(long)]
    pub company: String,
    /// Company directory TOML (defaults to matching.companies_file)
    #[arg(long)]
    pub companies: Option<PathBuf>,
    /// Skills or resume text inline
    #[arg(long, conflicts_with = "resume")]
    pub text: Option<String>,
    /// Plain-text resume file
    #[arg(long)]
    pub resume: Option<PathBuf>,
    /// Skill catalog TOML (defaults to matching.catalog_file, then built-in)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Resolve the company directory from a flag or the config.
pub fn load_directory(
    flag: Option<PathBuf>,
    config: &Config,
) -> Result<CompanyDirectory, Box<dyn Error>> {
    let path = flag
        .or_else(|| config.matching.companies_file.clone())
        .ok_or("no company directory configured; pass --companies or set matching.companies_file")?;
    Ok(CompanyDirectory::load(&path)?)
}

pub fn run(args: MatchArgs) -> Result<(), Box<dyn Error>> {
    let config = Config::load_or_default();
    let directory = load_directory(args.companies, &config)?;
    let company = directory.get(&args.company)?;

    let candidate = match (args.text, args.resume) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)?,
        (None, None) => return Err("provide your skills with --text or a --resume file".into()),
    };

    let catalog = match args.catalog {
        Some(path) => SkillCatalog::load(&path)?,
        None => config.catalog()?,
    };

    let result = estimate_match(&candidate, company, &catalog);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
