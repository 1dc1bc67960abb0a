use std::error::Error;
use std::path::PathBuf;

use clap::Subcommand;
use placeprep_core::Config;

use super::matching::load_directory;

#[derive(Subcommand)]
pub enum CompaniesAction {
    /// List approved companies
    List {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        query: String,
        /// Only companies in this city ("All Cities" for any)
        #[arg(long)]
        city: Option<String>,
        /// Company directory TOML (defaults to matching.companies_file)
        #[arg(long)]
        companies: Option<PathBuf>,
    },
    /// Show one company profile
    Show {
        id: String,
        #[arg(long)]
        companies: Option<PathBuf>,
    },
    /// List the cities present in the directory
    Cities {
        #[arg(long)]
        companies: Option<PathBuf>,
    },
}

pub fn run(action: CompaniesAction) -> Result<(), Box<dyn Error>> {
    let config = Config::load_or_default();

    match action {
        CompaniesAction::List {
            query,
            city,
            companies,
        } => {
            let directory = load_directory(companies, &config)?;
            let found = directory.search(&query, city.as_deref());
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        CompaniesAction::Show { id, companies } => {
            let directory = load_directory(companies, &config)?;
            println!("{}", serde_json::to_string_pretty(directory.get(&id)?)?);
        }
        CompaniesAction::Cities { companies } => {
            let directory = load_directory(companies, &config)?;
            println!("{}", serde_json::to_string_pretty(&directory.cities())?);
        }
    }
    Ok(())
}
