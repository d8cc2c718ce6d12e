use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::RawSchemaVariant;
use crate::pipeline::{BrandVocabulary, DEFAULT_BRANDS};

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "supercar.toml";

/// Prefix of environment overrides, e.g. `SUPERCAR__OUTPUT_PATH`
pub const ENV_PREFIX: &str = "SUPERCAR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub brands: Vec<String>,
    pub sources: Vec<SourceSettings>,
    pub output_path: PathBuf,
    pub collector: CollectorSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    pub name: String,
    pub path: PathBuf,
    pub variant: RawSchemaVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorSettings {
    pub user_agent: String,
    /// Pause after each page load
    pub settle_delay_ms: u64,
    pub max_retries: u32,
    /// First retry backoff, doubled per attempt
    pub retry_base_delay_ms: u64,
    pub sites: HashMap<String, SiteSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    pub base_url: String,
    /// Search terms, one page sequence per term
    pub queries: Vec<String>,
    pub max_pages: u32,
    pub output_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let mut sites = HashMap::new();

        sites.insert(
            "supercartrader".to_string(),
            SiteSettings {
                base_url: "https://www.supercartrader.com".to_string(),
                queries: [
                    "ferrari",
                    "lamborghini",
                    "porsche",
                    "aston martin",
                    "mercedes",
                    "mclaren",
                    "bentley",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
                max_pages: 8,
                output_path: PathBuf::from("all_brands_data.csv"),
            },
        );

        sites.insert(
            "dupont".to_string(),
            SiteSettings {
                base_url: "https://www.dupontregistry.com".to_string(),
                queries: vec!["maserati".to_string()],
                max_pages: 7,
                output_path: PathBuf::from("dupont_supercars.csv"),
            },
        );

        Self {
            brands: DEFAULT_BRANDS.iter().map(|b| b.to_string()).collect(),
            sources: vec![
                SourceSettings {
                    name: "supercartrader".to_string(),
                    path: PathBuf::from("all_brands_data.csv"),
                    variant: RawSchemaVariant::SeparateBrand,
                },
                SourceSettings {
                    name: "dupont".to_string(),
                    path: PathBuf::from("dupont_supercars.csv"),
                    variant: RawSchemaVariant::EmbeddedBrand,
                },
            ],
            output_path: PathBuf::from("supercars_data.csv"),
            collector: CollectorSettings {
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string(),
                settle_delay_ms: 4000,
                max_retries: 3,
                retry_base_delay_ms: 2000,
                sites,
            },
        }
    }
}

impl Settings {
    /// Defaults, then the config file, then `SUPERCAR__*` environment variables.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// Vocabulary sorted for matching; built once per run
    pub fn vocabulary(&self) -> BrandVocabulary {
        BrandVocabulary::new(self.brands.iter().cloned())
    }
}
