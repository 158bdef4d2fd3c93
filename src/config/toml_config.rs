use crate::adapters::sample::SampleData;
use crate::adapters::toml_catalog::TomlCatalog;
use crate::core::region::RegionClassifier;
use crate::core::schedule::{NightsBudget, DEFAULT_PLANNED_NIGHTS};
use crate::domain::model::{Region, RegionFilter};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{Result, TravelyError};
use crate::utils::validation::{validate_path, validate_required_field, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub planning: PlanningConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Extra `country = "Region"` entries on top of the built-in table.
    #[serde(default)]
    pub regions: BTreeMap<String, String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningConfig {
    pub planned_nights: Option<u32>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// "sample" or "file"
    pub source: Option<String>,
    pub path: Option<String>,
    pub default_region: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TravelyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Reads `path` when given, otherwise falls back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        // Substitute environment variables first
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TravelyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TravelyError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        // Planning
        if let Some(planned) = self.planning.planned_nights {
            if planned == 0 {
                return Err(TravelyError::InvalidConfigValueError {
                    field: "planning.planned_nights".to_string(),
                    value: planned.to_string(),
                    reason: "Value must be at least 1".to_string(),
                });
            }
        }

        // Catalog source
        match self.catalog_source_kind() {
            "sample" => {}
            "file" => {
                let path = validate_required_field("catalog.path", &self.catalog.path)?;
                validate_path("catalog.path", path)?;
            }
            other => {
                return Err(TravelyError::InvalidConfigValueError {
                    field: "catalog.source".to_string(),
                    value: other.to_string(),
                    reason: "Valid sources: sample, file".to_string(),
                });
            }
        }

        // Regions
        self.default_region()?;
        self.region_classifier()?;

        // Logging
        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(TravelyError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn nights_budget(&self) -> NightsBudget {
        NightsBudget::new(self.planning.planned_nights.unwrap_or(DEFAULT_PLANNED_NIGHTS))
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.planning.start_date
    }

    pub fn catalog_source_kind(&self) -> &str {
        self.catalog.source.as_deref().unwrap_or("sample")
    }

    pub fn default_region(&self) -> Result<RegionFilter> {
        match &self.catalog.default_region {
            Some(region) => region.parse().map_err(|_| TravelyError::InvalidConfigValueError {
                field: "catalog.default_region".to_string(),
                value: region.clone(),
                reason: "Expected All, Europe, Asia, Americas, Africa, Oceania or Unclassified".to_string(),
            }),
            None => Ok(RegionFilter::All),
        }
    }

    /// Built-in table extended with the `[regions]` entries.
    pub fn region_classifier(&self) -> Result<RegionClassifier> {
        let mut classifier = RegionClassifier::standard();
        let extra = self
            .regions
            .iter()
            .map(|(country, region)| -> Result<(String, Region)> {
                let region: Region = region.parse().map_err(|_| TravelyError::InvalidConfigValueError {
                    field: format!("regions.{}", country),
                    value: region.clone(),
                    reason: "Unknown region".to_string(),
                })?;
                Ok((country.clone(), region))
            })
            .collect::<Result<Vec<_>>>()?;
        classifier.extend(extra)?;
        Ok(classifier)
    }

    /// Opens the configured data provider.
    pub fn catalog_source(&self) -> Result<Box<dyn CatalogSource>> {
        match self.catalog_source_kind() {
            "file" => {
                let path = validate_required_field("catalog.path", &self.catalog.path)?;
                Ok(Box::new(TomlCatalog::from_file(path)?))
            }
            _ => Ok(Box::new(SampleData::new()?)),
        }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
