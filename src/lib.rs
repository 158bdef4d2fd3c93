pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{sample::SampleData, toml_catalog::TomlCatalog};
pub use config::AppConfig;
pub use core::catalog_filter::{CatalogFilter, CatalogView};
pub use core::ledger::{LedgerImbalance, Reconciliation};
pub use core::region::RegionClassifier;
pub use core::schedule::NightsBudget;
pub use domain::model::{
    DateSpan, Destination, Money, PriceItem, PriceTier, Region, RegionFilter, Route, RouteDraft, Stay, Stop,
    StopDraft, Transport, TransportLeg,
};
pub use domain::ports::CatalogSource;
pub use utils::error::{Result, TravelyError};
