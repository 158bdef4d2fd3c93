// Adapters layer: concrete data providers and output writers around the core.

pub mod export;
pub mod sample;
pub mod toml_catalog;
