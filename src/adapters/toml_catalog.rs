use crate::domain::model::{
    DateSpan, Destination, PriceItem, Route, RouteDraft, Stay, Stop, StopDraft, Transport,
};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{Result, TravelyError};
use crate::utils::validation::Validate;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    destinations: Vec<RawDestination>,
    #[serde(default)]
    stays: Vec<Stay>,
    route: Option<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawDestination {
    id: u32,
    name: String,
    country: String,
    #[serde(default)]
    country_symbol: String,
    image_url: String,
    #[serde(default)]
    description: String,
    rating: f64,
    price_range: String,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    id: u32,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    duration_label: String,
    total_price: i64,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    stops: Vec<RawStop>,
    #[serde(default)]
    price_items: Vec<RawPriceItem>,
}

#[derive(Debug, Deserialize)]
struct RawStop {
    id: u32,
    destination: String,
    country: String,
    #[serde(default)]
    country_symbol: String,
    #[serde(default)]
    is_start: bool,
    nights: i64,
    #[serde(default)]
    transport: Transport,
    dates: Option<DateSpan>,
}

#[derive(Debug, Deserialize)]
struct RawPriceItem {
    id: u32,
    item: String,
    price: i64,
    stop_id: Option<u32>,
}

/// Catalog read from a TOML file once; every record is validated on load.
#[derive(Debug, Clone)]
pub struct TomlCatalog {
    destinations: Vec<Destination>,
    stays: Vec<Stay>,
    route: Option<Route>,
}

impl TomlCatalog {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TravelyError::CatalogUnavailable {
            message: format!("{}: {}", path.display(), e),
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            "📁 Loaded catalog from {} ({} destinations, {} stays)",
            path.display(),
            catalog.destinations.len(),
            catalog.stays.len()
        );
        Ok(catalog)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;

        let destinations = file
            .destinations
            .into_iter()
            .map(|raw| -> Result<Destination> {
                let destination = Destination {
                    id: raw.id,
                    name: raw.name,
                    country: raw.country,
                    country_symbol: raw.country_symbol,
                    image_url: raw.image_url,
                    description: raw.description,
                    rating: raw.rating,
                    price_range: raw.price_range.parse()?,
                };
                destination.validate()?;
                Ok(destination)
            })
            .collect::<Result<Vec<_>>>()?;

        for stay in &file.stays {
            stay.validate()?;
        }

        let route = file.route.map(build_route).transpose()?;

        Ok(Self {
            destinations,
            stays: file.stays,
            route,
        })
    }
}

fn build_route(raw: RawRoute) -> Result<Route> {
    let stops = raw
        .stops
        .into_iter()
        .map(|stop| {
            Stop::new(
                stop.id,
                StopDraft {
                    destination: stop.destination,
                    country: stop.country,
                    country_symbol: stop.country_symbol,
                    is_start: stop.is_start,
                    nights: stop.nights,
                    transport: stop.transport,
                    dates: stop.dates,
                },
            )
        })
        .collect::<Result<Vec<_>>>()?;
    let price_items = raw
        .price_items
        .into_iter()
        .map(|item| PriceItem::new(item.id, item.item, item.price, item.stop_id))
        .collect::<Result<Vec<_>>>()?;

    Route::new(RouteDraft {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        duration_label: raw.duration_label,
        total_price: raw.total_price,
        image_url: raw.image_url,
        stops,
        price_items,
    })
}

impl CatalogSource for TomlCatalog {
    fn destinations(&self) -> Result<Vec<Destination>> {
        Ok(self.destinations.clone())
    }

    fn stays(&self) -> Result<Vec<Stay>> {
        Ok(self.stays.clone())
    }

    fn featured_route(&self) -> Result<Route> {
        self.route.clone().ok_or_else(|| TravelyError::CatalogUnavailable {
            message: "catalog file has no [route] section".to_string(),
        })
    }
}
