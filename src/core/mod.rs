pub mod catalog_filter;
pub mod itinerary;
pub mod ledger;
pub mod region;
pub mod schedule;
pub mod stays;

pub use crate::domain::model::{Destination, PriceItem, Region, RegionFilter, Route, Stay, Stop};
pub use crate::domain::ports::CatalogSource;
pub use crate::utils::error::Result;
