use crate::domain::model::{Destination, Route, Stay};
use crate::utils::error::Result;

/// Read-only provider of catalog and itinerary data.
///
/// Constructed once at startup and passed to whichever component needs it.
/// An `Err` means the catalog is unavailable, which callers must keep apart
/// from an empty filter result.
pub trait CatalogSource {
    fn destinations(&self) -> Result<Vec<Destination>>;
    fn stays(&self) -> Result<Vec<Stay>>;
    fn featured_route(&self) -> Result<Route>;
}
