use crate::core::region::RegionClassifier;
use crate::domain::model::{Destination, RegionFilter};
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;

/// Unicode lowercase fold used on both sides of a search comparison.
fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Region + free-text filter over a destination catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogFilter<'a> {
    classifier: &'a RegionClassifier,
}

impl<'a> CatalogFilter<'a> {
    pub fn new(classifier: &'a RegionClassifier) -> Self {
        Self { classifier }
    }

    /// Keeps destinations in `region` whose name or country contains `query`,
    /// in catalog order. An empty query matches everything.
    pub fn filter(&self, catalog: &[Destination], region: RegionFilter, query: &str) -> Vec<Destination> {
        let needle = fold(query);
        catalog
            .iter()
            .filter(|destination| self.in_region(destination, region))
            .filter(|destination| matches_query(destination, &needle))
            .cloned()
            .collect()
    }

    fn in_region(&self, destination: &Destination, region: RegionFilter) -> bool {
        match region {
            RegionFilter::All => true,
            RegionFilter::Only(wanted) => self.classifier.classify(&destination.country) == wanted,
        }
    }
}

fn matches_query(destination: &Destination, needle: &str) -> bool {
    needle.is_empty()
        || fold(&destination.name).contains(needle)
        || fold(&destination.country).contains(needle)
}

/// Catalog snapshot plus the current filter state.
///
/// Changing the region or query drops the cached result; the next read
/// recomputes it from the whole snapshot.
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    filter: CatalogFilter<'a>,
    catalog: Vec<Destination>,
    region: RegionFilter,
    query: String,
    cached: Option<Vec<Destination>>,
}

impl<'a> CatalogView<'a> {
    pub fn new(classifier: &'a RegionClassifier, catalog: Vec<Destination>) -> Self {
        Self {
            filter: CatalogFilter::new(classifier),
            catalog,
            region: RegionFilter::All,
            query: String::new(),
            cached: None,
        }
    }

    /// Loads the snapshot from `source`. A failing source leaves no view at all.
    pub fn from_source<S: CatalogSource + ?Sized>(classifier: &'a RegionClassifier, source: &S) -> Result<Self> {
        let catalog = source.destinations()?;
        tracing::debug!("Catalog view loaded with {} destinations", catalog.len());
        Ok(Self::new(classifier, catalog))
    }

    pub fn region(&self) -> RegionFilter {
        self.region
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn catalog(&self) -> &[Destination] {
        &self.catalog
    }

    pub fn set_region(&mut self, region: RegionFilter) {
        if self.region != region {
            self.region = region;
            self.cached = None;
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.query != query {
            self.query = query;
            self.cached = None;
        }
    }

    pub fn replace_catalog(&mut self, catalog: Vec<Destination>) {
        self.catalog = catalog;
        self.cached = None;
    }

    pub fn is_stale(&self) -> bool {
        self.cached.is_none()
    }

    pub fn results(&mut self) -> &[Destination] {
        let (filter, catalog, region, query) = (&self.filter, &self.catalog, self.region, &self.query);
        self.cached.get_or_insert_with(|| {
            let results = filter.filter(catalog, region, query);
            tracing::debug!(
                "Catalog filter region={} query={:?} matched {} of {}",
                region,
                query,
                results.len(),
                catalog.len()
            );
            results
        })
    }
}
