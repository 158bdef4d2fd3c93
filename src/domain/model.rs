use crate::utils::error::{Result, TravelyError};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_range, validate_url, Validate,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Europe,
    Asia,
    Americas,
    Africa,
    Oceania,
    Unclassified,
}

impl Region {
    /// Regions a country can be assigned to.
    pub const CLASSIFIED: [Region; 5] = [
        Region::Europe,
        Region::Asia,
        Region::Americas,
        Region::Africa,
        Region::Oceania,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::Americas => "Americas",
            Region::Africa => "Africa",
            Region::Oceania => "Oceania",
            Region::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Region {
    type Err = TravelyError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Region::CLASSIFIED
            .into_iter()
            .chain(std::iter::once(Region::Unclassified))
            .find(|region| region.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TravelyError::validation(format!("unknown region '{}'", s)))
    }
}

/// Region selector of the catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.pad("All"),
            RegionFilter::Only(region) => region.fmt(f),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = TravelyError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(RegionFilter::All)
        } else {
            s.parse().map(RegionFilter::Only)
        }
    }
}

impl From<Region> for RegionFilter {
    fn from(region: Region) -> Self {
        RegionFilter::Only(region)
    }
}

/// Qualitative cost band of a destination, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Budget,
    Moderate,
    Premium,
    Luxury,
}

impl PriceTier {
    pub fn symbol(&self) -> &'static str {
        match self {
            PriceTier::Budget => "€",
            PriceTier::Moderate => "€€",
            PriceTier::Premium => "€€€",
            PriceTier::Luxury => "€€€€",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

/// Accepts either the tier name or the repeated currency sign notation ("€€€").
impl FromStr for PriceTier {
    type Err = TravelyError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let by_name = match trimmed.to_lowercase().as_str() {
            "budget" => Some(PriceTier::Budget),
            "moderate" => Some(PriceTier::Moderate),
            "premium" => Some(PriceTier::Premium),
            "luxury" => Some(PriceTier::Luxury),
            _ => None,
        };
        if let Some(tier) = by_name {
            return Ok(tier);
        }

        let mut chars = trimmed.chars();
        let sign = chars.next();
        let uniform = sign.is_some_and(|c| !c.is_alphanumeric() && chars.all(|other| other == c));
        match (uniform, trimmed.chars().count()) {
            (true, 1) => Ok(PriceTier::Budget),
            (true, 2) => Ok(PriceTier::Moderate),
            (true, 3) => Ok(PriceTier::Premium),
            (true, 4) => Ok(PriceTier::Luxury),
            _ => Err(TravelyError::validation(format!("unknown price range '{}'", s))),
        }
    }
}

/// Integer amount in a currency; only ever displayed, never converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: u64,
    pub currency: String,
}

impl Money {
    pub fn new(amount: u64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    pub fn eur(amount: u64) -> Self {
        Self::new(amount, "EUR")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.currency.as_str() {
            "EUR" => Some("€"),
            "USD" => Some("$"),
            "GBP" => Some("£"),
            "JPY" => Some("¥"),
            _ => None,
        };
        match symbol {
            Some(symbol) => write!(f, "{}{}", symbol, self.amount),
            None => write!(f, "{} {}", self.amount, self.currency),
        }
    }
}

/// Calendar span of a stop, `end` is the check-out day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(TravelyError::validation(format!(
                "date span ends ({}) before it starts ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Fails when the check-out day falls past the last representable date.
    pub fn from_nights(start: NaiveDate, nights: u32) -> Result<Self> {
        let end = start
            .checked_add_days(chrono::Days::new(u64::from(nights)))
            .ok_or_else(|| {
                TravelyError::validation(format!("{} nights from {} runs past the calendar", nights, start))
            })?;
        Ok(Self { start, end })
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Half-open overlap: spans that only touch on a changeover day do not overlap.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportLeg {
    pub route: String,
    pub duration: String,
    pub fare: Option<Money>,
}

/// How a stop is reached. Flight and train are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Flight(TransportLeg),
    Train(TransportLeg),
    #[default]
    Ground,
}

impl Transport {
    pub fn has_flight(&self) -> bool {
        matches!(self, Transport::Flight(_))
    }

    pub fn has_train(&self) -> bool {
        matches!(self, Transport::Train(_))
    }

    pub fn leg(&self) -> Option<&TransportLeg> {
        match self {
            Transport::Flight(leg) | Transport::Train(leg) => Some(leg),
            Transport::Ground => None,
        }
    }
}

/// Unvalidated stop input. `nights` is signed so bad input can be reported instead of wrapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDraft {
    pub destination: String,
    pub country: String,
    #[serde(default)]
    pub country_symbol: String,
    #[serde(default)]
    pub is_start: bool,
    pub nights: i64,
    #[serde(default)]
    pub transport: Transport,
    #[serde(default)]
    pub dates: Option<DateSpan>,
}

impl StopDraft {
    pub fn new(destination: impl Into<String>, country: impl Into<String>, nights: i64) -> Self {
        Self {
            destination: destination.into(),
            country: country.into(),
            country_symbol: String::new(),
            is_start: false,
            nights,
            transport: Transport::Ground,
            dates: None,
        }
    }

    pub fn starting(mut self) -> Self {
        self.is_start = true;
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.country_symbol = symbol.into();
        self
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_dates(mut self, dates: DateSpan) -> Self {
        self.dates = Some(dates);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub(crate) id: u32,
    pub(crate) destination: String,
    pub(crate) country: String,
    pub(crate) country_symbol: String,
    pub(crate) is_start: bool,
    pub(crate) nights: u32,
    pub(crate) transport: Transport,
    pub(crate) dates: Option<DateSpan>,
}

impl Stop {
    pub fn new(id: u32, draft: StopDraft) -> Result<Self> {
        let invalid = |reason: String| TravelyError::InvalidStop { stop_id: id, reason };

        validate_non_empty_string("stop.destination", &draft.destination)
            .map_err(|e| invalid(e.to_string()))?;
        let nights = u32::try_from(draft.nights)
            .map_err(|_| invalid(format!("nights must be a non-negative count, got {}", draft.nights)))?;
        if let Some(span) = &draft.dates {
            check_span(span, nights).map_err(invalid)?;
        }

        Ok(Self {
            id,
            destination: draft.destination,
            country: draft.country,
            country_symbol: draft.country_symbol,
            is_start: draft.is_start,
            nights,
            transport: draft.transport,
            dates: draft.dates,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn country_symbol(&self) -> &str {
        &self.country_symbol
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn nights(&self) -> u32 {
        self.nights
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn has_flight(&self) -> bool {
        self.transport.has_flight()
    }

    pub fn has_train(&self) -> bool {
        self.transport.has_train()
    }

    pub fn dates(&self) -> Option<&DateSpan> {
        self.dates.as_ref()
    }
}

pub(crate) fn check_span(span: &DateSpan, nights: u32) -> std::result::Result<(), String> {
    if span.end < span.start {
        return Err(format!("dates end ({}) before they start ({})", span.end, span.start));
    }
    if span.nights() != i64::from(nights) {
        return Err(format!(
            "dates {} to {} cover {} nights but the stop has {}",
            span.start,
            span.end,
            span.nights(),
            nights
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceItem {
    pub(crate) id: u32,
    pub(crate) item: String,
    pub(crate) price: u64,
    pub(crate) stop_id: Option<u32>,
}

impl PriceItem {
    pub fn new(id: u32, item: impl Into<String>, price: i64, stop_id: Option<u32>) -> Result<Self> {
        let price = validate_non_negative("price_item.price", price).map_err(|e| TravelyError::InvalidPriceItem {
            item_id: id,
            reason: e.to_string(),
        })?;
        Ok(Self {
            id,
            item: item.into(),
            price,
            stop_id,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    /// The stop this charge depends on; `None` for route-level charges.
    pub fn stop_id(&self) -> Option<u32> {
        self.stop_id
    }
}

/// Unvalidated route input; see `Route::new`.
#[derive(Debug, Clone)]
pub struct RouteDraft {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub duration_label: String,
    pub total_price: i64,
    pub image_url: String,
    pub stops: Vec<Stop>,
    pub price_items: Vec<PriceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub(crate) id: u32,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) duration_label: String,
    pub(crate) total_price: u64,
    pub(crate) image_url: String,
    pub(crate) stops: Vec<Stop>,
    pub(crate) ledger: Vec<PriceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: u32,
    pub name: String,
    pub country: String,
    pub country_symbol: String,
    pub image_url: String,
    pub description: String,
    pub rating: f64,
    pub price_range: PriceTier,
}

impl Validate for Destination {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("destination.name", &self.name)?;
        validate_range("destination.rating", self.rating, 0.0, 5.0)?;
        validate_url("destination.image_url", &self.image_url)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stay {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub country_symbol: String,
    pub dates: DateSpan,
    pub nights: u32,
    pub price: u64,
    pub rating: f64,
    pub image_url: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub description: String,
}

impl Validate for Stay {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("stay.name", &self.name)?;
        validate_range("stay.rating", self.rating, 0.0, 5.0)?;
        validate_url("stay.image_url", &self.image_url)?;
        check_span(&self.dates, self.nights).map_err(|reason| TravelyError::InvalidConfigValueError {
            field: "stay.dates".to_string(),
            value: format!("{} - {}", self.dates.start, self.dates.end),
            reason,
        })
    }
}
