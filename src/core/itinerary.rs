use crate::core::ledger::{self, Reconciliation};
use crate::domain::model::{check_span, DateSpan, PriceItem, Route, RouteDraft, Stop, StopDraft};
use crate::utils::error::{Result, TravelyError};
use crate::utils::validation::{validate_non_empty_string, validate_non_negative, validate_url};
use std::collections::HashSet;

/// Stops, ledger and stated total of a route while a mutation is applied.
#[derive(Debug, Clone)]
pub(crate) struct Working {
    pub(crate) stops: Vec<Stop>,
    pub(crate) ledger: Vec<PriceItem>,
    pub(crate) total_price: u64,
}

impl Working {
    fn stop_index(&self, stop_id: u32) -> Result<usize> {
        self.stops
            .iter()
            .position(|stop| stop.id == stop_id)
            .ok_or(TravelyError::UnknownStop { stop_id })
    }

    fn next_stop_id(&self) -> Result<u32> {
        next_id(self.stops.iter().map(|stop| stop.id), "stop")
    }

    fn next_item_id(&self) -> Result<u32> {
        next_id(self.ledger.iter().map(|item| item.id), "price item")
    }

    fn raise_total(&mut self, by: u64) -> Result<()> {
        self.total_price = self.total_price.checked_add(by).ok_or_else(|| TravelyError::InvalidRoute {
            reason: format!("total price {} cannot grow by {}", self.total_price, by),
        })?;
        Ok(())
    }

    /// The stated total moves by the same delta as the ledger. A total already
    /// below the itemized sum cannot drop under zero; such routes need
    /// `recompute_total` first.
    fn lower_total(&mut self, by: u64) -> Result<()> {
        self.total_price = self.total_price.checked_sub(by).ok_or_else(|| TravelyError::InvalidRoute {
            reason: format!(
                "stated total {} is below the {} being removed; recompute the total first",
                self.total_price, by
            ),
        })?;
        Ok(())
    }

    /// Moves the origin flag to whichever stop is now first.
    fn reassign_start(&mut self) {
        for (index, stop) in self.stops.iter_mut().enumerate() {
            stop.is_start = index == 0;
        }
    }
}

fn next_id(ids: impl Iterator<Item = u32>, kind: &str) -> Result<u32> {
    match ids.max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| TravelyError::InvalidRoute {
            reason: format!("no {} id left after {}", kind, max),
        }),
    }
}

fn validate_stops(stops: &[Stop]) -> Result<()> {
    let mut ids = HashSet::new();
    for stop in stops {
        if !ids.insert(stop.id) {
            return Err(TravelyError::InvalidRoute {
                reason: format!("stop id {} is used more than once", stop.id),
            });
        }
    }

    let starts: Vec<u32> = stops.iter().filter(|s| s.is_start).map(|s| s.id).collect();
    match (stops.first(), starts.as_slice()) {
        (None, _) => {}
        (Some(_), []) => {
            return Err(TravelyError::InvalidRoute {
                reason: "no stop is marked as the start".to_string(),
            });
        }
        (Some(first), [only]) if *only == first.id => {}
        (Some(_), [only]) => {
            return Err(TravelyError::InvalidRoute {
                reason: format!("start stop {} is not the first stop", only),
            });
        }
        (Some(_), many) => {
            return Err(TravelyError::InvalidRoute {
                reason: format!("{} stops are marked as the start: {:?}", many.len(), many),
            });
        }
    }

    let mut previous: Option<(u32, DateSpan)> = None;
    for stop in stops {
        let Some(span) = stop.dates else { continue };
        check_span(&span, stop.nights).map_err(|reason| TravelyError::InvalidStop {
            stop_id: stop.id,
            reason,
        })?;
        if let Some((previous_id, previous_span)) = previous {
            if span.start < previous_span.end {
                return Err(TravelyError::InvalidStop {
                    stop_id: stop.id,
                    reason: format!(
                        "starts on {} before stop {} ends on {}",
                        span.start, previous_id, previous_span.end
                    ),
                });
            }
        }
        previous = Some((stop.id, span));
    }

    Ok(())
}

fn validate_ledger(ledger: &[PriceItem], stops: &[Stop]) -> Result<()> {
    let stop_ids: HashSet<u32> = stops.iter().map(|stop| stop.id).collect();
    let mut item_ids = HashSet::new();
    for item in ledger {
        if !item_ids.insert(item.id) {
            return Err(TravelyError::InvalidPriceItem {
                item_id: item.id,
                reason: "id is used more than once".to_string(),
            });
        }
        if let Some(stop_id) = item.stop_id {
            if !stop_ids.contains(&stop_id) {
                return Err(TravelyError::InvalidPriceItem {
                    item_id: item.id,
                    reason: format!("refers to stop {} which is not part of the route", stop_id),
                });
            }
        }
    }
    ledger
        .iter()
        .try_fold(0u64, |sum, item| sum.checked_add(item.price))
        .ok_or_else(|| TravelyError::InvalidRoute {
            reason: "itemized prices overflow the total".to_string(),
        })?;
    Ok(())
}

impl Route {
    /// Validates and assembles a route. Invalid input is rejected, never coerced.
    pub fn new(draft: RouteDraft) -> Result<Self> {
        validate_non_empty_string("route.title", &draft.title).map_err(|e| TravelyError::InvalidRoute {
            reason: e.to_string(),
        })?;
        if !draft.image_url.is_empty() {
            validate_url("route.image_url", &draft.image_url)?;
        }
        let total_price = validate_non_negative("route.total_price", draft.total_price)
            .map_err(|e| TravelyError::InvalidRoute { reason: e.to_string() })?;
        validate_stops(&draft.stops)?;
        validate_ledger(&draft.price_items, &draft.stops)?;

        let route = Self {
            id: draft.id,
            title: draft.title,
            description: draft.description,
            duration_label: draft.duration_label,
            total_price,
            image_url: draft.image_url,
            stops: draft.stops,
            ledger: draft.price_items,
        };
        tracing::debug!(
            "Route {} '{}' built with {} stops and {} price items",
            route.id,
            route.title,
            route.stops.len(),
            route.ledger.len()
        );
        Ok(route)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn duration_label(&self) -> &str {
        &self.duration_label
    }

    pub fn total_price(&self) -> u64 {
        self.total_price
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn price_items(&self) -> &[PriceItem] {
        &self.ledger
    }

    pub fn stop(&self, stop_id: u32) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.id == stop_id)
    }

    /// An empty route is a route that has not been planned yet.
    pub fn is_planned(&self) -> bool {
        !self.stops.is_empty()
    }

    /// Applies `change` to a copy of the route's mutable state and commits it
    /// only if the result still validates.
    pub(crate) fn transact<T>(&mut self, change: impl FnOnce(&mut Working) -> Result<T>) -> Result<T> {
        let mut working = Working {
            stops: self.stops.clone(),
            ledger: self.ledger.clone(),
            total_price: self.total_price,
        };
        let output = change(&mut working)?;
        validate_stops(&working.stops)?;
        validate_ledger(&working.ledger, &working.stops)?;

        self.stops = working.stops;
        self.ledger = working.ledger;
        self.total_price = working.total_price;
        Ok(output)
    }

    /// Inserts a stop at `position` (`0..=len`) and returns its new id.
    ///
    /// The draft's start flag is ignored: position 0 makes the stop the origin.
    pub fn insert_stop(&mut self, position: usize, draft: StopDraft) -> Result<u32> {
        let route_id = self.id;
        let stop_id = self.transact(|working| {
            let len = working.stops.len();
            if position > len {
                return Err(TravelyError::InvalidPosition { position, len });
            }
            let stop_id = working.next_stop_id()?;
            let stop = Stop::new(stop_id, draft)?;
            working.stops.insert(position, stop);
            working.reassign_start();
            Ok(stop_id)
        })?;
        tracing::info!("Route {}: inserted stop {} at position {}", route_id, stop_id, position);
        Ok(stop_id)
    }

    /// Changes a stop's night count and dates together.
    pub fn edit_stop(&mut self, stop_id: u32, nights: i64, dates: Option<DateSpan>) -> Result<()> {
        let route_id = self.id;
        self.transact(|working| {
            let index = working.stop_index(stop_id)?;
            let stop = &mut working.stops[index];
            stop.nights = u32::try_from(nights).map_err(|_| TravelyError::InvalidStop {
                stop_id,
                reason: format!("nights must be a non-negative count, got {}", nights),
            })?;
            stop.dates = dates;
            Ok(())
        })?;
        tracing::info!("Route {}: stop {} now has {} nights", route_id, stop_id, nights);
        Ok(())
    }

    /// Removes a stop together with the price items that depend on it.
    pub fn remove_stop(&mut self, stop_id: u32) -> Result<Vec<PriceItem>> {
        let route_id = self.id;
        let removed = self.transact(|working| {
            let index = working.stop_index(stop_id)?;
            working.stops.remove(index);
            working.reassign_start();

            let (removed, kept): (Vec<PriceItem>, Vec<PriceItem>) = std::mem::take(&mut working.ledger)
                .into_iter()
                .partition(|item| item.stop_id == Some(stop_id));
            working.ledger = kept;
            let removed_sum = ledger::itemized_sum(&removed);
            working.lower_total(removed_sum)?;
            Ok(removed)
        })?;
        tracing::info!(
            "Route {}: removed stop {} and {} dependent price items",
            route_id,
            stop_id,
            removed.len()
        );
        Ok(removed)
    }

    /// Appends a charge to the ledger and raises the stated total by its price.
    pub fn add_price_item(&mut self, item: impl Into<String>, price: i64, stop_id: Option<u32>) -> Result<u32> {
        let item = item.into();
        let item_id = self.transact(|working| {
            let item_id = working.next_item_id()?;
            let price_item = PriceItem::new(item_id, item, price, stop_id)?;
            working.raise_total(price_item.price)?;
            working.ledger.push(price_item);
            Ok(item_id)
        })?;
        tracing::debug!("Route {}: added price item {}", self.id, item_id);
        Ok(item_id)
    }

    /// Drops a charge from the ledger and lowers the stated total by its price.
    pub fn remove_price_item(&mut self, item_id: u32) -> Result<PriceItem> {
        let removed = self.transact(|working| {
            let index = working
                .ledger
                .iter()
                .position(|item| item.id == item_id)
                .ok_or(TravelyError::UnknownPriceItem { item_id })?;
            let removed = working.ledger.remove(index);
            working.lower_total(removed.price)?;
            Ok(removed)
        })?;
        tracing::debug!("Route {}: removed price item {}", self.id, item_id);
        Ok(removed)
    }

    /// Resets the stated total to the itemized sum and returns the prior reconciliation.
    pub fn recompute_total(&mut self) -> Reconciliation {
        let before = ledger::reconcile(self);
        if let Some(imbalance) = before.imbalance() {
            tracing::info!("Route {}: {}, stated total reset", self.id, imbalance);
        }
        self.total_price = before.expected;
        before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stop(id: u32, destination: &str, nights: i64, is_start: bool) -> Stop {
        let mut draft = StopDraft::new(destination, "Taiwan", nights);
        draft.is_start = is_start;
        Stop::new(id, draft).unwrap()
    }

    fn draft(stops: Vec<Stop>, price_items: Vec<PriceItem>, total_price: i64) -> RouteDraft {
        RouteDraft {
            id: 7,
            title: "Island hop".to_string(),
            description: String::new(),
            duration_label: "6 Days".to_string(),
            total_price,
            image_url: String::new(),
            stops,
            price_items,
        }
    }

    fn sample_route() -> Route {
        Route::new(draft(
            vec![
                stop(1, "Munich", 0, true),
                stop(2, "Taichung", 4, false),
                stop(3, "Taipei", 2, false),
            ],
            vec![
                PriceItem::new(1, "Taichung Accommodation", 360, Some(2)).unwrap(),
                PriceItem::new(2, "Taipei Accommodation", 180, Some(3)).unwrap(),
                PriceItem::new(3, "Service Fee", 60, None).unwrap(),
            ],
            600,
        ))
        .unwrap()
    }

    #[test]
    fn test_empty_route_is_valid() {
        let route = Route::new(draft(vec![], vec![], 0)).unwrap();
        assert!(!route.is_planned());
    }

    #[test]
    fn test_start_must_be_first() {
        let result = Route::new(draft(
            vec![stop(1, "Munich", 0, false), stop(2, "Taipei", 2, true)],
            vec![],
            0,
        ));
        assert!(matches!(result, Err(TravelyError::InvalidRoute { .. })));
    }

    #[test]
    fn test_missing_start_is_rejected() {
        let result = Route::new(draft(vec![stop(1, "Munich", 0, false)], vec![], 0));
        assert!(matches!(result, Err(TravelyError::InvalidRoute { .. })));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let result = Route::new(draft(
            vec![stop(1, "Munich", 0, true), stop(1, "Taipei", 2, false)],
            vec![],
            0,
        ));
        assert!(result.is_err());

        let result = Route::new(draft(
            vec![stop(1, "Munich", 0, true)],
            vec![
                PriceItem::new(1, "Fee", 10, None).unwrap(),
                PriceItem::new(1, "Fee again", 10, None).unwrap(),
            ],
            20,
        ));
        assert!(matches!(result, Err(TravelyError::InvalidPriceItem { item_id: 1, .. })));
    }

    #[test]
    fn test_negative_total_and_dangling_item_are_rejected() {
        assert!(Route::new(draft(vec![], vec![], -1)).is_err());

        let result = Route::new(draft(
            vec![stop(1, "Munich", 0, true)],
            vec![PriceItem::new(1, "Hotel", 10, Some(9)).unwrap()],
            10,
        ));
        assert!(matches!(result, Err(TravelyError::InvalidPriceItem { .. })));
    }

    #[test]
    fn test_out_of_order_dates_are_rejected() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        let first = Stop::new(
            1,
            StopDraft::new("Taichung", "Taiwan", 4)
                .starting()
                .with_dates(DateSpan::new(d(7), d(11)).unwrap()),
        )
        .unwrap();
        let second = Stop::new(
            2,
            StopDraft::new("Taipei", "Taiwan", 2).with_dates(DateSpan::new(d(9), d(11)).unwrap()),
        )
        .unwrap();
        let result = Route::new(draft(vec![first, second], vec![], 0));
        assert!(matches!(result, Err(TravelyError::InvalidStop { stop_id: 2, .. })));
    }

    #[test]
    fn test_insert_at_front_moves_origin() {
        let mut route = sample_route();
        let id = route.insert_stop(0, StopDraft::new("Frankfurt", "Germany", 0)).unwrap();
        assert_eq!(id, 4);
        assert_eq!(route.stops()[0].id(), 4);
        assert!(route.stops()[0].is_start());
        assert_eq!(route.stops().iter().filter(|s| s.is_start()).count(), 1);
    }

    #[test]
    fn test_insert_ignores_draft_start_flag() {
        let mut route = sample_route();
        route
            .insert_stop(3, StopDraft::new("Bali", "Indonesia", 10).starting())
            .unwrap();
        assert!(!route.stops()[3].is_start());
        assert!(route.stops()[0].is_start());
    }

    #[test]
    fn test_insert_past_end_is_rejected() {
        let mut route = sample_route();
        let before = route.clone();
        let err = route.insert_stop(9, StopDraft::new("Bali", "Indonesia", 10)).unwrap_err();
        assert!(matches!(err, TravelyError::InvalidPosition { position: 9, len: 3 }));
        assert_eq!(route, before);
    }

    #[test]
    fn test_insert_into_empty_route() {
        let mut route = Route::new(draft(vec![], vec![], 0)).unwrap();
        let id = route.insert_stop(0, StopDraft::new("Munich", "Germany", 0)).unwrap();
        assert_eq!(id, 1);
        assert!(route.stops()[0].is_start());
    }

    #[test]
    fn test_edit_with_negative_nights_leaves_route_untouched() {
        let mut route = sample_route();
        let before = route.clone();
        assert!(route.edit_stop(2, -1, None).is_err());
        assert_eq!(route, before);

        route.edit_stop(2, 3, None).unwrap();
        assert_eq!(route.stop(2).unwrap().nights(), 3);
    }

    #[test]
    fn test_edit_unknown_stop() {
        let mut route = sample_route();
        assert!(matches!(
            route.edit_stop(42, 1, None),
            Err(TravelyError::UnknownStop { stop_id: 42 })
        ));
    }

    #[test]
    fn test_remove_stop_takes_dependent_items() {
        let mut route = sample_route();
        let removed = route.remove_stop(2).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].item(), "Taichung Accommodation");
        assert_eq!(route.price_items().len(), 2);
        assert_eq!(route.total_price(), 240);
        assert!(ledger::reconcile(&route).balanced);
    }

    #[test]
    fn test_remove_origin_promotes_next_stop() {
        let mut route = sample_route();
        route.remove_stop(1).unwrap();
        assert_eq!(route.stops()[0].id(), 2);
        assert!(route.stops()[0].is_start());
    }

    #[test]
    fn test_ledger_changes_carry_existing_imbalance() {
        let mut route = sample_route();
        route.add_price_item("Visa & Documents", 120, None).unwrap();
        assert_eq!(route.total_price(), 720);

        let mut skewed = Route::new(draft(
            vec![stop(1, "Munich", 0, true)],
            vec![PriceItem::new(1, "Fee", 100, None).unwrap()],
            150,
        ))
        .unwrap();
        let id = skewed.add_price_item("Insurance", 95, None).unwrap();
        assert_eq!(id, 2);
        assert_eq!(skewed.total_price(), 245);
        assert!(!ledger::reconcile(&skewed).balanced);

        let removed = skewed.remove_price_item(1).unwrap();
        assert_eq!(removed.price(), 100);
        assert_eq!(skewed.total_price(), 145);
    }

    #[test]
    fn test_add_price_item_rejects_bad_input() {
        let mut route = sample_route();
        let before = route.clone();
        assert!(route.add_price_item("Refund", -10, None).is_err());
        assert!(route.add_price_item("Ferry", 40, Some(99)).is_err());
        assert!(route.remove_price_item(99).is_err());
        assert_eq!(route, before);
    }

    #[test]
    fn test_recompute_total_resets_to_itemized_sum() {
        let mut route = Route::new(draft(
            vec![stop(1, "Munich", 0, true)],
            vec![PriceItem::new(1, "Fee", 100, None).unwrap()],
            150,
        ))
        .unwrap();
        let before = route.recompute_total();
        assert_eq!((before.expected, before.actual, before.balanced), (100, 150, false));
        assert_eq!(route.total_price(), 100);
        assert!(ledger::reconcile(&route).balanced);
    }

    #[test]
    fn test_understated_total_is_not_clamped() {
        let understated = || {
            Route::new(draft(
                vec![stop(1, "Munich", 0, true), stop(2, "Taichung", 4, false)],
                vec![PriceItem::new(1, "Taichung Accommodation", 100, Some(2)).unwrap()],
                50,
            ))
            .unwrap()
        };

        let mut route = understated();
        let before = route.clone();
        assert!(matches!(route.remove_stop(2), Err(TravelyError::InvalidRoute { .. })));
        assert!(matches!(route.remove_price_item(1), Err(TravelyError::InvalidRoute { .. })));
        assert_eq!(route, before);
        assert_eq!(ledger::reconcile(&route).imbalance().unwrap().difference(), -50);

        // Once the total is reset the same removals go through.
        route.recompute_total();
        route.remove_stop(2).unwrap();
        assert_eq!(route.total_price(), 0);
        assert!(ledger::reconcile(&route).balanced);

        // A total that still covers the removed charge keeps its gap.
        let mut route = understated();
        route.add_price_item("Service Fee", 80, None).unwrap();
        route.remove_price_item(1).unwrap();
        assert_eq!(route.total_price(), 30);
        assert_eq!(ledger::reconcile(&route).imbalance().unwrap().difference(), -50);
    }

    #[test]
    fn test_exhausted_ids_are_an_error() {
        let mut route = Route::new(draft(
            vec![stop(u32::MAX, "Munich", 0, true)],
            vec![PriceItem::new(u32::MAX, "Fee", 10, None).unwrap()],
            10,
        ))
        .unwrap();
        let before = route.clone();
        assert!(matches!(
            route.insert_stop(1, StopDraft::new("Taipei", "Taiwan", 2)),
            Err(TravelyError::InvalidRoute { .. })
        ));
        assert!(matches!(
            route.add_price_item("Ferry", 40, None),
            Err(TravelyError::InvalidRoute { .. })
        ));
        assert_eq!(route, before);
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let mut route = Route::new(draft(
            vec![stop(1, "Munich", 0, true)],
            vec![PriceItem::new(1, "Fee", 1, None).unwrap()],
            i64::MAX,
        ))
        .unwrap();
        route.add_price_item("Charter", i64::MAX, None).unwrap();
        let before = route.clone();
        assert!(matches!(
            route.add_price_item("Charter", i64::MAX, None),
            Err(TravelyError::InvalidRoute { .. })
        ));
        assert_eq!(route, before);

        let items = (1..=3)
            .map(|id| PriceItem::new(id, "Charter", i64::MAX, None).unwrap())
            .collect();
        assert!(matches!(
            Route::new(draft(vec![], items, 0)),
            Err(TravelyError::InvalidRoute { .. })
        ));
    }

    #[test]
    fn test_mutations_cannot_overlap_neighbouring_dates() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        let dated = |id, name: &str, nights, from, to| {
            let span = DateSpan::new(d(from), d(to)).unwrap();
            let mut draft = StopDraft::new(name, "Taiwan", nights).with_dates(span);
            draft.is_start = id == 1;
            Stop::new(id, draft).unwrap()
        };
        let mut route = Route::new(draft(
            vec![
                dated(1, "Munich", 0, 7, 7),
                dated(2, "Taichung", 4, 7, 11),
                dated(3, "Taipei", 2, 11, 13),
            ],
            vec![],
            0,
        ))
        .unwrap();
        let before = route.clone();

        let tainan = StopDraft::new("Tainan", "Taiwan", 1).with_dates(DateSpan::new(d(9), d(10)).unwrap());
        assert!(matches!(
            route.insert_stop(2, tainan),
            Err(TravelyError::InvalidStop { stop_id: 4, .. })
        ));
        assert_eq!(route, before);

        let early = DateSpan::new(d(10), d(12)).unwrap();
        assert!(matches!(
            route.edit_stop(3, 2, Some(early)),
            Err(TravelyError::InvalidStop { stop_id: 3, .. })
        ));
        assert_eq!(route, before);

        let later = DateSpan::new(d(12), d(14)).unwrap();
        route.edit_stop(3, 2, Some(later)).unwrap();
        assert_eq!(route.stop(3).unwrap().dates(), Some(&later));
    }
}
