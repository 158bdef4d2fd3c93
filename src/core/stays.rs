use crate::domain::model::{Stay, Stop};

/// Stays booked at a stop: the location names the stop's destination and the
/// dates overlap. Unscheduled and zero-night stops have no stays.
pub fn stays_for_stop<'a>(stays: &'a [Stay], stop: &Stop) -> Vec<&'a Stay> {
    let Some(span) = stop.dates() else {
        return Vec::new();
    };
    let destination = stop.destination().to_lowercase();
    stays
        .iter()
        .filter(|stay| stay.location.to_lowercase().contains(&destination))
        .filter(|stay| stay.dates.overlaps(span))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DateSpan, StopDraft};
    use chrono::NaiveDate;

    fn span(from: u32, to: u32) -> DateSpan {
        DateSpan::new(
            NaiveDate::from_ymd_opt(2024, 3, from).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, to).unwrap(),
        )
        .unwrap()
    }

    fn stay(id: u32, location: &str, dates: DateSpan) -> Stay {
        Stay {
            id,
            name: format!("Hotel {}", id),
            location: location.to_string(),
            country_symbol: String::new(),
            dates,
            nights: dates.nights() as u32,
            price: 100,
            rating: 4.0,
            image_url: "https://example.com/h.jpg".to_string(),
            amenities: vec![],
            description: String::new(),
        }
    }

    #[test]
    fn test_matches_by_destination_and_overlap() {
        let stays = vec![
            stay(1, "Ubud, Bali", span(13, 23)),
            stay(2, "Bangkok, Thailand", span(24, 29)),
            stay(3, "Seminyak, Bali", span(1, 5)),
        ];
        let stop = Stop::new(5, StopDraft::new("Bali", "Indonesia", 10).with_dates(span(13, 23))).unwrap();
        let found: Vec<u32> = stays_for_stop(&stays, &stop).iter().map(|s| s.id).collect();
        assert_eq!(found, vec![1]);
    }

    #[test]
    fn test_transit_and_unscheduled_stops_have_no_stays() {
        let stays = vec![stay(1, "Taipei, Taiwan", span(11, 13))];
        let transit = Stop::new(2, StopDraft::new("Taipei", "Taiwan", 0).with_dates(span(11, 11))).unwrap();
        assert!(stays_for_stop(&stays, &transit).is_empty());

        let unscheduled = Stop::new(4, StopDraft::new("Taipei", "Taiwan", 2)).unwrap();
        assert!(stays_for_stop(&stays, &unscheduled).is_empty());
    }
}
