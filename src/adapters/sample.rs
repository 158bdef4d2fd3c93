use crate::domain::model::{
    DateSpan, Destination, Money, PriceItem, PriceTier, Route, RouteDraft, Stay, Stop, StopDraft, Transport,
    TransportLeg,
};
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Built-in demo data: the "Asia Adventure" route, its stays and the popular destinations.
///
/// Build one at startup and hand out references; it never changes afterwards.
#[derive(Debug, Clone)]
pub struct SampleData {
    route: Route,
    stays: Vec<Stay>,
    destinations: Vec<Destination>,
}

impl SampleData {
    pub fn new() -> Result<Self> {
        let data = Self {
            route: featured_route()?,
            stays: accommodations()?,
            destinations: popular_destinations(),
        };
        tracing::debug!(
            "Sample data ready: {} stops, {} stays, {} destinations",
            data.route.stops().len(),
            data.stays.len(),
            data.destinations.len()
        );
        Ok(data)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }
}

impl CatalogSource for SampleData {
    fn destinations(&self) -> Result<Vec<Destination>> {
        Ok(self.destinations.clone())
    }

    fn stays(&self) -> Result<Vec<Stay>> {
        Ok(self.stays.clone())
    }

    fn featured_route(&self) -> Result<Route> {
        Ok(self.route.clone())
    }
}

fn march(day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .ok_or_else(|| crate::utils::error::TravelyError::validation(format!("invalid sample date 2024-03-{}", day)))
}

fn span(from: u32, to: u32) -> Result<DateSpan> {
    DateSpan::new(march(from)?, march(to)?)
}

fn flight(route: &str, duration: &str, fare: u64) -> Transport {
    Transport::Flight(TransportLeg {
        route: route.to_string(),
        duration: duration.to_string(),
        fare: Some(Money::eur(fare)),
    })
}

fn train(route: &str, duration: &str, fare: u64) -> Transport {
    Transport::Train(TransportLeg {
        route: route.to_string(),
        duration: duration.to_string(),
        fare: Some(Money::eur(fare)),
    })
}

fn featured_route() -> Result<Route> {
    let legs = [
        ("Munich", "Germany", "🇩🇪", 0, flight("Munich → Taipei", "11h 30m", 589), (7, 7)),
        ("Taipei", "Taiwan", "🇹🇼", 0, train("Munich → Taipei", "11h 30m", 589), (7, 7)),
        ("Taichung", "Taiwan", "🇹🇼", 4, train("Taipei → Taichung", "1h 15m", 25), (7, 11)),
        ("Taipei", "Taiwan", "🇹🇼", 2, flight("Taichung → Taipei", "1h 15m", 25), (11, 13)),
        ("Bali", "Indonesia", "🇮🇩", 10, flight("Taipei → Bali", "5h 30m", 445), (13, 23)),
        ("Kuala Lumpur", "Malaysia", "🇲🇾", 1, flight("Bali → Kuala Lumpur", "2h 15m", 198), (23, 24)),
        ("Bangkok", "Thailand", "🇹🇭", 5, flight("Kuala Lumpur → Bangkok", "1h 45m", 298), (24, 29)),
        ("Munich", "Germany", "🇩🇪", 0, flight("Bangkok → Munich", "11h 30m", 589), (29, 29)),
    ];

    let mut stops = Vec::with_capacity(legs.len());
    for (index, (destination, country, symbol, nights, transport, (from, to))) in legs.into_iter().enumerate() {
        let mut draft = StopDraft::new(destination, country, nights)
            .with_symbol(symbol)
            .with_transport(transport)
            .with_dates(span(from, to)?);
        draft.is_start = index == 0;
        stops.push(Stop::new(index as u32 + 1, draft)?);
    }

    let items = [
        ("Taichung Accommodation (4 nights)", 360, Some(3)),
        ("Taipei Accommodation (2 nights)", 180, Some(4)),
        ("Bali Accommodation (10 nights)", 650, Some(5)),
        ("Bangkok Accommodation (5 nights)", 400, Some(7)),
        ("Munich → Taichung Flight", 589, Some(3)),
        ("Taichung → Taipei Train", 89, Some(4)),
        ("Taipei → Bali Flight", 445, Some(5)),
        ("Bali → Bangkok Flight", 298, Some(7)),
        ("Travel Insurance", 95, None),
        ("Visa & Documents", 120, None),
        ("Service Fee", 252, None),
    ];
    let price_items = items
        .into_iter()
        .enumerate()
        .map(|(index, (label, price, stop_id))| PriceItem::new(index as u32 + 1, label, price, stop_id))
        .collect::<Result<Vec<_>>>()?;

    Route::new(RouteDraft {
        id: 1,
        title: "Asia Adventure".to_string(),
        description: "Experience the best of Taiwan and Southeast Asia with this amazing 21-day journey \
                      through Taichung, Taipei, Bali, and Bangkok."
            .to_string(),
        duration_label: "21 Days".to_string(),
        total_price: 3488,
        image_url: "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=600&h=400&fit=crop&crop=center"
            .to_string(),
        stops,
        price_items,
    })
}

fn accommodations() -> Result<Vec<Stay>> {
    let amenities = |list: &[&str]| list.iter().map(|a| a.to_string()).collect::<Vec<_>>();

    Ok(vec![
        Stay {
            id: 1,
            name: "Taichung City Hotel".to_string(),
            location: "Taichung, Taiwan".to_string(),
            country_symbol: "🇹🇼".to_string(),
            dates: span(7, 11)?,
            nights: 4,
            price: 360,
            rating: 4.2,
            image_url: "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=400&h=300&fit=crop".to_string(),
            amenities: amenities(&["WiFi", "Pool", "Gym", "Restaurant"]),
            description: "Modern hotel in the heart of Taichung with excellent city views and convenient access \
                          to public transportation."
                .to_string(),
        },
        Stay {
            id: 2,
            name: "Taipei Boutique Hotel".to_string(),
            location: "Taipei, Taiwan".to_string(),
            country_symbol: "🇹🇼".to_string(),
            dates: span(11, 13)?,
            nights: 2,
            price: 180,
            rating: 4.5,
            image_url: "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=400&h=300&fit=crop".to_string(),
            amenities: amenities(&["WiFi", "Breakfast", "Concierge"]),
            description: "Charming boutique hotel in Taipei's historic district with traditional Taiwanese \
                          architecture."
                .to_string(),
        },
        Stay {
            id: 3,
            name: "Bali Resort & Spa".to_string(),
            location: "Ubud, Bali".to_string(),
            country_symbol: "🇮🇩".to_string(),
            dates: span(13, 23)?,
            nights: 10,
            price: 650,
            rating: 4.8,
            image_url: "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=400&h=300&fit=crop".to_string(),
            amenities: amenities(&["WiFi", "Pool", "Spa", "Restaurant", "Beach Access"]),
            description: "Luxury resort in Ubud with stunning rice terrace views, world-class spa, and authentic \
                          Balinese experiences."
                .to_string(),
        },
        Stay {
            id: 4,
            name: "Bangkok City Hotel".to_string(),
            location: "Bangkok, Thailand".to_string(),
            country_symbol: "🇹🇭".to_string(),
            dates: span(24, 29)?,
            nights: 5,
            price: 400,
            rating: 4.3,
            image_url: "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=400&h=300&fit=crop".to_string(),
            amenities: amenities(&["WiFi", "Pool", "Gym", "Restaurant", "Rooftop Bar"]),
            description: "Contemporary hotel in Bangkok's business district with panoramic city views and \
                          excellent dining options."
                .to_string(),
        },
    ])
}

fn popular_destinations() -> Vec<Destination> {
    let entries = [
        (
            "Tokyo",
            "Japan",
            "🇯🇵",
            "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=400&h=300&fit=crop",
            "Modern metropolis blending traditional culture with cutting-edge technology",
            4.7,
            PriceTier::Premium,
        ),
        (
            "Paris",
            "France",
            "🇫🇷",
            "https://images.unsplash.com/photo-1502602898536-47ad22581b52?w=400&h=300&fit=crop",
            "City of Light with world-class art, cuisine, and romantic atmosphere",
            4.6,
            PriceTier::Premium,
        ),
        (
            "Bali",
            "Indonesia",
            "🇮🇩",
            "https://images.unsplash.com/photo-1537953773345-d172ccf13cf1?w=400&h=300&fit=crop",
            "Tropical paradise with stunning beaches, temples, and vibrant culture",
            4.8,
            PriceTier::Moderate,
        ),
        (
            "New York",
            "USA",
            "🇺🇸",
            "https://images.unsplash.com/photo-1563492065-1a120d5d8b96?w=400&h=300&fit=crop",
            "The Big Apple - never sleeps with endless entertainment and iconic landmarks",
            4.5,
            PriceTier::Luxury,
        ),
        (
            "Barcelona",
            "Spain",
            "🇪🇸",
            "https://images.unsplash.com/photo-1502602898536-47ad22581b52?w=400&h=300&fit=crop",
            "Architectural marvels, Mediterranean beaches, and vibrant nightlife",
            4.6,
            PriceTier::Premium,
        ),
        (
            "Sydney",
            "Australia",
            "🇦🇺",
            "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=400&h=300&fit=crop",
            "Harbor city with iconic Opera House and stunning coastal scenery",
            4.7,
            PriceTier::Luxury,
        ),
    ];

    entries
        .into_iter()
        .enumerate()
        .map(
            |(index, (name, country, symbol, image_url, description, rating, price_range))| Destination {
                id: index as u32 + 1,
                name: name.to_string(),
                country: country.to_string(),
                country_symbol: symbol.to_string(),
                image_url: image_url.to_string(),
                description: description.to_string(),
                rating,
                price_range,
            },
        )
        .collect()
}
