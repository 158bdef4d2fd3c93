use std::io::Write;
use tempfile::NamedTempFile;
use travely::core::schedule;
use travely::{AppConfig, CatalogView, Region, RegionFilter, TravelyError};

const CATALOG: &str = r#"
[[destinations]]
id = 1
name = "Reykjavik"
country = "Iceland"
image_url = "https://example.com/reykjavik.jpg"
rating = 4.6
price_range = "luxury"

[[destinations]]
id = 2
name = "Kyoto"
country = "Japan"
image_url = "https://example.com/kyoto.jpg"
rating = 4.8
price_range = "€€€"

[[destinations]]
id = 3
name = "Atlantis"
country = "Atlantis"
image_url = "https://example.com/atlantis.jpg"
rating = 3.0
price_range = "budget"

[route]
id = 1
title = "North"
total_price = 900

[[route.stops]]
id = 1
destination = "Munich"
country = "Germany"
is_start = true
nights = 0

[[route.stops]]
id = 2
destination = "Reykjavik"
country = "Iceland"
nights = 5

[[route.price_items]]
id = 1
item = "Reykjavik Accommodation (5 nights)"
price = 900
stop_id = 2
"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_catalog_through_config() {
    let catalog_file = write_temp(CATALOG);
    let config_text = format!(
        "[catalog]\nsource = \"file\"\npath = \"{}\"\ndefault_region = \"Europe\"\n\n[regions]\nIceland = \"Europe\"\n\n[planning]\nplanned_nights = 4\nstart_date = \"2024-06-01\"\n",
        catalog_file.path().display()
    );
    let config_file = write_temp(&config_text);

    let config = AppConfig::load(Some(config_file.path())).unwrap();
    travely::utils::validation::Validate::validate(&config).unwrap();

    let classifier = config.region_classifier().unwrap();
    let source = config.catalog_source().unwrap();
    let mut view = CatalogView::from_source(&classifier, source.as_ref()).unwrap();

    view.set_region(config.default_region().unwrap());
    let names: Vec<&str> = view.results().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Reykjavik"]);

    view.set_region(RegionFilter::Only(Region::Unclassified));
    let names: Vec<&str> = view.results().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Atlantis"]);

    let mut route = source.featured_route().unwrap();
    schedule::cascade_dates(&mut route, config.start_date().unwrap()).unwrap();
    let total = schedule::total_nights(&route);
    assert_eq!(total, 5);
    assert!(config.nights_budget().is_over(total));
    assert_eq!(config.nights_budget().remaining(total), -1);
}

#[test]
fn test_missing_catalog_file_surfaces_as_unavailable() {
    let config = AppConfig::from_toml_str("[catalog]\nsource = \"file\"\npath = \"/no/such/catalog.toml\"\n").unwrap();
    assert!(matches!(
        config.catalog_source(),
        Err(TravelyError::CatalogUnavailable { .. })
    ));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let result = AppConfig::load(Some(std::path::Path::new("/no/such/travely.toml")));
    assert!(matches!(result, Err(TravelyError::IoError(_))));
}
