use clap::Parser;
use travely::core::{ledger, schedule, stays};
use travely::utils::error::ErrorSeverity;
use travely::utils::{logger, validation::Validate};
use travely::{AppConfig, CatalogView, CliConfig, Command, Region, RegionFilter, TravelyError};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Load configuration before logging so it can pick the format
    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // Initialize logging
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting travely");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli.command, &config) {
        // Log the details, then a short message for the user
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // Exit code follows severity
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2, // catalog unavailable
            ErrorSeverity::High => 1,   // invalid data or config
            ErrorSeverity::Critical => 3, // io or serialization
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run(command: &Command, config: &AppConfig) -> Result<(), TravelyError> {
    // Shared by every command: region table and data provider
    let classifier = config.region_classifier()?;
    let source = config.catalog_source()?;

    match command {
        Command::Destinations { region, query, json } => {
            let region = match region {
                Some(region) => region.parse::<RegionFilter>()?,
                None => config.default_region()?,
            };
            // Filter
            let mut view = CatalogView::from_source(&classifier, source.as_ref())?;
            view.set_region(region);
            view.set_query(query.as_str());
            let results = view.results();

            if *json {
                println!("{}", serde_json::to_string_pretty(results)?);
            } else if results.is_empty() {
                println!("No destinations match region {} and query {:?}", region, query);
            } else {
                for destination in results {
                    println!(
                        "{} {:<12} {:<12} {:<10} ★ {:.1}  {}",
                        destination.country_symbol,
                        destination.name,
                        destination.country,
                        classifier.classify(&destination.country),
                        destination.rating,
                        destination.price_range
                    );
                }
            }
        }
        Command::Breakdown { csv } => {
            let route = source.featured_route()?;
            if *csv {
                travely::adapters::export::write_breakdown_csv(&route, std::io::stdout().lock())?;
            } else {
                println!("{} ({})", route.title(), route.duration_label());
                for item in ledger::list_items(&route) {
                    println!("  {:<40} {:>6}", item.item(), item.price());
                }
                let reconciliation = ledger::reconcile_and_report(&route);
                println!("  {:<40} {:>6}", "Itemized total", reconciliation.expected);
                println!("  {:<40} {:>6}", "Stated total", reconciliation.actual);
            }
        }
        Command::Reconcile => {
            let route = source.featured_route()?;
            let reconciliation = ledger::reconcile_and_report(&route);
            match reconciliation.imbalance() {
                Some(imbalance) => println!("⚠️ {}: {}", route.title(), imbalance),
                None => println!("✅ {}: balanced at {}", route.title(), reconciliation.actual),
            }
        }
        Command::Schedule { start } => {
            let mut route = source.featured_route()?;
            if let Some(start) = start.or(config.start_date()) {
                schedule::cascade_dates(&mut route, start)?;
            }
            let all_stays = source.stays()?;

            for (position, stop) in route.stops().iter().enumerate() {
                let transport = match stop.transport().leg() {
                    Some(leg) => match &leg.fare {
                        Some(fare) => format!("{} ({}, {})", leg.route, leg.duration, fare),
                        None => format!("{} ({})", leg.route, leg.duration),
                    },
                    None => String::new(),
                };
                println!(
                    "{:>2}. {} {:<14} {:<26} {:<8} {}",
                    position + 1,
                    stop.country_symbol(),
                    stop.destination(),
                    schedule::stop_date_label(stop),
                    schedule::duration_label(stop.nights()),
                    transport
                );
                for stay in stays::stays_for_stop(&all_stays, stop) {
                    println!("      🏨 {} ({} nights, {})", stay.name, stay.nights, stay.price);
                }
            }

            // Nights against the planned budget
            let budget = config.nights_budget();
            let total = schedule::total_nights(&route);
            println!(
                "Nights: {}/{} ({:.0}%){}",
                total,
                budget.planned,
                budget.progress(total) * 100.0,
                if budget.is_over(total) { " over budget" } else { "" }
            );
            if budget.is_over(total) {
                tracing::warn!(
                    "⚠️ Route {} exceeds the planned {} nights by {}",
                    route.id(),
                    budget.planned,
                    -budget.remaining(total)
                );
            }
        }
        Command::Regions { region } => {
            let region: Region = region.parse()?;
            for country in classifier.countries_in(region) {
                println!("{}", country);
            }
        }
    }

    Ok(())
}
