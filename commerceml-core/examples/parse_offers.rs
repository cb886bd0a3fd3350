//! Stream an offers file and print what comes out.
//!
//! Usage: cargo run --example parse_offers -- path/to/offers.xml

use std::fs::File;
use std::io::BufReader;

use commerceml_core::commerceml::OffersParser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: parse_offers <offers.xml>")?;

    let mut parser = OffersParser::new();

    parser.on_offers_package(|pkg| {
        println!("package {} ({} price types)", pkg.id, pkg.price_types.len());
    });
    parser.on_warehouse(|wh| {
        println!("warehouse {}: {}", wh.id, wh.name);
    });
    parser.on_offer(|offer| {
        let price = offer
            .prices
            .first()
            .map(|p| p.price_per_unit.as_str())
            .unwrap_or("-");
        println!("offer {}: {} @ {}", offer.id, offer.name, price);
    });
    parser.on_commercial_information(|info| {
        println!(
            "document: schema {} created {}",
            info.schema_version, info.creation_timestamp
        );
    });

    parser.parse(BufReader::new(File::open(path)?))?;
    Ok(())
}
