//! Beer retrieval by id for the `beers get` CLI command.

use anyhow::Result;
use std::sync::Arc;

use beer_catalog_core::error::CatalogError;
use beer_catalog_core::models::FlatRow;
use beer_catalog_core::repository::CatalogRepository;

use crate::config::Config;
use crate::db;

/// CLI entry point — looks up one beer and prints it to stdout.
///
/// A missing id prints `Error: beer not found: <id>` and exits with status 1.
pub async fn run_get(config: &Config, id: i64, json: bool) -> Result<()> {
    let store = Arc::new(db::open_store(config).await?);
    let repo = CatalogRepository::new(Arc::clone(&store));
    let result = repo.get_by_id(id).await;
    store.close().await;

    let beer = match result {
        Ok(beer) => beer,
        Err(e @ CatalogError::NotFound(_)) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&beer)?);
    } else {
        print_beer(&beer);
    }
    Ok(())
}

fn print_beer(beer: &FlatRow) {
    println!("--- Beer ---");
    println!("id:           {}", beer.id);
    println!("name:         {}", beer.name.as_deref().unwrap_or("(unnamed)"));
    if let Some(ref tagline) = beer.tagline {
        println!("tagline:      {}", tagline);
    }
    if let Some(ref first_brewed) = beer.first_brewed {
        println!("first_brewed: {}", first_brewed);
    }
    println!("abv:          {}", fmt_num(beer.abv));
    println!("ibu:          {}", fmt_num(beer.ibu));
    println!("malt:         {}", beer.malt.as_deref().unwrap_or("-"));
    println!("food_pairing: {}", beer.food_pairing.as_deref().unwrap_or("-"));
    if let (Some(value), Some(unit)) = (beer.mash_temp_value, beer.mash_temp_unit.as_deref()) {
        println!("mash_temp:    {} {}", value, unit);
    }
    if let Some(ref description) = beer.description {
        println!();
        println!("{}", description);
    }
}

pub(crate) fn fmt_num(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
