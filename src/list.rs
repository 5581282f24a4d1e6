//! Filtered listing for the `beers list` CLI command.

use anyhow::Result;
use std::sync::Arc;

use beer_catalog_core::filter::FilterSet;
use beer_catalog_core::repository::CatalogRepository;

use crate::config::Config;
use crate::db;
use crate::get::fmt_num;

pub async fn run_list(config: &Config, filters: FilterSet, json: bool) -> Result<()> {
    let store = Arc::new(db::open_store(config).await?);
    let repo = CatalogRepository::new(Arc::clone(&store));
    let result = repo.list(&filters).await;
    store.close().await;
    let beers = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&beers)?);
        return Ok(());
    }

    if beers.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for beer in &beers {
        println!(
            "{:>5}  {:<40}  abv {:<5}  ibu {:<6}  malt: {}",
            beer.id,
            beer.name.as_deref().unwrap_or("(unnamed)"),
            fmt_num(beer.abv),
            fmt_num(beer.ibu),
            beer.malt.as_deref().unwrap_or("-"),
        );
    }
    println!("{} beers", beers.len());
    Ok(())
}
