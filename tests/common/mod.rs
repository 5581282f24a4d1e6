//! Shared fixtures for integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn punk_ipa() -> Value {
    json!({
        "id": 1,
        "name": "Punk IPA",
        "tagline": "Post Modern Classic. Spiky. Tropical. Hoppy.",
        "first_brewed": "04/2007",
        "abv": 5.6,
        "ibu": 40,
        "volume": { "value": 20, "unit": "litres" },
        "boil_volume": { "value": 25, "unit": "litres" },
        "method": {
            "mash_temp": [{ "temp": { "value": 66, "unit": "celsius" }, "duration": 75 }],
            "fermentation": { "temp": { "value": 19, "unit": "celsius" } },
            "twist": null
        },
        "ingredients": {
            "malt": [{ "name": "Extra Pale", "amount": { "value": 5.3, "unit": "kilograms" } }],
            "hops": [{ "name": "Ahtanum", "amount": { "value": 17.5, "unit": "grams" } }],
            "yeast": "Wyeast 1056 - American Ale™"
        },
        "food_pairing": ["Pizza with spicy pepperoni", "Fish tacos"],
        "brewers_tips": "Dry hop at 14C.",
        "contributed_by": "Sam Mason <samjbmason>"
    })
}

pub fn nitro() -> Value {
    json!({
        "id": 2,
        "name": "Nitro Stout",
        "abv": 4.1,
        "ibu": 35,
        "method": { "mash_temp": [] },
        "ingredients": {
            "malt": [{ "name": "Chocolate", "amount": { "value": 0.5, "unit": "kilograms" } }]
        },
        "food_pairing": []
    })
}

pub fn dead_pony() -> Value {
    json!({
        "id": 3,
        "name": "Dead Pony Club",
        "ibu": 40,
        "ingredients": {
            "malt": [{ "name": "Pale Ale", "amount": { "value": 2.0, "unit": "kilograms" } }]
        },
        "food_pairing": ["Cheese board"]
    })
}

/// Writes one `<id>.json` file per document under `root/data`.
pub fn write_documents(root: &Path, docs: &[Value]) -> PathBuf {
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();
    for (i, doc) in docs.iter().enumerate() {
        let name = match doc.get("id") {
            Some(id) => format!("{}.json", id),
            None => format!("doc-{}.json", i),
        };
        fs::write(data_dir.join(name), serde_json::to_string_pretty(doc).unwrap()).unwrap();
    }
    data_dir
}

pub fn config_toml(root: &Path, bind: &str, wait_for_migration: bool) -> String {
    format!(
        r#"[db]
path = "{root}/db/beers.sqlite"

[source]
root = "{root}/data"

[migration]
concurrency = 4

[server]
bind = "{bind}"
wait_for_migration = {wait}
"#,
        root = root.display(),
        bind = bind,
        wait = wait_for_migration
    )
}

/// Temp dir with the three fixture beers and a config file.
pub fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();
    write_documents(&root, &[punk_ipa(), nitro(), dead_pony()]);

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let config_path = config_dir.join("beers.toml");
    fs::write(&config_path, config_toml(&root, "127.0.0.1:0", true)).unwrap();

    (tmp, config_path)
}
