//! Nested document → flat row.
//!
//! Every column is read through a JSON pointer into the source document.
//! Text columns accept JSON strings only and real columns accept JSON numbers
//! only; anything else, including a missing path or an empty array, yields
//! `None`. The same rule applies to every column, nested or not.
//!
//! The one derived ingredient column is `malt`: the name of the first malt
//! entry. Hops and yeast are not carried into the flat row.

use serde_json::Value;

use crate::error::DocumentError;
use crate::models::{FlatRow, RawDocument};

/// Flattens one document into a row.
///
/// Fails only when the document is not an object or has no integer `id`.
pub fn flatten(doc: &RawDocument) -> Result<FlatRow, DocumentError> {
    let body = &doc.body;
    if !body.is_object() {
        return Err(DocumentError::NotAnObject);
    }
    let id = body
        .get("id")
        .and_then(Value::as_i64)
        .ok_or(DocumentError::MissingId)?;

    let text = |pointer: &str| body.pointer(pointer).and_then(as_text);
    let real = |pointer: &str| body.pointer(pointer).and_then(Value::as_f64);

    Ok(FlatRow {
        id,
        name: text("/name"),
        tagline: text("/tagline"),
        first_brewed: text("/first_brewed"),
        description: text("/description"),
        image_url: text("/image_url"),
        abv: real("/abv"),
        ibu: real("/ibu"),
        target_fg: real("/target_fg"),
        target_og: real("/target_og"),
        ebc: real("/ebc"),
        srm: real("/srm"),
        ph: real("/ph"),
        attenuation_level: real("/attenuation_level"),
        volume_value: real("/volume/value"),
        volume_unit: text("/volume/unit"),
        boil_volume_value: real("/boil_volume/value"),
        boil_volume_unit: text("/boil_volume/unit"),
        mash_temp_value: real("/method/mash_temp/0/temp/value"),
        mash_temp_unit: text("/method/mash_temp/0/temp/unit"),
        mash_temp_duration: real("/method/mash_temp/0/duration"),
        fermentation_temp_value: real("/method/fermentation/temp/value"),
        fermentation_temp_unit: text("/method/fermentation/temp/unit"),
        twist: text("/method/twist"),
        malt: text("/ingredients/malt/0/name"),
        food_pairing: text("/food_pairing/0"),
        brewers_tips: text("/brewers_tips"),
        contributed_by: text("/contributed_by"),
    })
}

fn as_text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}
