//! Core data models for the beer catalog.
//!
//! A [`RawDocument`] is one nested JSON record as read from the document
//! source. A [`FlatRow`] is the normalized single-table record the store
//! persists and the HTTP surface returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One nested catalog document, as produced by a document source.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Where the document came from (file path, or `"inline"`).
    pub origin: String,
    pub body: Value,
}

impl RawDocument {
    pub fn new(origin: impl Into<String>, body: Value) -> Self {
        Self {
            origin: origin.into(),
            body,
        }
    }

    /// Wraps a document that has no meaningful origin (tests, fixtures).
    pub fn inline(body: Value) -> Self {
        Self::new("inline", body)
    }
}

/// Normalized beer record. Field names match the column names in
/// [`crate::schema::COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub id: i64,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub first_brewed: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub abv: Option<f64>,
    pub ibu: Option<f64>,
    pub target_fg: Option<f64>,
    pub target_og: Option<f64>,
    pub ebc: Option<f64>,
    pub srm: Option<f64>,
    pub ph: Option<f64>,
    pub attenuation_level: Option<f64>,
    pub volume_value: Option<f64>,
    pub volume_unit: Option<String>,
    pub boil_volume_value: Option<f64>,
    pub boil_volume_unit: Option<String>,
    pub mash_temp_value: Option<f64>,
    pub mash_temp_unit: Option<String>,
    pub mash_temp_duration: Option<f64>,
    pub fermentation_temp_value: Option<f64>,
    pub fermentation_temp_unit: Option<String>,
    pub twist: Option<String>,
    /// Name of the first malt entry.
    pub malt: Option<String>,
    /// First food pairing.
    pub food_pairing: Option<String>,
    pub brewers_tips: Option<String>,
    pub contributed_by: Option<String>,
}
