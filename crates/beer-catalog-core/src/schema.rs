//! Flat relational schema for the catalog table.
//!
//! [`COLUMNS`] is the single source of truth for the column order used by
//! DDL generation, inserts, and selects. [`FlatRow::cells`] yields values in
//! the same order.

use crate::models::FlatRow;

/// Semantic column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
}

impl ColumnKind {
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Real => "REAL",
            ColumnKind::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn col(name: &'static str, kind: ColumnKind) -> Column {
    Column { name, kind }
}

/// Name of the primary key column.
pub const PRIMARY_KEY: &str = "id";

pub const COLUMNS: &[Column] = &[
    col("id", ColumnKind::Integer),
    col("name", ColumnKind::Text),
    col("tagline", ColumnKind::Text),
    col("first_brewed", ColumnKind::Text),
    col("description", ColumnKind::Text),
    col("image_url", ColumnKind::Text),
    col("abv", ColumnKind::Real),
    col("ibu", ColumnKind::Real),
    col("target_fg", ColumnKind::Real),
    col("target_og", ColumnKind::Real),
    col("ebc", ColumnKind::Real),
    col("srm", ColumnKind::Real),
    col("ph", ColumnKind::Real),
    col("attenuation_level", ColumnKind::Real),
    col("volume_value", ColumnKind::Real),
    col("volume_unit", ColumnKind::Text),
    col("boil_volume_value", ColumnKind::Real),
    col("boil_volume_unit", ColumnKind::Text),
    col("mash_temp_value", ColumnKind::Real),
    col("mash_temp_unit", ColumnKind::Text),
    col("mash_temp_duration", ColumnKind::Real),
    col("fermentation_temp_value", ColumnKind::Real),
    col("fermentation_temp_unit", ColumnKind::Text),
    col("twist", ColumnKind::Text),
    col("malt", ColumnKind::Text),
    col("food_pairing", ColumnKind::Text),
    col("brewers_tips", ColumnKind::Text),
    col("contributed_by", ColumnKind::Text),
];

/// One column value of a [`FlatRow`], in [`COLUMNS`] order.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Integer(i64),
    Real(Option<f64>),
    Text(Option<&'a str>),
}

/// Comma-separated column list, e.g. for `SELECT` and `INSERT`.
pub fn column_list() -> String {
    COLUMNS
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `CREATE TABLE` statement for the catalog table.
///
/// `table` is interpolated verbatim; callers validate it as an identifier.
pub fn create_table_sql(table: &str) -> String {
    let defs: Vec<String> = COLUMNS
        .iter()
        .map(|c| {
            if c.name == PRIMARY_KEY {
                format!("{} {} PRIMARY KEY NOT NULL", c.name, c.kind.sql_type())
            } else {
                format!("{} {}", c.name, c.kind.sql_type())
            }
        })
        .collect();
    format!("CREATE TABLE {} (\n    {}\n)", table, defs.join(",\n    "))
}

/// `INSERT` statement with one `?` placeholder per column.
pub fn insert_sql(table: &str) -> String {
    let placeholders = vec!["?"; COLUMNS.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        column_list(),
        placeholders
    )
}

/// Returns true if `name` is safe to interpolate as a table name.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FlatRow {
    /// Column values in [`COLUMNS`] order.
    pub fn cells(&self) -> Vec<Cell<'_>> {
        use Cell::{Integer, Real, Text};
        vec![
            Integer(self.id),
            Text(self.name.as_deref()),
            Text(self.tagline.as_deref()),
            Text(self.first_brewed.as_deref()),
            Text(self.description.as_deref()),
            Text(self.image_url.as_deref()),
            Real(self.abv),
            Real(self.ibu),
            Real(self.target_fg),
            Real(self.target_og),
            Real(self.ebc),
            Real(self.srm),
            Real(self.ph),
            Real(self.attenuation_level),
            Real(self.volume_value),
            Text(self.volume_unit.as_deref()),
            Real(self.boil_volume_value),
            Text(self.boil_volume_unit.as_deref()),
            Real(self.mash_temp_value),
            Text(self.mash_temp_unit.as_deref()),
            Real(self.mash_temp_duration),
            Real(self.fermentation_temp_value),
            Text(self.fermentation_temp_unit.as_deref()),
            Text(self.twist.as_deref()),
            Text(self.malt.as_deref()),
            Text(self.food_pairing.as_deref()),
            Text(self.brewers_tips.as_deref()),
            Text(self.contributed_by.as_deref()),
        ]
    }
}
