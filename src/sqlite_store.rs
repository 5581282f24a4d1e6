//! SQLite-backed [`CatalogStore`] implementation.
//!
//! Column lists, DDL, and the insert statement come from
//! [`beer_catalog_core::schema`]; list filters come from
//! [`FilterSet::build`] and are bound as parameters.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use beer_catalog_core::filter::{FilterSet, Param};
use beer_catalog_core::models::FlatRow;
use beer_catalog_core::schema::{self, Cell};
use beer_catalog_core::store::CatalogStore;

/// SQLite implementation of the [`CatalogStore`] trait.
///
/// Each call checks a connection out of the pool and returns it when the
/// query finishes, on success or error.
pub struct SqliteStore {
    pool: SqlitePool,
    /// Validated by [`crate::config::Config::validate`].
    table: String,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn select_sql(&self) -> String {
        format!("SELECT {} FROM {}", schema::column_list(), self.table)
    }
}

fn row_to_flat(row: &SqliteRow) -> Result<FlatRow, sqlx::Error> {
    Ok(FlatRow {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        tagline: row.try_get("tagline")?,
        first_brewed: row.try_get("first_brewed")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        abv: row.try_get("abv")?,
        ibu: row.try_get("ibu")?,
        target_fg: row.try_get("target_fg")?,
        target_og: row.try_get("target_og")?,
        ebc: row.try_get("ebc")?,
        srm: row.try_get("srm")?,
        ph: row.try_get("ph")?,
        attenuation_level: row.try_get("attenuation_level")?,
        volume_value: row.try_get("volume_value")?,
        volume_unit: row.try_get("volume_unit")?,
        boil_volume_value: row.try_get("boil_volume_value")?,
        boil_volume_unit: row.try_get("boil_volume_unit")?,
        mash_temp_value: row.try_get("mash_temp_value")?,
        mash_temp_unit: row.try_get("mash_temp_unit")?,
        mash_temp_duration: row.try_get("mash_temp_duration")?,
        fermentation_temp_value: row.try_get("fermentation_temp_value")?,
        fermentation_temp_unit: row.try_get("fermentation_temp_unit")?,
        twist: row.try_get("twist")?,
        malt: row.try_get("malt")?,
        food_pairing: row.try_get("food_pairing")?,
        brewers_tips: row.try_get("brewers_tips")?,
        contributed_by: row.try_get("contributed_by")?,
    })
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn reset(&self) -> Result<()> {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", self.table))
            .execute(&self.pool)
            .await?;
        sqlx::query(&schema::create_table_sql(&self.table))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert(&self, row: &FlatRow) -> Result<()> {
        let sql = schema::insert_sql(&self.table);
        let mut query = sqlx::query(&sql);
        for cell in row.cells() {
            query = match cell {
                Cell::Integer(v) => query.bind(v),
                Cell::Real(v) => query.bind(v),
                Cell::Text(v) => query.bind(v.map(str::to_string)),
            };
        }
        query.execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self, filters: &FilterSet) -> Result<Vec<FlatRow>> {
        let predicate = filters.build();
        let sql = format!("{}{}", self.select_sql(), predicate.where_sql());

        let mut query = sqlx::query(&sql);
        for param in predicate.params {
            query = match param {
                Param::Text(s) => query.bind(s),
                Param::Real(f) => query.bind(f),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        let beers = rows
            .iter()
            .map(row_to_flat)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(beers)
    }

    async fn get(&self, id: i64) -> Result<Option<FlatRow>> {
        let sql = format!("{} WHERE {} = ?", self.select_sql(), schema::PRIMARY_KEY);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_flat).transpose()?)
    }
}
