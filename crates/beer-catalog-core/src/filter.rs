//! Optional list filters and the parameterized predicate builder.
//!
//! A [`FilterSet`] holds up to four independent predicates. [`FilterSet::build`]
//! turns the present ones into a SQL condition with `?` placeholders and an
//! ordered parameter list. Filter values are only ever bound, never written
//! into the condition text.

use serde::{de, Deserialize, Deserializer};

use crate::models::FlatRow;

/// Escape character used in `LIKE ... ESCAPE` clauses.
const LIKE_ESCAPE: char = '\\';

/// Optional filters for a catalog listing.
///
/// `name`, `malt`, and `food` are case-insensitive substring matches against
/// the `name`, `malt`, and `food_pairing` columns. `ibu` is exact equality.
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub malt: Option<String>,
    #[serde(default)]
    pub food: Option<String>,
    #[serde(default, deserialize_with = "deserialize_ibu")]
    pub ibu: Option<f64>,
}

/// Query strings carry `ibu` as text, JSON may carry a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum IbuValue {
    Number(f64),
    Text(String),
}

fn deserialize_ibu<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IbuValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IbuValue::Number(n)) => Ok(Some(n)),
        Some(IbuValue::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(IbuValue::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("ibu must be a number, got {:?}", s))),
    }
}

/// A typed bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    Real(f64),
}

/// A conjunction of conditions plus the parameters for its placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    /// Conditions joined by `AND`. Empty when unconstrained.
    pub clause: String,
    /// One entry per `?` in `clause`, in order.
    pub params: Vec<Param>,
}

impl Predicate {
    pub fn is_unconstrained(&self) -> bool {
        self.clause.is_empty()
    }

    /// `""` when unconstrained, otherwise `" WHERE <clause>"`.
    pub fn where_sql(&self) -> String {
        if self.is_unconstrained() {
            String::new()
        } else {
            format!(" WHERE {}", self.clause)
        }
    }
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.text_filters().next().is_none() && self.ibu.is_none()
    }

    /// Present substring filters as `(column, needle)`, in fixed order.
    fn text_filters(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("name", self.name.as_deref()),
            ("malt", self.malt.as_deref()),
            ("food_pairing", self.food.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| match value {
            Some(v) if !v.is_empty() => Some((column, v)),
            _ => None,
        })
    }

    /// Builds the parameterized predicate.
    ///
    /// Condition order is fixed: name, malt, food pairing, ibu.
    pub fn build(&self) -> Predicate {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        for (column, needle) in self.text_filters() {
            conditions.push(format!("{} LIKE ? ESCAPE '{}'", column, LIKE_ESCAPE));
            params.push(Param::Text(format!("%{}%", escape_like(needle))));
        }

        if let Some(ibu) = self.ibu {
            conditions.push("ibu = ?".to_string());
            params.push(Param::Real(ibu));
        }

        Predicate {
            clause: conditions.join(" AND "),
            params,
        }
    }

    /// Evaluates the filters against a row in memory, with the same
    /// semantics as the SQL predicate (ASCII case-insensitive `LIKE`).
    pub fn matches(&self, row: &FlatRow) -> bool {
        let text_ok = self.text_filters().all(|(column, needle)| {
            let haystack = match column {
                "name" => row.name.as_deref(),
                "malt" => row.malt.as_deref(),
                _ => row.food_pairing.as_deref(),
            };
            haystack.is_some_and(|h| contains_ignore_ascii_case(h, needle))
        });
        let ibu_ok = match self.ibu {
            Some(ibu) => row.ibu == Some(ibu),
            None => true,
        };
        text_ok && ibu_ok
    }
}

fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}
