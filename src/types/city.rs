//! City records and the geographic attributes the evaluator matches on.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

/// One row of the city catalog. Read-only once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct City {
    pub code: String,
    pub name: String,
    pub province: String,
    pub country: String,
}

impl City {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        province: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        City {
            code: code.into(),
            name: name.into(),
            province: province.into(),
            country: country.into(),
        }
    }

    /// The raw token for one attribute, as stored in the catalog.
    pub fn attribute(&self, attribute: CityAttribute) -> &str {
        match attribute {
            CityAttribute::Country => &self.country,
            CityAttribute::Province => &self.province,
            CityAttribute::Name => &self.name,
        }
    }
}

impl Display for City {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}-{}-{}", self.name, self.province, self.country)
    }
}

/// A geographic attribute of a [`City`] that region rules are matched against.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    StrumDisplay,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CityAttribute {
    Country,
    Province,
    Name,
}

impl CityAttribute {
    /// Attributes in the order every level checks them: broadest first.
    pub const ALL: [CityAttribute; 3] = [
        CityAttribute::Country,
        CityAttribute::Province,
        CityAttribute::Name,
    ];
}
