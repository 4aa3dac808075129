#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication state of a workshop. Only published workshops are listed.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum WorkshopStatus {
    /// Not yet visible to students.
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "draft"))]
    Draft,
    /// Listed on the activities page and open for signup.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "published"))]
    Published,
}

impl WorkshopStatus {
    /// All possible status values.
    pub const ALL: &'static [WorkshopStatus] = &[Self::Draft, Self::Published];

    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Returns the string representation (lowercase), as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for WorkshopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWorkshopStatusError {
    invalid: String,
}

impl fmt::Display for ParseWorkshopStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid workshop status '{}'. Valid values: {}",
            self.invalid,
            WorkshopStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseWorkshopStatusError {}

impl FromStr for WorkshopStatus {
    type Err = ParseWorkshopStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(ParseWorkshopStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}
