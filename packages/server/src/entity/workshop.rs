pub use common::WorkshopStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshop")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Lookup key used by the signup and unregister endpoints. Not unique.
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,
    pub schedule: Option<String>,
    /// NULL means unlimited.
    pub max_participants: Option<i32>,
    pub status: WorkshopStatus,

    pub provider_id: Option<i32>,
    #[sea_orm(belongs_to, from = "provider_id", to = "id", on_delete = "SetNull")]
    pub provider: HasOne<super::provider::Entity>,

    #[sea_orm(has_many)]
    pub participants: HasMany<super::participant::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
