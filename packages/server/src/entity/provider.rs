use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    #[sea_orm(default_value = true)]
    pub public: bool,

    #[sea_orm(has_many)]
    pub workshops: HasMany<super::workshop::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
