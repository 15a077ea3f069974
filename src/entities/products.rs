use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub category: Category,

    /// Base cost in hundredths of the currency unit.
    pub base_cost: i64,

    pub is_active: bool,

    pub created_at: String,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[sea_orm(string_value = "apparel")]
    Apparel,
    #[sea_orm(string_value = "merchandise")]
    Merchandise,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::design_products::Entity")]
    DesignProducts,
}

impl Related<super::design_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DesignProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
