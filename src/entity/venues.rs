use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "venues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub venue_id: i32,
    pub venue_name: String,
    pub location: Option<String>,
    pub venue_price: Decimal,
    pub description: Option<String>,
    pub venue_capacity: Option<i32>,
    pub image: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
