use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "additional_services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub add_service_id: i32,
    pub add_service_name: String,
    pub add_service_description: Option<String>,
    pub add_service_price: Decimal,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
