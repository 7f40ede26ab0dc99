use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gown_package")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub gown_package_id: i32,
    pub gown_package_name: String,
    pub gown_package_price: Decimal,
    pub description: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::gown_package_outfits::Entity")]
    GownPackageOutfits,
}

impl Related<super::gown_package_outfits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GownPackageOutfits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
