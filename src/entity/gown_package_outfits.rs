use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gown_package_outfits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub gown_package_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub outfit_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gown_package::Entity",
        from = "Column::GownPackageId",
        to = "super::gown_package::Column::GownPackageId"
    )]
    GownPackage,
    #[sea_orm(
        belongs_to = "super::outfits::Entity",
        from = "Column::OutfitId",
        to = "super::outfits::Column::OutfitId"
    )]
    Outfits,
}

impl Related<super::gown_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GownPackage.def()
    }
}

impl Related<super::outfits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outfits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
