use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "outfits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub outfit_id: i32,
    pub outfit_name: String,
    pub outfit_type: String,
    pub outfit_color: String,
    pub outfit_desc: String,
    pub rent_price: Decimal,
    pub status: String,
    pub outfit_img: Option<String>,
    pub size: Option<String>,
    pub weight: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booked_outfit::Entity")]
    BookedOutfits,
    #[sea_orm(has_many = "super::gown_package_outfits::Entity")]
    GownPackageOutfits,
}

impl Related<super::booked_outfit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookedOutfits.def()
    }
}

impl Related<super::gown_package_outfits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GownPackageOutfits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
