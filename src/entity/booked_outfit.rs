use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "booked_outfit")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub outfit_booked_id: i32,
    pub userid: i32,
    pub outfit_id: i32,
    pub pickup_date: Option<Date>,
    pub return_date: Option<Date>,
    pub status: Option<String>,
    pub additional_charges: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Userid",
        to = "super::users::Column::Userid"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::outfits::Entity",
        from = "Column::OutfitId",
        to = "super::outfits::Column::OutfitId"
    )]
    Outfits,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::outfits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outfits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
