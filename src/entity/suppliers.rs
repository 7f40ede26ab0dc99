use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub supplier_id: i32,
    pub userid: i32,
    pub service: String,
    pub price: Decimal,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Userid",
        to = "super::users::Column::Userid"
    )]
    Users,
    #[sea_orm(has_many = "super::supplier_social_media::Entity")]
    SocialMedia,
    #[sea_orm(has_many = "super::supplier_availability::Entity")]
    Availability,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::supplier_social_media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialMedia.def()
    }
}

impl Related<super::supplier_availability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Availability.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
