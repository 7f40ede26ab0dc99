use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub userid: i32,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub contactnumber: String,
    pub password: String,
    pub user_type: String,
    pub address: Option<String>,
    pub user_img: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::suppliers::Entity")]
    Suppliers,
    #[sea_orm(has_many = "super::events::Entity")]
    Events,
    #[sea_orm(has_many = "super::event_feedbacks::Entity")]
    EventFeedbacks,
    #[sea_orm(has_many = "super::booked_outfit::Entity")]
    BookedOutfits,
}

impl Related<super::suppliers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Suppliers.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::event_feedbacks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventFeedbacks.def()
    }
}

impl Related<super::booked_outfit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookedOutfits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
