use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub events_id: i32,
    pub userid: i32,
    pub event_name: Option<String>,
    pub event_type: Option<String>,
    pub event_theme: Option<String>,
    pub event_color: Option<String>,
    pub package_id: Option<i32>,
    pub venue: Option<String>,
    pub schedule: Option<Date>,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub status: String,
    pub total_price: Decimal,
    pub booking_type: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Userid",
        to = "super::users::Column::Userid"
    )]
    Users,
    #[sea_orm(has_many = "super::event_feedbacks::Entity")]
    EventFeedbacks,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::event_feedbacks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventFeedbacks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
