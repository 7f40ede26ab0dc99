use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOutfitRequest {
    pub outfit_name: Option<String>,
    pub outfit_type: Option<String>,
    pub outfit_color: Option<String>,
    pub outfit_desc: Option<String>,
    pub rent_price: Option<Decimal>,
    pub status: Option<String>,
    pub outfit_img: Option<String>,
    pub size: Option<String>,
    pub weight: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookOutfitRequest {
    pub outfit_id: Option<i32>,
    pub pickup_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub status: Option<String>,
    #[serde(default)]
    pub additional_charges: Decimal,
}
