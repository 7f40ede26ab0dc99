use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitFeedbackRequest {
    pub events_id: Option<i32>,
    /// Whole number from 1 to 5; anything else is rejected with 400.
    #[schema(value_type = Option<i32>, minimum = 1, maximum = 5)]
    pub rating: Option<serde_json::Value>,
    pub feedback_text: Option<String>,
}

impl SubmitFeedbackRequest {
    pub fn valid_rating(&self) -> Option<i32> {
        self.rating
            .as_ref()
            .and_then(serde_json::Value::as_i64)
            .filter(|rating| (1..=5).contains(rating))
            .and_then(|rating| i32::try_from(rating).ok())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeedbackCreated {
    pub feedback_id: i32,
}
