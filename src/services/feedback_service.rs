use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::{
    dto::feedback::{FeedbackCreated, SubmitFeedbackRequest},
    entity::{EventFeedbacks, Events, Users, event_feedbacks, events},
    error::{AppError, AppResult},
    models::Feedback,
};

pub async fn submit_feedback<C: ConnectionTrait>(
    db: &C,
    userid: i32,
    payload: SubmitFeedbackRequest,
) -> AppResult<FeedbackCreated> {
    let (Some(events_id), Some(_)) = (payload.events_id, payload.rating.as_ref()) else {
        return Err(AppError::bad_request("Event ID and rating are required"));
    };
    let Some(rating) = payload.valid_rating() else {
        return Err(AppError::bad_request(
            "Rating must be a number between 1 and 5",
        ));
    };

    if Events::find()
        .filter(events::Column::EventsId.eq(events_id))
        .one(db)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Event not found"));
    }

    let already_submitted = EventFeedbacks::find()
        .filter(event_feedbacks::Column::EventsId.eq(events_id))
        .filter(event_feedbacks::Column::Userid.eq(userid))
        .one(db)
        .await?
        .is_some();
    if already_submitted {
        return Err(AppError::Conflict(
            "You have already submitted feedback for this event".into(),
        ));
    }

    // The unique (events_id, userid) index still settles concurrent submissions as 409.
    let feedback = event_feedbacks::ActiveModel {
        feedback_id: NotSet,
        events_id: Set(events_id),
        userid: Set(userid),
        rating: Set(rating),
        feedback_text: Set(payload.feedback_text.filter(|t| !t.trim().is_empty())),
        created_at: NotSet,
    }
    .insert(db)
    .await?;

    tracing::info!(events_id, userid, rating, "feedback submitted");
    Ok(FeedbackCreated {
        feedback_id: feedback.feedback_id,
    })
}

/// Feedback for one event, newest first, with the author's name.
pub async fn list_feedback<C: ConnectionTrait>(db: &C, events_id: i32) -> AppResult<Vec<Feedback>> {
    let rows = EventFeedbacks::find()
        .find_also_related(Users)
        .filter(event_feedbacks::Column::EventsId.eq(events_id))
        .order_by_desc(event_feedbacks::Column::CreatedAt)
        .order_by_desc(event_feedbacks::Column::FeedbackId)
        .all(db)
        .await?;

    let items = rows
        .into_iter()
        .map(|(feedback, user)| {
            let (user_firstname, user_lastname) = user
                .map(|u| (u.firstname, u.lastname))
                .unwrap_or_default();
            Feedback {
                feedback_id: feedback.feedback_id,
                userid: feedback.userid,
                rating: feedback.rating,
                feedback_text: feedback.feedback_text,
                created_at: feedback.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                user_firstname,
                user_lastname,
            }
        })
        .collect();
    Ok(items)
}
