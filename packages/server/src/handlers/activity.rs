use axum::Json;
use axum::extract::{Path, State};
use sea_orm::TransactionTrait;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::activity::*;
use crate::services::activity::ActivityService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/activities",
    tag = "Activities",
    operation_id = "listActivities",
    summary = "List published activities",
    description = "Returns every published activity with its current number of participants. Draft activities are never listed.",
    responses(
        (status = 200, description = "List of activities", body = Vec<ActivityResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_activities(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityResponse>>, AppError> {
    let activities = ActivityService::new(&state.db).list_published().await?;

    Ok(Json(activities.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/activities/{activity_title}/signup",
    tag = "Activities",
    operation_id = "signupForActivity",
    summary = "Sign up a student for an activity",
    description = "Adds the student to the activity identified by its title. Fails if the student is already signed up or the activity has reached `max_participants`.",
    params(
        ("activity_title" = String, Path, description = "Activity title"),
        StudentQuery,
    ),
    responses(
        (status = 200, description = "Student signed up", body = MessageResponse),
        (status = 400, description = "Already signed up, activity full, or missing email (ALREADY_SIGNED_UP, ACTIVITY_FULL, VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Activity not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn signup_for_activity(
    State(state): State<AppState>,
    Path(activity_title): Path<String>,
    AppQuery(query): AppQuery<StudentQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let _write = state.write_gate.acquire().await;
    let txn = state.db.begin().await?;
    let participant = ActivityService::new(&txn)
        .signup(&activity_title, &query.email)
        .await?;
    txn.commit().await?;

    info!(
        participant_id = participant.id,
        workshop_id = participant.workshop_id,
        "Student signed up"
    );

    Ok(Json(MessageResponse::signed_up(&query.email, &activity_title)))
}

#[utoipa::path(
    delete,
    path = "/activities/{activity_title}/unregister",
    tag = "Activities",
    operation_id = "unregisterFromActivity",
    summary = "Unregister a student from an activity",
    description = "Removes the student's signup from the activity identified by its title.",
    params(
        ("activity_title" = String, Path, description = "Activity title"),
        StudentQuery,
    ),
    responses(
        (status = 200, description = "Student unregistered", body = MessageResponse),
        (status = 400, description = "Student not signed up, or missing email (NOT_SIGNED_UP, VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Activity not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn unregister_from_activity(
    State(state): State<AppState>,
    Path(activity_title): Path<String>,
    AppQuery(query): AppQuery<StudentQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let _write = state.write_gate.acquire().await;
    let txn = state.db.begin().await?;
    let participant = ActivityService::new(&txn)
        .unregister(&activity_title, &query.email)
        .await?;
    txn.commit().await?;

    info!(
        participant_id = participant.id,
        workshop_id = participant.workshop_id,
        "Student unregistered"
    );

    Ok(Json(MessageResponse::unregistered(
        &query.email,
        &activity_title,
    )))
}
