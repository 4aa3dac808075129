use common::WorkshopStatus;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use thiserror::Error;

use crate::entity::{participant, workshop};

/// Business-rule failures of the signup and unregister operations.
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Activity not found")]
    ActivityNotFound,

    #[error("Student is already signed up")]
    AlreadySignedUp,

    #[error("Activity is full")]
    ActivityFull,

    #[error("Student is not signed up for this activity")]
    NotSignedUp,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A published workshop together with its current number of signups.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ActivitySummary {
    pub title: String,
    pub description: Option<String>,
    pub schedule: Option<String>,
    pub max_participants: Option<i32>,
    pub participants_count: i64,
}

/// Activity listing, signup and unregistration over any connection or transaction.
///
/// Callers that mutate should pass a transaction and commit it afterwards, so
/// the check and the write land together.
pub struct ActivityService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ActivityService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// List every published workshop with its participant count, in id order.
    pub async fn list_published(&self) -> Result<Vec<ActivitySummary>, ActivityError> {
        let rows = workshop::Entity::find()
            .filter(workshop::Column::Status.eq(WorkshopStatus::Published))
            .select_only()
            .column(workshop::Column::Title)
            .column(workshop::Column::Description)
            .column(workshop::Column::Schedule)
            .column(workshop::Column::MaxParticipants)
            .column_as(participant::Column::Id.count(), "participants_count")
            .left_join(participant::Entity)
            .group_by(workshop::Column::Id)
            .order_by_asc(workshop::Column::Id)
            .into_model::<ActivitySummary>()
            .all(self.conn)
            .await?;

        Ok(rows)
    }

    /// Enroll `email` in the workshop titled `title`.
    pub async fn signup(
        &self,
        title: &str,
        email: &str,
    ) -> Result<participant::Model, ActivityError> {
        let workshop = self.find_workshop(title, Some(LockType::Update)).await?;

        let participants = participant::Entity::find()
            .filter(participant::Column::WorkshopId.eq(workshop.id))
            .all(self.conn)
            .await?;

        if participants.iter().any(|p| p.email == email) {
            return Err(ActivityError::AlreadySignedUp);
        }

        if let Some(max) = workshop.max_participants
            && participants.len() >= usize::try_from(max).unwrap_or(0)
        {
            return Err(ActivityError::ActivityFull);
        }

        let new_participant = participant::ActiveModel {
            email: Set(email.to_string()),
            workshop_id: Set(workshop.id),
            ..Default::default()
        };

        match new_participant.insert(self.conn).await {
            Ok(model) => Ok(model),
            // Lost a race against a concurrent signup with the same email.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(ActivityError::AlreadySignedUp)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the signup of `email` from the workshop titled `title`.
    pub async fn unregister(
        &self,
        title: &str,
        email: &str,
    ) -> Result<participant::Model, ActivityError> {
        let workshop = self.find_workshop(title, None).await?;

        let existing = participant::Entity::find()
            .filter(participant::Column::WorkshopId.eq(workshop.id))
            .filter(participant::Column::Email.eq(email))
            .one(self.conn)
            .await?
            .ok_or(ActivityError::NotSignedUp)?;

        let active: participant::ActiveModel = existing.clone().into();
        active.delete(self.conn).await?;

        Ok(existing)
    }

    /// Titles are not unique; the oldest workshop with a matching title wins.
    async fn find_workshop(
        &self,
        title: &str,
        lock: Option<LockType>,
    ) -> Result<workshop::Model, ActivityError> {
        let mut select = workshop::Entity::find()
            .filter(workshop::Column::Title.eq(title))
            .order_by_asc(workshop::Column::Id);

        if let Some(lock) = lock {
            select = select.lock(lock);
        }

        select
            .one(self.conn)
            .await?
            .ok_or(ActivityError::ActivityNotFound)
    }
}
