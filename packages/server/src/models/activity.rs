use serde::{Deserialize, Serialize};

use crate::services::activity::ActivitySummary;

/// Query parameters identifying the student for signup and unregistration.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentQuery {
    /// Student email address.
    #[param(example = "michael@mergington.edu")]
    pub email: String,
}

/// A published activity as shown on the front page.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ActivityResponse {
    #[schema(example = "Chess Club")]
    pub title: String,
    #[schema(example = "Learn strategies and compete in chess tournaments")]
    pub description: Option<String>,
    #[schema(example = "Fridays, 3:30 PM - 5:00 PM")]
    pub schedule: Option<String>,
    /// Capacity of the activity (null means unlimited).
    #[schema(example = 12)]
    pub max_participants: Option<i32>,
    /// Number of students currently signed up.
    #[schema(example = 3)]
    pub participants_count: i64,
}

impl From<ActivitySummary> for ActivityResponse {
    fn from(s: ActivitySummary) -> Self {
        Self {
            title: s.title,
            description: s.description,
            schedule: s.schedule,
            max_participants: s.max_participants,
            participants_count: s.participants_count,
        }
    }
}

/// Confirmation returned by signup and unregistration.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Signed up michael@mergington.edu for Chess Club")]
    pub message: String,
}

impl MessageResponse {
    pub fn signed_up(email: &str, activity_title: &str) -> Self {
        Self {
            message: format!("Signed up {email} for {activity_title}"),
        }
    }

    pub fn unregistered(email: &str, activity_title: &str) -> Self {
        Self {
            message: format!("Unregistered {email} from {activity_title}"),
        }
    }
}
