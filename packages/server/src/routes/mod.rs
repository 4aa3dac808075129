use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::activity::*;
use crate::state::AppState;

pub fn activity_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_activities))
        .routes(routes!(signup_for_activity))
        .routes(routes!(unregister_from_activity))
}
