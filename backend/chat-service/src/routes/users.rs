use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::UserProfile;
use crate::services::user_service::UserService;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SyncProfileRequest {
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub email: Option<String>,
}

/// Mirror the caller's identity-provider profile into the store.
pub async fn sync_profile(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(body): Json<SyncProfileRequest>,
) -> Result<StatusCode, AppError> {
    let profile = UserProfile {
        id: user_id,
        name: body.name,
        image: body.image,
        email: body.email,
    };
    UserService::upsert_profile(state.store.as_ref(), &profile).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = UserService::get_profile(state.store.as_ref(), &user_id).await?;
    Ok(Json(profile))
}
