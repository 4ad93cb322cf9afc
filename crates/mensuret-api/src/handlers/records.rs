//! Record API handler.

use axum::Json;
use axum::extract::State;
use tracing::debug;

use crate::dto::request::RecordAction;
use crate::dto::response::RecordsResponse;
use crate::error::ApiResult;
use crate::extractors::SessionUser;
use crate::state::AppState;

/// POST /api/
///
/// Dispatches on `action`. Updates and deletes of ids the caller does not
/// own are silent no-ops.
pub async fn dispatch(
    State(state): State<AppState>,
    user: SessionUser,
) -> ApiResult<Json<RecordsResponse>> {
    let SessionUser { owner, request } = user;
    let action = RecordAction::try_from(request)?;

    let response = match action {
        RecordAction::Read => RecordsResponse {
            data: Some(state.records.find_by_owner(&owner).await?),
        },
        RecordAction::Create(data) => {
            state.records.create(&owner, data).await?;
            RecordsResponse::default()
        }
        RecordAction::Update { id, value } => {
            let changed = state.records.update_value(&owner, &id, value).await?;
            debug!(owner = %owner, record_id = %id, changed, "Record update");
            RecordsResponse::default()
        }
        RecordAction::Delete { id } => {
            let removed = state.records.delete(&owner, &id).await?;
            debug!(owner = %owner, record_id = %id, removed, "Record delete");
            RecordsResponse::default()
        }
    };

    Ok(Json(response))
}
