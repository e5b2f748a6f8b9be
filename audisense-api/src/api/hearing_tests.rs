//! Hearing test resource handlers
//!
//! | Method | Path                    | Success              |
//! |--------|-------------------------|----------------------|
//! | GET    | /api/hearingtests       | 200 + array          |
//! | GET    | /api/hearingtests/:id   | 200 + record         |
//! | POST   | /api/hearingtests       | 201 + record + Location |
//! | PUT    | /api/hearingtests/:id   | 200 + updated record |
//! | DELETE | /api/hearingtests/:id   | 204                  |

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use audisense_common::models::hearing_test_path;
use audisense_common::{HearingTestDraft, HearingTestId, HearingTestRequest, HearingTestView};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

type IdParam = Result<Path<HearingTestId>, PathRejection>;
type DraftBody = Result<Json<HearingTestDraft>, JsonRejection>;

fn parse_id(id: IdParam) -> ApiResult<HearingTestId> {
    id.map(|Path(id)| id)
        .map_err(|rejection| ApiError::InvalidId(rejection.body_text()))
}

fn validate_body(body: DraftBody) -> ApiResult<HearingTestRequest> {
    let Json(draft) = body.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    draft.validate().map_err(ApiError::Validation)
}

fn not_found(id: HearingTestId) -> ApiError {
    ApiError::NotFound(format!("Hearing test {}", id))
}

/// GET /api/hearingtests
pub async fn list_hearing_tests(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<HearingTestView>>> {
    info!("Retrieving all hearing tests");
    let hearing_tests = state.service.list_all().await?;
    Ok(Json(hearing_tests))
}

/// GET /api/hearingtests/:id
pub async fn get_hearing_test(
    State(state): State<AppState>,
    id: IdParam,
) -> ApiResult<Json<HearingTestView>> {
    let id = parse_id(id)?;
    info!("Retrieving hearing test with ID: {}", id);

    match state.service.get_by_id(id).await? {
        Some(view) => Ok(Json(view)),
        None => {
            warn!("Hearing test with ID: {} not found", id);
            Err(not_found(id))
        }
    }
}

/// POST /api/hearingtests
///
/// Responds 201 with the new record and a `Location` header pointing at it.
pub async fn create_hearing_test(
    State(state): State<AppState>,
    body: DraftBody,
) -> ApiResult<Response> {
    let request = validate_body(body)?;
    info!("Creating new hearing test for tester: {}", request.tester_name);

    let created = state.service.create(request).await?;
    let location = hearing_test_path(created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}

/// PUT /api/hearingtests/:id
///
/// The body is validated before the id is looked up, so an invalid body is a
/// 400 even for an unknown id.
pub async fn update_hearing_test(
    State(state): State<AppState>,
    id: IdParam,
    body: DraftBody,
) -> ApiResult<Json<HearingTestView>> {
    let id = parse_id(id)?;
    info!("Updating hearing test with ID: {}", id);
    let request = validate_body(body)?;

    match state.service.update(id, request).await? {
        Some(view) => Ok(Json(view)),
        None => {
            warn!("Hearing test with ID: {} not found for update", id);
            Err(not_found(id))
        }
    }
}

/// DELETE /api/hearingtests/:id
pub async fn delete_hearing_test(
    State(state): State<AppState>,
    id: IdParam,
) -> ApiResult<StatusCode> {
    let id = parse_id(id)?;
    info!("Deleting hearing test with ID: {}", id);

    if state.service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        warn!("Hearing test with ID: {} not found for deletion", id);
        Err(not_found(id))
    }
}
