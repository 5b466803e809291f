use crate::error::ConvertError;
use crate::format::FileFormat;
use crate::pipeline::ConvertService;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use cfm_domain::constants::{CONVERT_TAG, TRANSFORMATION_APPLIED};
use cfm_domain::model::CfmModel;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// State attached to the conversion routes.
#[derive(Debug, Clone)]
pub struct ConvertState {
    pub service: ConvertService,
}

pub fn convert_router() -> OpenApiRouter<ConvertState> {
    OpenApiRouter::new().routes(routes!(to_json_handler)).routes(routes!(from_json_handler))
}

/// 214 "transformation applied"; the editor frontend depends on this code.
fn transformation_applied() -> StatusCode {
    StatusCode::from_u16(TRANSFORMATION_APPLIED).unwrap_or(StatusCode::OK)
}

/// Convert the specified external format to the canonical CFM JSON.
#[utoipa::path(
    post,
    path = "/convert/tojson/{format}",
    request_body(content = String, content_type = "application/octet-stream",
        description = "Raw bytes of the source format"),
    params(("format" = String, Path, description = "Source format name, e.g. `uvl`")),
    responses(
        (status = 214, description = "Transformation applied; body is the canonical JSON"),
        (status = 422, description = "Unsupported file type"),
        (status = 500, description = "Conversion failed; body carries the diagnostic"),
    ),
    tag = CONVERT_TAG,
)]
async fn to_json_handler(
    State(state): State<ConvertState>,
    Path(format): Path<String>,
    body: Bytes,
) -> Result<Response, ConvertError> {
    let format = FileFormat::from_name(&format)?;
    let model = state.service.import(format, &body).await?;

    Ok((transformation_applied(), Json(model)).into_response())
}

/// Convert canonical CFM JSON to the specified external format.
#[utoipa::path(
    post,
    path = "/convert/fromjson/{format}",
    request_body(content = String, content_type = "application/json",
        description = "Canonical CFM JSON feature model"),
    params(("format" = String, Path, description = "Target format name, e.g. `uvl`")),
    responses(
        (status = 214, description = "Transformation applied; body is the converted file"),
        (status = 422, description = "Unsupported file type or malformed model"),
        (status = 500, description = "Conversion failed; body carries the diagnostic"),
    ),
    tag = CONVERT_TAG,
)]
async fn from_json_handler(
    State(state): State<ConvertState>,
    Path(format): Path<String>,
    Json(model): Json<CfmModel>,
) -> Result<Response, ConvertError> {
    let format = FileFormat::from_name(&format)?;
    let file = state.service.export(format, &model).await?;

    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    Ok((
        transformation_applied(),
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.content,
    )
        .into_response())
}
