use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, web};
use futures_util::StreamExt;
use serde_json::json;
use tracing::{info, instrument, warn};

pub(crate) const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub(crate) struct UploadedFile {
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

/// Reads the `file` field of a multipart body, enforcing the size cap.
pub(crate) async fn read_file_field(
    req: &HttpRequest,
    payload: web::Payload,
    max_bytes: usize,
) -> Result<UploadedFile, ApiError> {
    let mut multipart = Multipart::new(req.headers(), payload);
    let mut file_name = None;
    let mut data = Vec::new();

    while let Some(item) = multipart.next().await {
        let mut field = item.map_err(|e| {
            warn!(error = %e, "Invalid multipart field");
            ApiError::Validation("Invalid multipart field".to_string())
        })?;

        if field.name() != "file" {
            return Err(ApiError::Validation(
                "Invalid field name: expected 'file'".to_string(),
            ));
        }

        file_name = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);

        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| {
                warn!(error = %e, "Failed to read multipart chunk");
                ApiError::Validation("Failed to read uploaded file".to_string())
            })?;
            if data.len() + chunk.len() > max_bytes {
                return Err(ApiError::Validation(format!(
                    "File size exceeds {} byte limit",
                    max_bytes
                )));
            }
            data.extend_from_slice(&chunk);
        }
    }

    if data.is_empty() {
        return Err(ApiError::Validation("No file uploaded.".to_string()));
    }

    Ok(UploadedFile { file_name, data })
}

#[instrument(skip(state, req, payload), fields(user_id = %user.user_id))]
pub async fn upload_asset(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let file = read_file_field(&req, payload, MAX_UPLOAD_BYTES).await?;

    let asset = state
        .asset_service
        .upload(&user.user_id, file.file_name, file.data)
        .await?;

    info!(asset_id = asset.id, "Asset uploaded");
    Ok(HttpResponse::Ok().json(json!({ "fileUrl": asset.file_url })))
}

#[instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn list_assets(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let assets = state.asset_service.list(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(assets))
}
