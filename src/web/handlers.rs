use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use super::state::{AppState, UploadResponse};
use super::util::upload_url;
use crate::content_type::content_type_for;
use crate::error::{Result, UploadError};
use crate::storage::sanitize_file_name;

pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            warn!(error = %e, "Upload rejected: not a multipart request");
            return Err(UploadError::NoFile);
        }
    };

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let Some(file_name) = field.file_name().and_then(sanitize_file_name) else {
            warn!("Upload file field has no usable filename");
            return Err(UploadError::NoFile);
        };

        let mut file = state.store.create(&file_name).await?;
        let mut size = 0usize;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk).await?;
            size += chunk.len();
        }
        file.flush().await?;

        info!(filename = %file_name, size, "Stored upload");
        let url = upload_url(&state.config, &headers, &file_name);
        return Ok(Json(UploadResponse { url }));
    }

    warn!("Upload missing file field");
    Err(UploadError::NoFile)
}

pub async fn serve_upload(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response> {
    let stored = state.store.open(&file_name).await?;
    let content_type = content_type_for(&file_name);
    debug!(filename = %file_name, size = stored.len, content_type, "Serving upload");

    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (header::CONTENT_LENGTH, stored.len.to_string()),
    ];
    Ok((headers, Body::from_stream(ReaderStream::new(stored.file))).into_response())
}
