use actix_multipart::Multipart;
use actix_web::{
    http::header,
    web::{self, Data},
    HttpRequest, HttpResponse,
};
use futures_util::TryStreamExt;
use serde_json::json;

use super::{AssetHost, StagingArea};
use crate::error::UploadError;

pub const MAX_FILE_SIZE: usize = 5_000_000; // 5 mb

struct ImagePart {
    file_name: String,
    content_type: String,
    bytes: web::BytesMut,
}

async fn read_image_field(payload: &mut Multipart) -> Result<Option<ImagePart>, UploadError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| UploadError::UploadFailure(err.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = match field.content_type() {
            Some(file_type) if file_type.type_() == mime::IMAGE => {
                file_type.essence_str().to_string()
            }
            _ => {
                tracing::error!("Wrong file type");
                return Err(UploadError::InvalidInput("Invalid file type".to_string()));
            }
        };
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .unwrap_or_default()
            .to_string();

        let mut bytes = web::BytesMut::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|err| UploadError::UploadFailure(err.to_string()))?
        {
            if bytes.len() + chunk.len() > MAX_FILE_SIZE {
                tracing::error!("File is too large");
                return Err(UploadError::InvalidInput("File is too large".to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }
        if bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(ImagePart {
            file_name,
            content_type,
            bytes,
        }));
    }
    Ok(None)
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

pub async fn upload_image(
    req: HttpRequest,
    mut payload: Multipart,
    asset_host: Data<dyn AssetHost>,
    staging: Data<StagingArea>,
) -> Result<HttpResponse, UploadError> {
    if !is_multipart(&req) {
        tracing::error!("Not a multipart request");
        return Err(UploadError::InvalidInput("No file uploaded".to_string()));
    }
    let image = read_image_field(&mut payload)
        .await?
        .ok_or_else(|| UploadError::InvalidInput("No file uploaded".to_string()))?;
    tracing::info!(
        "Got image {} ({}, {} bytes)",
        image.file_name,
        image.content_type,
        image.bytes.len()
    );

    let staging = staging.into_inner();
    let staged = web::block(move || {
        staging.stage(&image.file_name, &image.content_type, &image.bytes)
    })
    .await
    .map_err(|err| UploadError::UploadFailure(err.to_string()))?
    .map_err(|err| UploadError::UploadFailure(err.to_string()))?;

    let uploaded = asset_host.upload(&staged).await;
    staged.finish();
    let asset = uploaded?;

    tracing::info!("File uploaded Successfully");
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "url": asset.url,
        "public_id": asset.public_id
    })))
}

pub async fn upload_method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({
        "error": "Method not allowed"
    }))
}
