//! # VSS Files
//!
//! Upload, listing, metadata, deletion and content of files stored by VSS.
//!
//! `POST /api/vss/files` takes `multipart/form-data` with:
//! - `file` (required): the media bytes; its part filename is used unless a
//!   `filename` field is given.
//! - `media_type`: `image` or `video`; inferred from the part's content type
//!   when absent.
//! - `purpose`: defaults to `vision`.

use super::{bad_request, failure, respond};
use crate::state::AppState;
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse, Responder};
use common::model::vss::MediaType;
use common::requests::vss::{ListFilesQuery, VssEnvelope};
use futures_util::StreamExt;
use log::warn;
use serde_json::Value;

#[derive(Debug, Default)]
struct UploadForm {
    bytes: Option<Vec<u8>>,
    part_filename: Option<String>,
    part_content_type: Option<String>,
    filename: Option<String>,
    media_type: Option<String>,
    purpose: Option<String>,
}

impl UploadForm {
    fn resolved_media_type(&self) -> Option<MediaType> {
        match self.media_type.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => MediaType::parse(value),
            _ => match self.part_content_type.as_deref() {
                Some(mime) if mime.starts_with("image/") => Some(MediaType::Image),
                Some(mime) if mime.starts_with("video/") => Some(MediaType::Video),
                _ => None,
            },
        }
    }
}

/// Cap for the small text fields of the upload form.
const TEXT_FIELD_LIMIT: usize = 4 * 1024;

#[derive(Debug, PartialEq)]
enum FormError {
    Invalid(String),
    TooLarge(String),
}

fn invalid(e: impl std::fmt::Display) -> FormError {
    FormError::Invalid(format!("Invalid multipart body: {e}"))
}

/// Reads the parts this endpoint knows. Unknown parts are drained without
/// being kept, and known parts stop being read once they pass their cap.
async fn read_form(mut payload: Multipart, file_limit: usize) -> Result<UploadForm, FormError> {
    let mut form = UploadForm::default();
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(invalid)?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("file") => {
                form.part_filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()));
                form.part_content_type = field.content_type().map(|m| m.essence_str().to_string());
                form.bytes = Some(read_limited(&mut field, "file", file_limit).await?);
            }
            Some(name @ ("filename" | "media_type" | "purpose")) => {
                let value = text(read_limited(&mut field, name, TEXT_FIELD_LIMIT).await?)?;
                match name {
                    "filename" => form.filename = Some(value),
                    "media_type" => form.media_type = Some(value),
                    _ => form.purpose = Some(value),
                }
            }
            _ => {
                while let Some(chunk) = field.next().await {
                    chunk.map_err(invalid)?;
                }
            }
        }
    }
    Ok(form)
}

async fn read_limited(field: &mut Field, name: &str, limit: usize) -> Result<Vec<u8>, FormError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(invalid)?;
        if data.len() + chunk.len() > limit {
            return Err(FormError::TooLarge(format!(
                "{name} exceeds the upload limit of {limit} bytes"
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

fn text(data: Vec<u8>) -> Result<String, FormError> {
    String::from_utf8(data).map_err(|_| FormError::Invalid("Form fields must be UTF-8 text".to_string()))
}

pub async fn upload(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    let form = match read_form(payload, state.upload_limit).await {
        Ok(form) => form,
        Err(FormError::Invalid(message)) => return bad_request(message),
        Err(FormError::TooLarge(message)) => {
            warn!("Rejected VSS upload: {message}");
            return HttpResponse::PayloadTooLarge().json(VssEnvelope::<()>::Error { message });
        }
    };
    let media_type = form.resolved_media_type();
    let filename = form
        .filename
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .or(form.part_filename.as_deref())
        .map(str::to_string);

    let (Some(bytes), Some(filename)) = (form.bytes, filename) else {
        return bad_request("A file with a filename is required");
    };
    let Some(media_type) = media_type else {
        return bad_request("media_type must be 'image' or 'video'");
    };
    respond(
        "upload file",
        state
            .vss
            .upload_file(bytes, &filename, media_type, form.purpose.as_deref())
            .await,
    )
}

pub async fn list(state: web::Data<AppState>, query: web::Query<ListFilesQuery>) -> impl Responder {
    respond("list files", state.vss.list_files(query.purpose.as_deref()).await)
}

pub async fn get(state: web::Data<AppState>, file_id: web::Path<String>) -> impl Responder {
    respond("get file", state.vss.get_file(&file_id).await)
}

pub async fn delete(state: web::Data<AppState>, file_id: web::Path<String>) -> impl Responder {
    respond(
        "delete file",
        state.vss.delete_file(&file_id).await.map(|()| Value::Null),
    )
}

pub async fn content(state: web::Data<AppState>, file_id: web::Path<String>) -> impl Responder {
    match state.vss.get_file_content(&file_id).await {
        Ok(file) => HttpResponse::Ok()
            .content_type(file.content_type)
            .body(file.bytes),
        Err(e) => failure("get file content", e),
    }
}
