use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{Form, FromRequest, Multipart, Query, Request},
    http::header::CONTENT_TYPE,
};
use tracing::debug;

use crate::error::ApiError;

/// File name used when the image arrives as a raw request body.
pub const RAW_UPLOAD_NAME: &str = "upload.nii.gz";

/// Uploaded image bytes.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Everything an inference request may carry.
///
/// - `image`: locator from the query string, an urlencoded form, or a multipart text field
///   (query wins);
/// - `file`: multipart `file` or `image` part with a file name, else a non-empty raw body;
/// - `params`: every other form field.
#[derive(Debug, Clone, Default)]
pub struct InferInput {
    pub image: Option<String>,
    pub file: Option<Upload>,
    pub params: BTreeMap<String, String>,
}

impl<S> FromRequest<S> for InferInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<BTreeMap<String, String>>::try_from_uri(req.uri())
            .map(|Query(q)| q)
            .unwrap_or_default();
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        let mut input = if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?;
            read_multipart(multipart).await?
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(mut fields) = Form::<BTreeMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(format!("invalid form body: {e}")))?;
            InferInput {
                image: fields.remove("image"),
                file: None,
                params: fields,
            }
        } else {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(format!("unreadable request body: {e}")))?;
            InferInput {
                file: (!bytes.is_empty()).then(|| Upload {
                    file_name: RAW_UPLOAD_NAME.to_string(),
                    content_type: (!content_type.is_empty()).then(|| content_type.clone()),
                    bytes,
                }),
                ..Default::default()
            }
        };

        if let Some(image) = query.get("image") {
            input.image = Some(image.clone());
        }
        debug!(
            image = ?input.image,
            has_file = input.file.is_some(),
            params = input.params.len(),
            "inference input extracted"
        );
        Ok(input)
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<InferInput, ApiError> {
    let mut input = InferInput::default();
    let mut fallback_file: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart field: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        match (name.as_str(), file_name) {
            ("file", Some(file_name)) | ("image", Some(file_name)) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("unreadable upload: {e}")))?;
                let upload = Upload {
                    file_name,
                    content_type,
                    bytes,
                };
                // `file` takes precedence over `image`.
                if name == "file" {
                    input.file = Some(upload);
                } else {
                    fallback_file = Some(upload);
                }
            }
            (_, _) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("unreadable form field: {e}")))?;
                if name == "image" {
                    input.image = Some(text);
                } else if !name.is_empty() {
                    input.params.insert(name, text);
                }
            }
        }
    }

    if input.file.is_none() {
        input.file = fallback_file;
    }
    Ok(input)
}
