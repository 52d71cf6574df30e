//! Multipart upload parsing shared by the analysis endpoints.

use axum::extract::Multipart;

use crate::server::error::ApiError;

/// Form fields accepted for the uploaded dataset.
const DATASET_FIELDS: [&str; 2] = ["dataset", "file"];

/// A dataset upload with its sensitive attribute.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub contents: Vec<u8>,
    pub sensitive: String,
}

impl Upload {
    /// Read the form, requiring a file field and a `sensitive` field.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut file: Option<(String, Vec<u8>)> = None;
        let mut sensitive: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid form data: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if DATASET_FIELDS.contains(&name.as_str()) {
                let file_name = field.file_name().unwrap_or("upload.csv").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
                file = Some((file_name, bytes.to_vec()));
            } else if name == "sensitive" {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid sensitive field: {}", e)))?;
                sensitive = Some(text.trim().to_string());
            }
        }

        let (file_name, contents) =
            file.ok_or_else(|| ApiError::BadRequest("No dataset file uploaded".to_string()))?;
        let sensitive = sensitive
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::BadRequest("No sensitive attribute given".to_string()))?;

        Ok(Self {
            file_name,
            contents,
            sensitive,
        })
    }
}
