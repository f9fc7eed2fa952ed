use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::{DefaultBodyLimit, Multipart};

use crate::error::AppError;
use crate::utils::filename::{content_type_for, display_filename};

/// Body limit for multipart upload routes: the configured file limit plus
/// room for the other form fields.
pub fn upload_body_limit(max_file_size: u64) -> DefaultBodyLimit {
    DefaultBodyLimit::max(usize::try_from(max_file_size).unwrap_or(usize::MAX).saturating_add(64 * 1024))
}

/// The `file` part of an upload form, buffered in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Sanitized original filename.
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A parsed multipart upload form: one `file` part plus text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    file: Option<UploadedFile>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Read every part of `multipart`. The file part is capped at `max_size` bytes.
    pub async fn read(mut multipart: Multipart, max_size: u64) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == "file" {
                let filename = field
                    .file_name()
                    .and_then(display_filename)
                    .unwrap_or_else(|| "upload".to_string());
                let declared = field.content_type().map(str::to_string);

                let mut data = Vec::new();
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?
                {
                    data.extend_from_slice(&chunk);
                    if data.len() as u64 > max_size {
                        return Err(AppError::Validation(format!(
                            "File exceeds the maximum size of {max_size} bytes"
                        )));
                    }
                }

                let content_type = content_type_for(declared.as_deref(), &filename);
                form.file = Some(UploadedFile {
                    filename,
                    content_type,
                    data,
                });
            } else if !name.is_empty() {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid field '{name}': {e}")))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Take the required `file` part.
    pub fn take_file(&mut self) -> Result<UploadedFile, AppError> {
        let file = self
            .file
            .take()
            .ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;
        if file.data.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".into()));
        }
        Ok(file)
    }

    /// Trimmed text field, `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Parse an optional text field.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, AppError> {
        self.text(name)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|_| AppError::Validation(format!("Invalid value for '{name}': {raw}")))
            })
            .transpose()
    }

    /// Comma-separated list field; blank entries dropped.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.text(name)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn with_fields(fields: &[(&str, &str)]) -> Self {
        Self {
            file: None,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}
