use crate::config::UploadsConfig;
use crate::error::{AppError, AppResult};
use axum::body::Bytes;
use axum::extract::Multipart;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// URL prefix under which stored files are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    NewsImage,
    Resume,
    Spreadsheet,
}

impl UploadKind {
    pub fn dir(&self) -> &'static str {
        match self {
            UploadKind::NewsImage => "news",
            UploadKind::Resume => "resumes",
            UploadKind::Spreadsheet => "imports",
        }
    }

    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            UploadKind::NewsImage => &["jpg", "jpeg", "png", "gif", "webp"],
            UploadKind::Resume => &["pdf", "doc", "docx"],
            UploadKind::Spreadsheet => &["csv"],
        }
    }

    /// Returns the lower-cased extension when the file name is acceptable.
    pub fn check_file_name(&self, file_name: &str) -> AppResult<String> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if self.allowed_extensions().contains(&extension.as_str()) {
            Ok(extension)
        } else {
            Err(AppError::validation(format!(
                "Invalid file type. Allowed: {}",
                self.allowed_extensions().join(", ")
            )))
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// A fully buffered multipart form. Field names are normalised to snake_case
/// so `isPublished` and `is_published` are the same field.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, Vec<String>>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Invalid multipart body: {}", e)))?
        {
            let name = super::snake_case_key(field.name().unwrap_or_default());
            if name.is_empty() {
                continue;
            }

            match field.file_name().map(|s| s.to_string()) {
                Some(file_name) => {
                    let content_type = field.content_type().map(|s| s.to_string());
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Failed to read upload: {}", e)))?;
                    // 浏览器对空的文件输入框也会发送一个空文件
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Failed to read field: {}", e)))?;
                    form.fields.entry(name).or_default().push(value);
                }
            }
        }

        Ok(form)
    }

    pub fn insert_text(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.fields
            .entry(super::snake_case_key(name))
            .or_default()
            .push(value.into());
        self
    }

    pub fn insert_file(&mut self, name: &str, file: UploadedFile) -> &mut Self {
        self.files.insert(super::snake_case_key(name), file);
        self
    }

    /// First value of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(|s| s.as_str())
    }

    /// Every value of a repeated text field.
    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        self.fields.get(name).cloned()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

/// Local-disk storage for uploaded files.
#[derive(Clone, Debug)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            root: PathBuf::from(&config.dir),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes the file under a generated name and returns its public path,
    /// e.g. `/uploads/news/<uuid>.png`.
    pub async fn save(&self, kind: UploadKind, file: &UploadedFile) -> AppResult<String> {
        let extension = kind.check_file_name(&file.file_name)?;
        if file.bytes.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }

        let dir = self.root.join(kind.dir());
        tokio::fs::create_dir_all(&dir).await?;

        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        tokio::fs::write(dir.join(&stored_name), &file.bytes).await?;

        tracing::info!(kind = kind.dir(), file = %stored_name, bytes = file.bytes.len(), "Stored upload");
        Ok(format!("{}/{}/{}", PUBLIC_PREFIX, kind.dir(), stored_name))
    }

    /// Maps a public path back onto the uploads directory. Anything that is not
    /// a plain relative path below `/uploads/` is not ours to touch.
    pub fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let relative = public_path
            .strip_prefix(PUBLIC_PREFIX)?
            .strip_prefix('/')?;
        if relative.is_empty() {
            return None;
        }

        let relative = Path::new(relative);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }

    /// Unlinks a previously stored file. Returns whether a file was removed;
    /// remote URLs and already-missing files are not errors.
    pub async fn remove(&self, public_path: &str) -> AppResult<bool> {
        let Some(path) = self.resolve(public_path) else {
            return Ok(false);
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Removed upload");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Upload already missing");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort removal used after the owning row is already gone.
    pub async fn remove_quietly(&self, public_path: &str) {
        if let Err(e) = self.remove(public_path).await {
            tracing::warn!(path = %public_path, error = %e, "Failed to remove upload");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> UploadStore {
        UploadStore::new(&UploadsConfig {
            dir: "/srv/uploads".to_string(),
            max_bytes: 1024,
        })
    }

    #[test]
    fn test_check_file_name() {
        assert_eq!(UploadKind::NewsImage.check_file_name("a.PNG").unwrap(), "png");
        assert!(UploadKind::NewsImage.check_file_name("a.pdf").is_err());
        assert!(UploadKind::Resume.check_file_name("cv.docx").is_ok());
        assert!(UploadKind::Resume.check_file_name("cv").is_err());
        assert!(UploadKind::Spreadsheet.check_file_name("rows.csv").is_ok());
    }

    #[test]
    fn test_resolve_only_local_paths() {
        let store = store();
        assert_eq!(
            store.resolve("/uploads/news/a.png"),
            Some(PathBuf::from("/srv/uploads/news/a.png"))
        );
        assert_eq!(store.resolve("https://cdn.example.com/a.png"), None);
        assert_eq!(store.resolve("/uploads/../etc/passwd"), None);
        assert_eq!(store.resolve("/uploadsx/a.png"), None);
        assert_eq!(store.resolve("/uploads/"), None);
    }

    #[test]
    fn test_form_data_field_names_are_normalised() {
        let mut form = FormData::default();
        form.insert_text("isPublished", "true")
            .insert_text("tags", "a")
            .insert_text("tags", "b");
        assert_eq!(form.text("is_published"), Some("true"));
        assert_eq!(form.list("tags"), Some(vec!["a".to_string(), "b".to_string()]));
        assert!(form.take_file("image").is_none());
    }
}
