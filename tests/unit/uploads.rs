use axum::body::Bytes;
use hr_portal::config::UploadsConfig;
use hr_portal::utils::{UploadKind, UploadStore, UploadedFile};

fn temp_store() -> (UploadStore, std::path::PathBuf) {
    let dir = std::env::temp_dir().join(format!("hr-portal-uploads-{}", uuid::Uuid::new_v4()));
    let store = UploadStore::new(&UploadsConfig {
        dir: dir.to_string_lossy().into_owned(),
        max_bytes: 1024 * 1024,
    });
    (store, dir)
}

fn file(name: &str, bytes: &'static [u8]) -> UploadedFile {
    UploadedFile {
        file_name: name.to_string(),
        content_type: None,
        bytes: Bytes::from_static(bytes),
    }
}

#[tokio::test]
async fn test_save_then_remove_local_file() {
    let (store, dir) = temp_store();

    let public_path = store
        .save(UploadKind::NewsImage, &file("banner.PNG", b"\x89PNG"))
        .await
        .unwrap();
    assert!(public_path.starts_with("/uploads/news/"));
    assert!(public_path.ends_with(".png"));

    let on_disk = store.resolve(&public_path).unwrap();
    assert!(on_disk.exists());

    assert!(store.remove(&public_path).await.unwrap());
    assert!(!on_disk.exists());
    // 再次删除不是错误
    assert!(!store.remove(&public_path).await.unwrap());

    let _ = tokio::fs::remove_dir_all(dir).await;
}

#[tokio::test]
async fn test_rejected_uploads_write_nothing() {
    let (store, dir) = temp_store();

    assert!(store.save(UploadKind::Resume, &file("cv.exe", b"MZ")).await.is_err());
    assert!(store.save(UploadKind::Resume, &file("cv.pdf", b"")).await.is_err());
    assert!(!dir.join("resumes").exists());
}

#[tokio::test]
async fn test_remote_urls_are_never_unlinked() {
    let (store, _dir) = temp_store();
    assert!(!store.remove("https://cdn.example.com/a.png").await.unwrap());
    assert!(!store.remove("/uploads/../../etc/passwd").await.unwrap());
}
