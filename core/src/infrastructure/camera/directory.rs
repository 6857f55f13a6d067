use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use bytes::Bytes;

use crate::domain::{
    capture::{
        entities::EncodedFrame,
        ports::CameraDevice,
        value_objects::{CaptureConstraints, FrameSpec},
    },
    common::entities::app_errors::CoreError,
};

/// Camera backed by image files on disk, consumed in supply order. Files
/// pass through as-is; whoever produced them owns their size and encoding.
pub struct DirectoryCamera {
    inner: Mutex<DirectoryCameraInner>,
}

struct DirectoryCameraInner {
    paths: VecDeque<PathBuf>,
    open: bool,
}

impl DirectoryCamera {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            inner: Mutex::new(DirectoryCameraInner {
                paths: paths.into(),
                open: false,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DirectoryCameraInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CameraDevice for DirectoryCamera {
    async fn open(&self, _constraints: CaptureConstraints) -> Result<(), CoreError> {
        let mut inner = self.lock();
        if inner.open {
            return Err(CoreError::CameraUnavailable(
                "device already in use".to_string(),
            ));
        }
        if inner.paths.is_empty() {
            return Err(CoreError::CameraUnavailable(
                "no image files supplied".to_string(),
            ));
        }
        inner.open = true;
        Ok(())
    }

    async fn grab_frame(&self, _spec: FrameSpec) -> Result<EncodedFrame, CoreError> {
        // Pop under the lock, read the file outside it.
        let path = {
            let mut inner = self.lock();
            if !inner.open {
                return Err(CoreError::CameraUnavailable(
                    "camera is not open".to_string(),
                ));
            }
            inner.paths.pop_front().ok_or_else(|| {
                CoreError::CameraUnavailable("no image files left".to_string())
            })?
        };

        let data = tokio::fs::read(&path).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to read image file");
            CoreError::CameraUnavailable(format!("failed to read {}: {}", path.display(), e))
        })?;

        Ok(EncodedFrame {
            mime_type: mime_for_extension(&path).to_string(),
            data: Bytes::from(data),
            source: Some(path.display().to_string()),
        })
    }

    fn release(&self) {
        self.lock().open = false;
    }
}

fn mime_for_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[tokio::test]
    async fn test_frames_come_back_in_supply_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_file(&dir, "front.jpg", b"front");
        let second = write_file(&dir, "label.png", b"label");

        let camera = DirectoryCamera::new(vec![first.clone(), second]);
        camera.open(CaptureConstraints::default()).await.unwrap();

        let frame = camera.grab_frame(FrameSpec::default()).await.unwrap();
        assert_eq!(frame.data.as_ref(), b"front");
        assert_eq!(frame.mime_type, "image/jpeg");
        assert_eq!(frame.source.as_deref(), Some(first.display().to_string().as_str()));

        let frame = camera.grab_frame(FrameSpec::default()).await.unwrap();
        assert_eq!(frame.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_open_with_no_files_is_unavailable() {
        let camera = DirectoryCamera::new(Vec::new());
        let result = camera.open(CaptureConstraints::default()).await;
        assert!(matches!(result, Err(CoreError::CameraUnavailable(_))));
    }

    #[tokio::test]
    async fn test_grab_after_release_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "a.jpg", b"a");

        let camera = DirectoryCamera::new(vec![path]);
        camera.open(CaptureConstraints::default()).await.unwrap();
        camera.release();

        let result = camera.grab_frame(FrameSpec::default()).await;
        assert!(matches!(result, Err(CoreError::CameraUnavailable(_))));
    }

    #[tokio::test]
    async fn test_exhausted_queue_reports_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "only.jpeg", b"only");

        let camera = DirectoryCamera::new(vec![path]);
        camera.open(CaptureConstraints::default()).await.unwrap();
        camera.grab_frame(FrameSpec::default()).await.unwrap();

        let result = camera.grab_frame(FrameSpec::default()).await;
        assert!(matches!(result, Err(CoreError::CameraUnavailable(_))));
    }

    #[test]
    fn test_mime_mapping_is_case_insensitive() {
        assert_eq!(mime_for_extension(Path::new("x.PNG")), "image/png");
        assert_eq!(mime_for_extension(Path::new("x.WebP")), "image/webp");
        assert_eq!(mime_for_extension(Path::new("x.jpg")), "image/jpeg");
        assert_eq!(mime_for_extension(Path::new("noext")), "image/jpeg");
    }
}
