use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::{
    capture::{
        entities::EncodedFrame,
        ports::CameraDevice,
        value_objects::{CaptureConstraints, FrameSpec},
    },
    common::entities::app_errors::CoreError,
};

/// Camera that serves preloaded frames. Backs the demo and the integration
/// tests; the open/release counters let tests assert the device is never
/// leaked.
pub struct ScriptedCamera {
    inner: Mutex<ScriptedCameraInner>,
    opens: AtomicUsize,
    releases: AtomicUsize,
    fail_open: bool,
}

struct ScriptedCameraInner {
    frames: VecDeque<EncodedFrame>,
    open: bool,
}

impl ScriptedCamera {
    pub fn new(frames: Vec<EncodedFrame>) -> Self {
        Self {
            inner: Mutex::new(ScriptedCameraInner {
                frames: frames.into(),
                open: false,
            }),
            opens: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
            fail_open: false,
        }
    }

    /// A camera whose open always fails, as a denied permission would.
    pub fn unavailable() -> Self {
        Self {
            fail_open: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptedCameraInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CameraDevice for ScriptedCamera {
    async fn open(&self, _constraints: CaptureConstraints) -> Result<(), CoreError> {
        if self.fail_open {
            return Err(CoreError::CameraUnavailable(
                "camera permission denied".to_string(),
            ));
        }
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.lock().open = true;
        Ok(())
    }

    async fn grab_frame(&self, _spec: FrameSpec) -> Result<EncodedFrame, CoreError> {
        let mut inner = self.lock();
        if !inner.open {
            return Err(CoreError::CameraUnavailable(
                "camera is not open".to_string(),
            ));
        }
        inner.frames.pop_front().ok_or_else(|| {
            CoreError::CameraUnavailable("scripted frames exhausted".to_string())
        })
    }

    fn release(&self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
        self.lock().open = false;
    }
}
