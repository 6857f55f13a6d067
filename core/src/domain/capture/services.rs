use tracing::debug;

use crate::domain::{
    capture::{
        entities::{CaptureOutcome, CaptureState, EncodedFrame},
        ports::CameraDevice,
        value_objects::{CaptureConstraints, FrameSpec},
    },
    common::{CaptureConfig, entities::app_errors::CoreError},
};

/// One scan's worth of camera work: exclusive device ownership plus a bounded
/// frame buffer.
pub struct CaptureSession<C: CameraDevice> {
    device: C,
    constraints: CaptureConstraints,
    frame_spec: FrameSpec,
    max_frames: usize,
    state: CaptureState,
    frames: Vec<EncodedFrame>,
}

impl<C: CameraDevice> CaptureSession<C> {
    pub fn new(device: C, config: CaptureConfig) -> Self {
        Self {
            device,
            constraints: CaptureConstraints::default(),
            frame_spec: FrameSpec {
                max_dimension: config.max_dimension,
                jpeg_quality: config.jpeg_quality,
            },
            max_frames: config.max_frames,
            state: CaptureState::Idle,
            frames: Vec::new(),
        }
    }

    /// Acquires the device. Calling again while already active is a no-op; a
    /// session parked at the frame limit stays parked until stopped.
    pub async fn start(&mut self) -> Result<(), CoreError> {
        match self.state {
            CaptureState::Active => Ok(()),
            CaptureState::Stopped => Err(CoreError::InvalidState(
                "frame limit reached, stop the session before starting again".to_string(),
            )),
            CaptureState::Idle => {
                self.device.open(self.constraints).await?;
                self.state = CaptureState::Active;
                Ok(())
            }
        }
    }

    /// Grabs one frame into the buffer. Hitting the frame limit releases the
    /// device immediately rather than keeping it warm for a capture that can
    /// never happen.
    pub async fn capture(&mut self) -> Result<CaptureOutcome, CoreError> {
        if self.state != CaptureState::Active {
            return Err(CoreError::InvalidState(
                "camera is not active".to_string(),
            ));
        }
        if self.frames.len() >= self.max_frames {
            return Err(CoreError::InvalidState(format!(
                "frame buffer is full ({} frames)",
                self.max_frames
            )));
        }

        let frame = self.device.grab_frame(self.frame_spec).await?;
        self.frames.push(frame);

        let auto_stopped = self.frames.len() == self.max_frames;
        if auto_stopped {
            debug!("frame limit reached, releasing camera");
            self.device.release();
            self.state = CaptureState::Stopped;
        }

        Ok(CaptureOutcome {
            frames_buffered: self.frames.len(),
            auto_stopped,
        })
    }

    /// Releases the device and returns to Idle. Safe to call in any state,
    /// any number of times. Buffered frames survive.
    pub fn stop(&mut self) {
        if self.state == CaptureState::Active {
            self.device.release();
        }
        self.state = CaptureState::Idle;
    }

    /// Drops one buffered frame by position.
    pub fn remove_frame(&mut self, index: usize) -> Result<(), CoreError> {
        if index >= self.frames.len() {
            return Err(CoreError::NotFound);
        }
        self.frames.remove(index);
        Ok(())
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    /// Stops and empties the buffer in one motion.
    pub fn reset(&mut self) {
        self.stop();
        self.clear_frames();
    }

    pub fn frames(&self) -> &[EncodedFrame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }
}

impl<C: CameraDevice> Drop for CaptureSession<C> {
    fn drop(&mut self) {
        if self.state == CaptureState::Active {
            self.device.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct FakeCamera {
        opens: AtomicUsize,
        releases: Arc<AtomicUsize>,
        grabbed: AtomicUsize,
        fail_open: bool,
        fail_grab: Mutex<Vec<bool>>,
    }

    impl FakeCamera {
        fn new() -> Self {
            Self {
                opens: AtomicUsize::new(0),
                releases: Arc::new(AtomicUsize::new(0)),
                grabbed: AtomicUsize::new(0),
                fail_open: false,
                fail_grab: Mutex::new(Vec::new()),
            }
        }

        fn unavailable() -> Self {
            Self {
                fail_open: true,
                ..Self::new()
            }
        }
    }

    impl CameraDevice for FakeCamera {
        async fn open(&self, _constraints: CaptureConstraints) -> Result<(), CoreError> {
            if self.fail_open {
                return Err(CoreError::CameraUnavailable("no device".to_string()));
            }
            self.opens.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn grab_frame(&self, _spec: FrameSpec) -> Result<EncodedFrame, CoreError> {
            let fail = self.fail_grab.lock().unwrap().pop().unwrap_or(false);
            if fail {
                return Err(CoreError::CameraUnavailable("grab failed".to_string()));
            }
            let n = self.grabbed.fetch_add(1, Ordering::SeqCst);
            Ok(EncodedFrame {
                mime_type: "image/jpeg".to_string(),
                data: Bytes::from(vec![n as u8; 4]),
                source: Some(format!("frame-{}", n)),
            })
        }

        fn release(&self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn session() -> CaptureSession<FakeCamera> {
        CaptureSession::new(FakeCamera::new(), CaptureConfig::default())
    }

    #[tokio::test]
    async fn test_third_capture_auto_stops_and_releases() {
        let mut session = session();
        session.start().await.unwrap();

        let first = session.capture().await.unwrap();
        assert_eq!(first.frames_buffered, 1);
        assert!(!first.auto_stopped);

        session.capture().await.unwrap();
        let third = session.capture().await.unwrap();
        assert_eq!(third.frames_buffered, 3);
        assert!(third.auto_stopped);

        assert_eq!(session.state(), CaptureState::Stopped);
        assert_eq!(session.device.releases.load(Ordering::SeqCst), 1);
        assert_eq!(session.frame_count(), 3);
    }

    #[tokio::test]
    async fn test_capture_without_start_is_rejected() {
        let mut session = session();
        let result = session.capture().await;
        assert!(matches!(result, Err(CoreError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_start_twice_opens_device_once() {
        let mut session = session();
        session.start().await.unwrap();
        session.start().await.unwrap();
        assert_eq!(session.device.opens.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_start_after_auto_stop_is_rejected() {
        let mut session = session();
        session.start().await.unwrap();
        for _ in 0..3 {
            session.capture().await.unwrap();
        }

        assert!(matches!(
            session.start().await,
            Err(CoreError::InvalidState(_))
        ));

        // A full stop unparks it.
        session.stop();
        session.start().await.unwrap();
        assert_eq!(session.state(), CaptureState::Active);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent_and_keeps_frames() {
        let mut session = session();
        session.start().await.unwrap();
        session.capture().await.unwrap();

        session.stop();
        session.stop();

        assert_eq!(session.state(), CaptureState::Idle);
        assert_eq!(session.device.releases.load(Ordering::SeqCst), 1);
        assert_eq!(session.frame_count(), 1);
    }

    #[tokio::test]
    async fn test_open_failure_stays_idle() {
        let mut session = CaptureSession::new(FakeCamera::unavailable(), CaptureConfig::default());
        let result = session.start().await;
        assert!(matches!(result, Err(CoreError::CameraUnavailable(_))));
        assert_eq!(session.state(), CaptureState::Idle);
    }

    #[tokio::test]
    async fn test_grab_failure_keeps_session_active() {
        let mut session = session();
        session.device.fail_grab.lock().unwrap().push(true);
        session.start().await.unwrap();

        let result = session.capture().await;
        assert!(result.is_err());
        assert_eq!(session.state(), CaptureState::Active);
        assert_eq!(session.frame_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_frame_out_of_range() {
        let mut session = session();
        session.start().await.unwrap();
        session.capture().await.unwrap();

        assert!(matches!(session.remove_frame(5), Err(CoreError::NotFound)));
        session.remove_frame(0).unwrap();
        assert_eq!(session.frame_count(), 0);
    }

    #[tokio::test]
    async fn test_reset_releases_and_clears() {
        let mut session = session();
        session.start().await.unwrap();
        session.capture().await.unwrap();

        session.reset();
        assert_eq!(session.state(), CaptureState::Idle);
        assert_eq!(session.frame_count(), 0);
        assert_eq!(session.device.releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_releases_active_device() {
        let camera = FakeCamera::new();
        let releases = Arc::clone(&camera.releases);
        {
            let mut session = CaptureSession::new(camera, CaptureConfig::default());
            session.start().await.unwrap();
            assert_eq!(releases.load(Ordering::SeqCst), 0);
        }
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }
}
