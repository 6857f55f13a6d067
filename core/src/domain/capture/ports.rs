use std::future::Future;

use crate::domain::{
    capture::{
        entities::EncodedFrame,
        value_objects::{CaptureConstraints, FrameSpec},
    },
    common::entities::app_errors::CoreError,
};

#[cfg_attr(test, mockall::automock)]
pub trait CameraDevice: Send + Sync {
    /// Acquires the device. The session holds it exclusively until released.
    fn open(
        &self,
        constraints: CaptureConstraints,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Grabs one frame, downsampled and encoded as `spec` directs.
    fn grab_frame(
        &self,
        spec: FrameSpec,
    ) -> impl Future<Output = Result<EncodedFrame, CoreError>> + Send;

    /// Releases the device. Safe to call when not open.
    fn release(&self);
}
