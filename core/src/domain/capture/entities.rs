use bytes::Bytes;

/// A single still frame, already downsampled and compressed by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    pub mime_type: String,
    pub data: Bytes,
    /// Where the frame came from, when the device knows (a file path, a
    /// fixture name). Carried onto the committed item as its image reference.
    pub source: Option<String>,
}

/// Lifecycle of one capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Active,
    /// Reached the frame limit, device already released. Only a full stop
    /// returns the session to Idle.
    Stopped,
}

/// What a single capture call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOutcome {
    pub frames_buffered: usize,
    pub auto_stopped: bool,
}
