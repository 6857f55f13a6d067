/// Requested device characteristics when opening a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConstraints {
    /// Prefer the rear-facing camera when the device has more than one.
    pub prefer_rear: bool,
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            prefer_rear: true,
            ideal_width: 1920,
            ideal_height: 1080,
        }
    }
}

/// How the device should encode each grabbed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSpec {
    /// Longest side after downsampling. Frames already smaller pass through.
    pub max_dimension: u32,
    pub jpeg_quality: f32,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            max_dimension: 1024,
            jpeg_quality: 0.85,
        }
    }
}

/// Scales (width, height) so the longest side is at most `max`, preserving
/// aspect ratio with round-to-nearest on the short side. Returns the input
/// unchanged when it already fits or when a dimension is zero.
pub fn scaled_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let long = width.max(height);
    if long <= max {
        return (width, height);
    }

    let short = width.min(height);
    let scaled_short = ((short as u64 * max as u64 + long as u64 / 2) / long as u64) as u32;

    if width >= height {
        (max, scaled_short)
    } else {
        (scaled_short, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_is_capped_on_width() {
        assert_eq!(scaled_dimensions(1920, 1080, 1024), (1024, 576));
    }

    #[test]
    fn test_portrait_is_capped_on_height() {
        assert_eq!(scaled_dimensions(1080, 1920, 1024), (576, 1024));
    }

    #[test]
    fn test_small_frame_unchanged() {
        assert_eq!(scaled_dimensions(640, 480, 1024), (640, 480));
    }

    #[test]
    fn test_exact_fit_unchanged() {
        assert_eq!(scaled_dimensions(1024, 768, 1024), (1024, 768));
    }

    #[test]
    fn test_short_side_rounds_to_nearest() {
        // 1000/3000 of 1024 is 341.33, rounds down to 341.
        assert_eq!(scaled_dimensions(3000, 1000, 1024), (1024, 341));
        // 2000/3000 of 1024 is 682.67, rounds up to 683.
        assert_eq!(scaled_dimensions(3000, 2000, 1024), (1024, 683));
    }

    #[test]
    fn test_zero_dimension_passes_through() {
        assert_eq!(scaled_dimensions(0, 500, 1024), (0, 500));
    }
}
