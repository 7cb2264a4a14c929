//! Control surface state: active mode, model image, and accumulation toggle.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use framelens_common::error::{FramelensError, FramelensResult};
use framelens_raster::Frame;

use crate::params::{ParamStore, RawParams, TuningParams};

/// The transform applied to each incoming frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoMode {
    /// Pass-through with edge pixels painted over the color frame.
    Color,
    /// Smoothed grayscale with edge pixels blanked to black.
    Gray,
    /// Outlines of thresholded regions on a blank canvas.
    Contour,
    /// Multi-scale canny composite in green shades.
    Canny,
    /// Per-pixel hue remapped into gray intensity.
    HueGray,
    /// 5-tap sobel gradient magnitude.
    Sobel,
    /// 5x5 laplacian response.
    Laplacian,
    /// Two-sided binary threshold.
    Binary,
    /// Feature matches between the captured model and the live frame.
    FeaturesTracking,
}

impl VideoMode {
    pub const ALL: [VideoMode; 9] = [
        VideoMode::Color,
        VideoMode::Gray,
        VideoMode::Contour,
        VideoMode::Canny,
        VideoMode::HueGray,
        VideoMode::Sobel,
        VideoMode::Laplacian,
        VideoMode::Binary,
        VideoMode::FeaturesTracking,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            VideoMode::Color => "color",
            VideoMode::Gray => "gray",
            VideoMode::Contour => "contour",
            VideoMode::Canny => "canny",
            VideoMode::HueGray => "hue-gray",
            VideoMode::Sobel => "sobel",
            VideoMode::Laplacian => "laplacian",
            VideoMode::Binary => "binary",
            VideoMode::FeaturesTracking => "features-tracking",
        }
    }
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VideoMode {
    type Err = FramelensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VideoMode::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| FramelensError::invalid_param("mode", s))
    }
}

/// Point-in-time copy of the control state, taken once per frame.
#[derive(Debug, Clone)]
pub struct ControlSnapshot {
    pub mode: VideoMode,
    pub params: TuningParams,
    pub accumulate: bool,
    pub model: Option<Arc<Frame>>,
}

#[derive(Debug)]
struct Shared {
    mode: VideoMode,
    accumulate: bool,
    model: Option<Arc<Frame>>,
}

/// Shared control state between the UI side and the dispatch side.
///
/// Mutations happen on the control side; the dispatcher reads one
/// [`ControlSnapshot`] per frame and never observes a mid-update state.
#[derive(Debug)]
pub struct Controls {
    shared: Mutex<Shared>,
    params: ParamStore,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            shared: Mutex::new(Shared {
                mode: VideoMode::Color,
                accumulate: false,
                model: None,
            }),
            params: ParamStore::default(),
        }
    }
}

impl Controls {
    pub fn set_mode(&self, mode: VideoMode) {
        let mut shared = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        shared.mode = mode;
    }

    pub fn mode(&self) -> VideoMode {
        self.shared.lock().unwrap_or_else(|e| e.into_inner()).mode
    }

    pub fn set_accumulate(&self, enabled: bool) {
        let mut shared = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        shared.accumulate = enabled;
    }

    /// Capture `frame` as the model image for feature tracking.
    pub fn set_model(&self, frame: Frame) {
        let mut shared = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        shared.model = Some(Arc::new(frame));
    }

    pub fn clear_model(&self) {
        let mut shared = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        shared.model = None;
    }

    /// Validate and apply a raw parameter set. See [`ParamStore::commit`].
    pub fn commit_params(&self, raw: &RawParams) -> FramelensResult<TuningParams> {
        self.params.commit(raw)
    }

    pub fn params(&self) -> TuningParams {
        self.params.current()
    }

    /// Consistent copy of the whole control state.
    pub fn snapshot(&self) -> ControlSnapshot {
        let shared = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        ControlSnapshot {
            mode: shared.mode,
            params: self.params.current(),
            accumulate: shared.accumulate,
            model: shared.model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_round_trips_through_its_name() {
        for mode in VideoMode::ALL {
            assert_eq!(mode.name().parse::<VideoMode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_mode_name_is_rejected() {
        assert!("sepia".parse::<VideoMode>().is_err());
    }

    #[test]
    fn snapshot_reflects_control_changes() {
        let controls = Controls::default();
        assert_eq!(controls.snapshot().mode, VideoMode::Color);
        assert!(controls.snapshot().model.is_none());

        controls.set_mode(VideoMode::Canny);
        controls.set_accumulate(true);
        controls.set_model(Frame::new(4, 4));

        let snap = controls.snapshot();
        assert_eq!(snap.mode, VideoMode::Canny);
        assert!(snap.accumulate);
        assert!(snap.model.is_some());

        controls.clear_model();
        assert!(controls.snapshot().model.is_none());
    }
}
