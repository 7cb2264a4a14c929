//! Tuning parameters and their all-or-nothing commit protocol.

use std::sync::Mutex;

use framelens_common::error::{FramelensError, FramelensResult};

/// Validated tuning parameters consumed by the transform modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuningParams {
    /// Gaussian kernel size used by the smoothing pre-pass.
    pub gauss: i32,
    /// First canny threshold.
    pub thresh1: i32,
    /// Second canny threshold.
    pub thresh2: i32,
    /// Lower bound for binary thresholding.
    pub binary_min: i32,
    /// Paint value for binary thresholding.
    pub binary_max: i32,
}

impl Default for TuningParams {
    fn default() -> Self {
        Self {
            gauss: 7,
            thresh1: 20,
            thresh2: 25,
            binary_min: 180,
            binary_max: 255,
        }
    }
}

impl TuningParams {
    /// Gaussian kernel size as a usize, negative values treated as no-op.
    pub fn gauss_size(&self) -> usize {
        self.gauss.max(0) as usize
    }
}

/// Unvalidated textual parameter values as entered on the control surface.
#[derive(Debug, Clone, Default)]
pub struct RawParams {
    pub gauss: String,
    pub thresh1: String,
    pub thresh2: String,
    pub binary_min: String,
    pub binary_max: String,
}

impl RawParams {
    /// Parse into a validated set. Fails on the first field that is not an
    /// integer, naming that field.
    pub fn parse(&self) -> FramelensResult<TuningParams> {
        Ok(TuningParams {
            gauss: parse_field("gauss", &self.gauss)?,
            thresh1: parse_field("thresh1", &self.thresh1)?,
            thresh2: parse_field("thresh2", &self.thresh2)?,
            binary_min: parse_field("binary_min", &self.binary_min)?,
            binary_max: parse_field("binary_max", &self.binary_max)?,
        })
    }
}

fn parse_field(field: &'static str, value: &str) -> FramelensResult<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| FramelensError::invalid_param(field, value))
}

/// Shared store for the active parameter set.
///
/// `commit` is all-or-nothing: a raw set either replaces the active set in
/// one step or leaves it untouched, so transforms never observe a half
/// applied update.
#[derive(Debug)]
pub struct ParamStore {
    active: Mutex<TuningParams>,
}

impl Default for ParamStore {
    fn default() -> Self {
        Self {
            active: Mutex::new(TuningParams::default()),
        }
    }
}

impl ParamStore {
    /// Validate `raw` and, on success, swap it in as the active set.
    pub fn commit(&self, raw: &RawParams) -> FramelensResult<TuningParams> {
        let parsed = raw.parse()?;
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        *active = parsed;
        Ok(parsed)
    }

    /// Copy of the active parameter set.
    pub fn current(&self) -> TuningParams {
        *self.active.lock().unwrap_or_else(|e| e.into_inner())
    }
}
