//! Per-frame dispatch: snapshot the controls, apply the active mode, mirror
//! once, hand the result to the display sink.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, TryLockError};

use tracing::{debug, warn};

use framelens_common::error::FramelensResult;
use framelens_raster::{blur, contour, convert, edge, threshold, Frame, GrayFrame};

use crate::accum::AccumBuffer;
use crate::compositor;
use crate::controls::{ControlSnapshot, Controls, VideoMode};
use crate::palette::{Palette, PaletteColor};
use crate::params::TuningParams;
use crate::sink::{DisplaySink, Rendered};
use crate::source::FeatureMatcher;

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames_processed: u64,
    pub frames_dropped: u64,
}

impl PipelineStats {
    /// Share of offered frames that were dropped, 0.0 when nothing ran.
    pub fn drop_rate(&self) -> f64 {
        let total = self.frames_processed + self.frames_dropped;
        if total == 0 {
            0.0
        } else {
            self.frames_dropped as f64 / total as f64
        }
    }
}

/// Applies the active [`VideoMode`] to each incoming frame.
///
/// Holds the per-run state the transforms need: the accumulation buffer,
/// the palette, and the optional feature matcher.
pub struct Dispatcher {
    controls: Arc<Controls>,
    matcher: Option<Box<dyn FeatureMatcher>>,
    accum: AccumBuffer,
    palette: Palette,
    frames_processed: u64,
    model_notice_sent: bool,
}

impl Dispatcher {
    pub fn new(controls: Arc<Controls>, accumulation_window: usize) -> Self {
        Self {
            controls,
            matcher: None,
            accum: AccumBuffer::new(accumulation_window),
            palette: Palette::standard(),
            frames_processed: 0,
            model_notice_sent: false,
        }
    }

    pub fn with_matcher(mut self, matcher: Box<dyn FeatureMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn controls(&self) -> &Arc<Controls> {
        &self.controls
    }

    /// Frames this dispatcher has fully processed. Drop accounting lives on
    /// [`DispatchHandle::stats`], which merges this counter with its own
    /// dropped-frame count.
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Run one dispatch cycle.
    ///
    /// A `None` frame is a safe no-op: delivery gaps skip the cycle instead
    /// of presenting stale output. The rendered image is mirrored exactly
    /// once before it reaches the sink.
    pub fn process_frame(
        &mut self,
        frame: Option<Frame>,
        sink: &mut dyn DisplaySink,
    ) -> FramelensResult<()> {
        let Some(frame) = frame else {
            debug!("no frame delivered, skipping this cycle");
            return Ok(());
        };

        let snap = self.controls.snapshot();
        if snap.mode != VideoMode::FeaturesTracking {
            self.model_notice_sent = false;
        }

        let rendered = self.render(&frame, &snap)?;
        sink.present(rendered.mirror_horizontal());
        self.frames_processed += 1;
        Ok(())
    }

    fn render(&mut self, frame: &Frame, snap: &ControlSnapshot) -> FramelensResult<Rendered> {
        let params = &snap.params;
        let rendered = match snap.mode {
            VideoMode::Color => {
                let edges = live_edges(frame, params);
                let mut out = frame.clone();
                out.paint_masked(self.palette.color(PaletteColor::EdgeOverlay), &edges)?;
                Rendered::Color(out)
            }
            VideoMode::Gray => {
                let mut gray_smooth = smoothed_gray(frame, params);
                let edges = edge::canny(&gray_smooth, params.thresh1, params.thresh2);
                gray_smooth.blank_masked(&edges)?;
                Rendered::Gray(gray_smooth)
            }
            VideoMode::Contour => Rendered::Color(contour::contour_image(
                &smoothed_gray(frame, params),
                params.binary_min,
                params.binary_max,
                self.palette.color(PaletteColor::ContourHighlight),
            )?),
            VideoMode::Canny => {
                let gray = convert::grayscale(frame);
                let gray_smooth = blur::smooth_gaussian(&gray, params.gauss_size());
                Rendered::Color(compositor::composite(
                    &gray,
                    &gray_smooth,
                    params,
                    &mut self.accum,
                    snap.accumulate,
                    &self.palette,
                )?)
            }
            VideoMode::HueGray => Rendered::Gray(convert::hue_gray(frame)?),
            VideoMode::Sobel => Rendered::Gray(edge::sobel_magnitude(&convert::grayscale(frame))),
            VideoMode::Laplacian => Rendered::Gray(edge::laplacian(&convert::grayscale(frame))),
            VideoMode::Binary => Rendered::Gray(threshold::binary(
                &convert::grayscale(frame),
                params.binary_min,
                params.binary_max,
            )),
            VideoMode::FeaturesTracking => self.render_matches(frame, snap)?,
        };
        Ok(rendered)
    }

    fn render_matches(&mut self, frame: &Frame, snap: &ControlSnapshot) -> FramelensResult<Rendered> {
        if let (Some(model), Some(matcher)) = (snap.model.as_deref(), self.matcher.as_deref()) {
            return Ok(Rendered::Color(matcher.draw_matches(model, frame)?));
        }

        // One notice per selection of the mode, not one per frame.
        if !self.model_notice_sent {
            if snap.model.is_none() {
                warn!("feature tracking selected with no model captured, passing frames through");
            } else {
                warn!("feature tracking selected with no matcher installed, passing frames through");
            }
            self.model_notice_sent = true;
        }
        Ok(Rendered::Color(frame.clone()))
    }
}

fn smoothed_gray(frame: &Frame, params: &TuningParams) -> GrayFrame {
    blur::smooth_gaussian(&convert::grayscale(frame), params.gauss_size())
}

fn live_edges(frame: &Frame, params: &TuningParams) -> GrayFrame {
    edge::canny(&smoothed_gray(frame, params), params.thresh1, params.thresh2)
}

struct HandleInner {
    dispatcher: Mutex<Dispatcher>,
    dropped: AtomicU64,
}

/// Hand-off point between the frame source and the dispatcher.
///
/// When a frame arrives while the previous one is still being processed it
/// is dropped (drop-newest), keeping the in-progress cycle untouched.
#[derive(Clone)]
pub struct DispatchHandle {
    inner: Arc<HandleInner>,
}

impl DispatchHandle {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                dispatcher: Mutex::new(dispatcher),
                dropped: AtomicU64::new(0),
            }),
        }
    }

    /// Offer a frame for processing; drops it when the dispatcher is busy.
    pub fn offer(&self, frame: Frame, sink: &mut dyn DisplaySink) -> FramelensResult<()> {
        match self.inner.dispatcher.try_lock() {
            Ok(mut dispatcher) => dispatcher.process_frame(Some(frame), sink),
            Err(TryLockError::WouldBlock) => {
                self.inner.dropped.fetch_add(1, Ordering::Relaxed);
                debug!("dispatcher busy, dropping newest frame");
                Ok(())
            }
            Err(TryLockError::Poisoned(poisoned)) => {
                let mut dispatcher = poisoned.into_inner();
                dispatcher.process_frame(Some(frame), sink)
            }
        }
    }

    pub fn stats(&self) -> PipelineStats {
        let dispatcher = self
            .inner
            .dispatcher
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        PipelineStats {
            frames_processed: dispatcher.frames_processed,
            frames_dropped: self.inner.dropped.load(Ordering::Relaxed),
        }
    }
}
