//! Frame pipeline: control state, per-frame transform dispatch, and the
//! multi-scale edge compositor.
//!
//! The flow per frame: a source delivers a frame, the dispatcher takes one
//! [`ControlSnapshot`](controls::ControlSnapshot), applies the active
//! [`VideoMode`](controls::VideoMode), mirrors the result once, and hands it
//! to the display sink. Frames arriving while a cycle is in progress are
//! dropped, never queued.

pub mod accum;
pub mod compositor;
pub mod controls;
pub mod dispatcher;
pub mod palette;
pub mod params;
pub mod sink;
pub mod source;

pub use accum::AccumBuffer;
pub use controls::{ControlSnapshot, Controls, VideoMode};
pub use dispatcher::{DispatchHandle, Dispatcher, PipelineStats};
pub use palette::{Palette, PaletteColor};
pub use params::{ParamStore, RawParams, TuningParams};
pub use sink::{CollectingSink, DisplaySink, NullSink, Rendered};
pub use source::{FeatureMatcher, FrameSource, SyntheticSource};
