//! Drive the pipeline with synthetic frames and report run statistics.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use framelens_common::config::AppConfig;
use framelens_pipeline::{
    CollectingSink, Controls, DispatchHandle, Dispatcher, FrameSource, SyntheticSource, VideoMode,
};
use tracing::info;

pub fn run(
    frames: u64,
    mode: &str,
    width: usize,
    height: usize,
    accumulate: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mode: VideoMode = mode.parse()?;
    let config = AppConfig::load();

    let controls = Arc::new(Controls::default());
    controls.set_mode(mode);
    controls.set_accumulate(accumulate);

    let dispatcher = Dispatcher::new(controls, config.capture.accumulation_window);
    let handle = DispatchHandle::new(dispatcher);

    let mut source = SyntheticSource::new(width, height);
    source.start()?;
    info!(mode = %mode, frames, width, height, "starting synthetic run");

    let mut sink = CollectingSink::new();
    for _ in 0..frames {
        handle.offer(source.next_frame(), &mut sink)?;
    }
    source.stop()?;

    let stats = handle.stats();
    info!(
        processed = stats.frames_processed,
        dropped = stats.frames_dropped,
        drop_rate_pct = stats.drop_rate() * 100.0,
        "run complete"
    );

    if let Some(path) = output {
        let rendered = sink.last().context("no frame was rendered")?;
        super::save_rendered(rendered, &path)?;
        info!(path = %path.display(), "wrote last rendered frame");
    }
    Ok(())
}
