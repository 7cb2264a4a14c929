//! Apply one video mode to a single image file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use framelens_pipeline::{CollectingSink, Controls, Dispatcher, RawParams, VideoMode};
use tracing::info;

#[allow(clippy::too_many_arguments)]
pub fn run(
    input: PathBuf,
    output: PathBuf,
    mode: &str,
    gauss: i32,
    thresh1: i32,
    thresh2: i32,
    binary_min: i32,
    binary_max: i32,
) -> anyhow::Result<()> {
    let mode: VideoMode = mode.parse()?;
    let frame = super::load_frame(&input)?;
    info!(
        mode = %mode,
        width = frame.width(),
        height = frame.height(),
        "processing image"
    );

    let controls = Arc::new(Controls::default());
    controls.set_mode(mode);
    controls.commit_params(&RawParams {
        gauss: gauss.to_string(),
        thresh1: thresh1.to_string(),
        thresh2: thresh2.to_string(),
        binary_min: binary_min.to_string(),
        binary_max: binary_max.to_string(),
    })?;

    let mut dispatcher = Dispatcher::new(controls, 4);
    let mut sink = CollectingSink::new();
    dispatcher.process_frame(Some(frame), &mut sink)?;

    let rendered = sink.last().context("the dispatcher produced no output")?;
    super::save_rendered(rendered, &output)?;
    info!(path = %output.display(), "wrote output image");
    Ok(())
}
