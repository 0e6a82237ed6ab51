//! Start one render and report its progress.
//!
//! Errors never escape this module: a failed call is logged and then
//! treated exactly like an empty reply, so nothing further is reported.

use std::io::{self, Write};

use serde_json::{json, Map};

use remotion_lambda::{LambdaInvoker, RemotionClient, RenderParams, RenderProgress, RenderResponse};

use crate::settings::ProgressMode;

/// Composition rendered by the demo.
pub const DEMO_COMPOSITION: &str = "main";

/// What the demo learned, in the order it learned it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoReport {
    pub render: Option<RenderResponse>,
    pub progress: Option<RenderProgress>,
}

impl DemoReport {
    /// Write the report as plain lines.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        if let Some(render) = &self.render {
            writeln!(out, "{}", render.render_id)?;
            writeln!(out, "{}", render.bucket_name)?;
            writeln!(out)?;

            if let Some(progress) = &self.progress {
                writeln!(out, "Overall progress")?;
                writeln!(out, "{}", progress.overall_progress)?;
            }
        }
        writeln!(out)
    }
}

/// The render request the demo submits: composition `main` with
/// `{"hi": "there"}` as input props.
pub fn demo_params() -> RenderParams {
    let mut data = Map::new();
    data.insert("hi".to_string(), json!("there"));
    RenderParams::new(DEMO_COMPOSITION).with_data(data)
}

/// Submit `params` once, then ask for progress of the started render.
///
/// No progress request is made when the render call yields nothing.
pub async fn run_demo<I: LambdaInvoker>(
    client: &RemotionClient<I>,
    params: &RenderParams,
    mode: &ProgressMode,
) -> DemoReport {
    let render = match client.render_media_on_lambda(params).await {
        Ok(render) => render,
        Err(e) => {
            tracing::warn!(error = %e, "Render request failed");
            None
        }
    };

    let Some(render) = render else {
        tracing::info!("Render request returned nothing");
        return DemoReport::default();
    };

    tracing::info!(
        render_id = %render.render_id,
        bucket_name = %render.bucket_name,
        "Render started",
    );

    let progress = match mode {
        ProgressMode::Once => client
            .get_render_progress(&render.render_id, &render.bucket_name)
            .await
            .map_err(|e| tracing::warn!(error = %e, "Progress request failed"))
            .ok()
            .flatten(),
        ProgressMode::Wait(config) => client
            .wait_for_render(&render.render_id, &render.bucket_name, config)
            .await
            .map_err(|e| tracing::warn!(error = %e, "Waiting for render failed"))
            .ok(),
    };

    DemoReport {
        render: Some(render),
        progress,
    }
}
