//! Render and progress request types and their wire payloads.
//!
//! The render function accepts camelCase JSON tagged with a `"type"`
//! field (`"start"` for a new render, `"status"` for a progress query)
//! and the protocol `"version"` the caller speaks.

use serde::Serialize;
use serde_json::{Map, Value};

use remotion_core::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Protocol version sent with every payload unless overridden on the client.
pub const DEFAULT_PROTOCOL_VERSION: &str = "4.0.0";

/// Largest serialized input props accepted inline in a start payload.
pub const MAX_INLINE_PROPS_BYTES: usize = 200_000;

const TYPE_START: &str = "start";
const TYPE_STATUS: &str = "status";

// ---------------------------------------------------------------------------
// Render options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Codec {
    #[default]
    H264,
    H265,
    Vp8,
    Vp9,
    Mp3,
    Aac,
    Wav,
    Prores,
    H264Mkv,
    Gif,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
    None,
}

/// ACL applied to the rendered output object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Privacy {
    #[default]
    Public,
    Private,
    NoAcl,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Verbose,
    #[default]
    Info,
    Warn,
    Error,
}

/// Everything needed to start a render, apart from connection settings.
///
/// `data` becomes the composition's input props. The remaining fields
/// default to the values the render function itself assumes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderParams {
    pub composition: String,
    #[serde(skip_serializing)]
    pub data: Map<String, Value>,
    pub codec: Codec,
    pub image_format: ImageFormat,
    pub jpeg_quality: u8,
    pub crf: Option<u8>,
    pub max_retries: u32,
    pub privacy: Privacy,
    pub log_level: LogLevel,
    pub frames_per_lambda: Option<u32>,
    pub frame_range: Option<(u32, u32)>,
    pub out_name: Option<String>,
    pub timeout_in_milliseconds: u64,
    pub scale: f64,
    pub every_nth_frame: u32,
    pub number_of_gif_loops: u32,
    pub concurrency_per_lambda: u32,
    pub muted: bool,
    pub overwrite: bool,
    pub env_variables: Map<String, Value>,
    pub chromium_options: Map<String, Value>,
    pub audio_bitrate: Option<String>,
    pub video_bitrate: Option<String>,
    pub audio_codec: Option<String>,
    pub force_width: Option<u32>,
    pub force_height: Option<u32>,
    pub dump_browser_logs: bool,
}

impl RenderParams {
    /// Render `composition` with empty input props and default options.
    pub fn new(composition: impl Into<String>) -> Self {
        Self {
            composition: composition.into(),
            data: Map::new(),
            codec: Codec::default(),
            image_format: ImageFormat::default(),
            jpeg_quality: 80,
            crf: None,
            max_retries: 1,
            privacy: Privacy::default(),
            log_level: LogLevel::default(),
            frames_per_lambda: None,
            frame_range: None,
            out_name: None,
            timeout_in_milliseconds: 30_000,
            scale: 1.0,
            every_nth_frame: 1,
            number_of_gif_loops: 0,
            concurrency_per_lambda: 1,
            muted: false,
            overwrite: false,
            env_variables: Map::new(),
            chromium_options: Map::new(),
            audio_bitrate: None,
            video_bitrate: None,
            audio_codec: None,
            force_width: None,
            force_height: None,
            dump_browser_logs: false,
        }
    }

    /// Replace the input props.
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }
}

/// A progress query for a render started earlier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderProgressParams {
    pub render_id: String,
    pub bucket_name: String,
    pub function_name: String,
    pub region: String,
}

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// Input props travel as a JSON string wrapped in a tagged envelope.
#[derive(Debug, Serialize)]
struct InlineInputProps {
    r#type: &'static str,
    payload: String,
}

#[derive(Debug, Serialize)]
struct DownloadBehavior {
    r#type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartPayload<'a> {
    r#type: &'static str,
    version: &'a str,
    region: &'a str,
    serve_url: &'a str,
    renderer_function_name: Option<&'a str>,
    input_props: InlineInputProps,
    download_behavior: DownloadBehavior,
    #[serde(flatten)]
    params: &'a RenderParams,
}

#[derive(Debug, Serialize)]
struct StatusPayload<'a> {
    r#type: &'static str,
    version: &'a str,
    #[serde(flatten)]
    params: &'a RenderProgressParams,
}

/// Serialize `params` into a start payload.
///
/// Fails with [`CoreError::Validation`] when the input props are too
/// large to send inline.
pub(crate) fn encode_start(
    params: &RenderParams,
    region: &str,
    serve_url: &str,
    version: &str,
) -> Result<Vec<u8>, crate::error::LambdaError> {
    let props = serde_json::to_string(&params.data)?;
    if props.len() > MAX_INLINE_PROPS_BYTES {
        return Err(CoreError::Validation(format!(
            "Input props are {} bytes, limit is {MAX_INLINE_PROPS_BYTES}",
            props.len()
        ))
        .into());
    }

    let payload = StartPayload {
        r#type: TYPE_START,
        version,
        region,
        serve_url,
        renderer_function_name: None,
        input_props: InlineInputProps {
            r#type: "payload",
            payload: props,
        },
        download_behavior: DownloadBehavior {
            r#type: "play-in-browser",
        },
        params,
    };

    Ok(serde_json::to_vec(&payload)?)
}

/// Serialize `params` into a status payload.
pub(crate) fn encode_status(
    params: &RenderProgressParams,
    version: &str,
) -> Result<Vec<u8>, crate::error::LambdaError> {
    let payload = StatusPayload {
        r#type: TYPE_STATUS,
        version,
        params,
    };
    Ok(serde_json::to_vec(&payload)?)
}
