//! Configuration schema definitions
//!
//! Render jobs are described in TOML: a `[render]` table with the defaults
//! shared by every job, and one `[[jobs]]` entry per artwork.

use crate::error::{Error, Result as CoreResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Render settings used by jobs without their own `render` table
    #[serde(default)]
    pub render: RenderSettings,

    /// Artworks to render
    #[serde(default)]
    pub jobs: Vec<RenderJob>,
}

impl ConfigSchema {
    /// Find a job by artwork id
    pub fn job(&self, id: &str) -> Option<&RenderJob> {
        self.jobs.iter().find(|job| job.artwork.id == id)
    }

    /// Settings that apply to a job, falling back to the shared defaults
    pub fn settings_for<'a>(&'a self, job: &'a RenderJob) -> &'a RenderSettings {
        job.render.as_ref().unwrap_or(&self.render)
    }

    /// Reject settings that deserialize but cannot produce an image
    pub fn validate(&self) -> CoreResult<()> {
        self.render.validate()?;
        for job in &self.jobs {
            if let Some(settings) = &job.render {
                settings
                    .validate()
                    .map_err(|e| e.with_context(format!("job `{}`", job.artwork.id)))?;
            }
        }
        Ok(())
    }
}

/// One artwork plus optional per-job settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderJob {
    #[serde(flatten)]
    pub artwork: Artwork,

    /// Replaces the shared `[render]` table entirely when present
    #[serde(default)]
    pub render: Option<RenderSettings>,
}

/// Source artwork and its real-world size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub height_inches: f64,
    pub width_inches: f64,
    /// File name relative to the input directory
    pub file_name: String,
}

/// How a single artwork is rendered and encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_canvas_size")]
    pub canvas_width: u32,

    #[serde(default = "default_canvas_size")]
    pub canvas_height: u32,

    #[serde(default)]
    pub background: BackgroundConfig,

    #[serde(default)]
    pub position: Anchor,

    #[serde(default)]
    pub x_offset: i32,

    #[serde(default)]
    pub y_offset: i32,

    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Base name for the output file; the artwork file stem is used when absent
    #[serde(default)]
    pub output_name: Option<String>,

    /// Byte ceiling for the encoded file
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    #[serde(default = "default_shadow_layers")]
    pub shadow_layers: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            canvas_width: default_canvas_size(),
            canvas_height: default_canvas_size(),
            background: BackgroundConfig::default(),
            position: Anchor::default(),
            x_offset: 0,
            y_offset: 0,
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            output_name: None,
            max_file_size: default_max_file_size(),
            shadow_layers: default_shadow_layers(),
        }
    }
}

impl RenderSettings {
    /// Check canvas size and wall height
    pub fn validate(&self) -> CoreResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(Error::invalid_settings(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if let BackgroundConfig::Wall { height_inches, .. } = self.background {
            if !(height_inches.is_finite() && height_inches > 0.0) {
                return Err(Error::invalid_settings(format!(
                    "wall height_inches must be a positive number, got {height_inches}"
                ))
                .with_suggestion("Set background.height_inches to the real height of the wall"));
            }
        }
        Ok(())
    }
}

fn default_canvas_size() -> u32 {
    2048
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("static/art-images")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("static/output-images")
}

/// 19 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 19 * 1024 * 1024;

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_shadow_layers() -> usize {
    7
}

/// Encoded output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
    #[serde(rename = "webp")]
    WebP,
}

impl OutputFormat {
    /// File extension written for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    /// Whether the encoder honours a quality setting
    pub fn supports_quality(&self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            other => Err(format!("unsupported output format: {other}")),
        }
    }
}

/// Canvas background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackgroundConfig {
    /// Two-stop diagonal gradient across the whole canvas
    Gradient {
        #[serde(default = "default_gradient_from")]
        from: HexColor,
        #[serde(default = "default_gradient_to")]
        to: HexColor,
    },
    /// Wall texture scaled to the canvas; its real height sets the pixels-per-inch ratio
    Wall {
        image: PathBuf,
        height_inches: f64,
    },
    Transparent,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig::Gradient {
            from: default_gradient_from(),
            to: default_gradient_to(),
        }
    }
}

fn default_gradient_from() -> HexColor {
    HexColor([0xff, 0xff, 0xff])
}

fn default_gradient_to() -> HexColor {
    // CSS `lightgray`
    HexColor([0xd3, 0xd3, 0xd3])
}

/// RGB color written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(pub [u8; 3]);

impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #rrggbb, got {s:?}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("invalid hex color {s:?}"))
        };
        Ok(HexColor([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Placement anchor for the artwork on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(Anchor::Center),
            "top-left" => Ok(Anchor::TopLeft),
            "top" => Ok(Anchor::Top),
            "top-right" => Ok(Anchor::TopRight),
            "left" => Ok(Anchor::Left),
            "right" => Ok(Anchor::Right),
            "bottom-left" => Ok(Anchor::BottomLeft),
            "bottom" => Ok(Anchor::Bottom),
            "bottom-right" => Ok(Anchor::BottomRight),
            other => Err(format!("unknown position: {other}")),
        }
    }
}
