use std::fmt;
use thiserror::Error;

/// 1-based page number
pub type PageNumber = usize;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[cfg(feature = "lopdf")]
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Document has no pages")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, ViewerError>;

/// Failures reported by the page rendering pipeline.
///
/// These are the only errors allowed to leave the engine; geometry and
/// input problems are always recovered locally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Page {0} is out of range")]
    PageOutOfRange(PageNumber),
    #[error("Frame is {actual} bytes but the surface expects {expected}")]
    FrameSize { expected: usize, actual: usize },
    #[error("Render failed: {0}")]
    Failed(String),
}

// =============================================================================
// Geometry
// =============================================================================

/// Width and height in CSS pixels (or points for natural page sizes)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Inclusive point-in-rectangle test
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// Page geometry at a given scale, as reported by the document backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl Viewport {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// 2D affine transform `[a, b, c, d, e, f]` handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(pub [f64; 6]);

impl Transform {
    pub const IDENTITY: Transform = Transform([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Uniform scale; a ratio of exactly 1 yields the identity
    pub fn scale(ratio: f64) -> Self {
        if ratio == 1.0 {
            Self::IDENTITY
        } else {
            Transform([ratio, 0.0, 0.0, ratio, 0.0, 0.0])
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

// =============================================================================
// Zoom
// =============================================================================

/// The active zoom: a numeric percentage or one of the fit modes.
///
/// Serialized as its menu value: `"pageFit"`, `"pageWidth"` or the
/// percentage as a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum ZoomSpec {
    Percent(u32),
    PageFit,
    PageWidth,
}

impl ZoomSpec {
    /// Parse a menu value. Accepts the camel-case menu names and their
    /// kebab-case spellings; anything else that is not a positive integer
    /// is unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value {
            "pageFit" | "page-fit" => Some(ZoomSpec::PageFit),
            "pageWidth" | "page-width" => Some(ZoomSpec::PageWidth),
            _ => value
                .strip_suffix('%')
                .unwrap_or(value)
                .parse::<u32>()
                .ok()
                .filter(|percent| *percent > 0)
                .map(ZoomSpec::Percent),
        }
    }

    pub fn is_symbolic(self) -> bool {
        !matches!(self, ZoomSpec::Percent(_))
    }

    pub fn percent(self) -> Option<u32> {
        match self {
            ZoomSpec::Percent(percent) => Some(percent),
            _ => None,
        }
    }
}

impl fmt::Display for ZoomSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoomSpec::Percent(percent) => write!(f, "{}", percent),
            ZoomSpec::PageFit => f.write_str("pageFit"),
            ZoomSpec::PageWidth => f.write_str("pageWidth"),
        }
    }
}

impl TryFrom<String> for ZoomSpec {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        ZoomSpec::parse(&value).ok_or_else(|| format!("Unknown zoom value: {}", value))
    }
}

impl From<ZoomSpec> for String {
    fn from(spec: ZoomSpec) -> Self {
        spec.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}
