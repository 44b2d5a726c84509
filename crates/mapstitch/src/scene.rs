//! Scene-facing output types.
//!
//! The merge pipeline ends in a [`SceneRecord`] plus projected
//! [`WallSegment`]s and [`LightPoint`]s, all in scene pixel space. A
//! [`SceneSink`] receives them; the bundled filesystem sink lives in
//! the CLI crate, and embedders can target a live host instead.

use serde::Serialize;
use thiserror::Error;

use mapstitch_core::geometry::Point;

/// How a wall segment interacts with sight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSense {
    /// Sight passes through, as for an open door.
    None,
    /// Sight is blocked.
    Normal,
}

/// One wall or door segment in scene pixel space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallSegment {
    points: [f64; 4],
    door: u8,
    sense: WallSense,
}

impl WallSegment {
    /// Builds a segment, rejecting non-finite coordinates.
    pub fn new(start: Point, end: Point, door: u8, sense: WallSense) -> Option<Self> {
        if !start.is_finite() || !end.is_finite() {
            return None;
        }
        Some(Self {
            points: [start.x(), start.y(), end.x(), end.y()],
            door,
            sense,
        })
    }

    /// Builds a plain sight-blocking wall.
    pub fn wall(start: Point, end: Point) -> Option<Self> {
        Self::new(start, end, 0, WallSense::Normal)
    }

    /// Segment endpoints as `[x1, y1, x2, y2]`.
    pub fn points(&self) -> [f64; 4] {
        self.points
    }

    /// Door flag: 0 for walls, 1 for doors and windows.
    pub fn door(&self) -> u8 {
        self.door
    }

    pub fn sense(&self) -> WallSense {
        self.sense
    }
}

/// A point light in scene pixel space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LightPoint {
    x: f64,
    y: f64,
    rotation: f64,
    dim: f64,
    bright: f64,
    angle: f64,
    tint_color: String,
    tint_alpha: f64,
}

impl LightPoint {
    /// Builds a light, rejecting non-finite positions.
    ///
    /// Lights are omnidirectional: rotation 0 with a 360 degree cone.
    pub fn new(
        position: Point,
        dim: f64,
        bright: f64,
        tint_color: impl Into<String>,
        tint_alpha: f64,
    ) -> Option<Self> {
        if !position.is_finite() {
            return None;
        }
        Some(Self {
            x: position.x(),
            y: position.y(),
            rotation: 0.0,
            dim,
            bright,
            angle: 360.0,
            tint_color: tint_color.into(),
            tint_alpha,
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn dim(&self) -> f64 {
        self.dim
    }

    pub fn bright(&self) -> f64 {
        self.bright
    }

    pub fn tint_color(&self) -> &str {
        &self.tint_color
    }

    pub fn tint_alpha(&self) -> f64 {
        self.tint_alpha
    }
}

/// The scene registration handed to a [`SceneSink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneRecord {
    name: String,
    img: String,
    width: u32,
    height: u32,
    grid: f64,
    padding: f64,
    shift_x: f64,
    shift_y: f64,
}

impl SceneRecord {
    pub fn new(
        name: impl Into<String>,
        img: impl Into<String>,
        width: u32,
        height: u32,
        grid: f64,
        padding: f64,
    ) -> Self {
        Self {
            name: name.into(),
            img: img.into(),
            width,
            height,
            grid,
            padding,
            shift_x: 0.0,
            shift_y: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image reference recorded for the scene background.
    pub fn img(&self) -> &str {
        &self.img
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn grid(&self) -> f64 {
        self.grid
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }
}

/// Pixel offsets the scene host places around the map image.
///
/// Hosts pad scenes out to a whole number of grid squares per side;
/// every projected feature is shifted by these offsets so it stays on
/// the map after padding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneDimensions {
    offset_x: f64,
    offset_y: f64,
}

impl SceneDimensions {
    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self { offset_x, offset_y }
    }

    /// Offsets for a host that pads each side by `padding` times the
    /// map dimension, rounded up to whole grid squares.
    pub fn from_padding(width: u32, height: u32, grid: f64, padding: f64) -> Self {
        Self {
            offset_x: padded_offset(f64::from(width), grid, padding),
            offset_y: padded_offset(f64::from(height), grid, padding),
        }
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    pub(crate) fn offset_point(self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }
}

fn padded_offset(dimension: f64, grid: f64, padding: f64) -> f64 {
    if padding <= 0.0 || grid <= 0.0 {
        return 0.0;
    }
    (dimension * padding / grid).ceil() * grid
}

/// Error from a scene sink.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SceneError {
    message: String,
}

impl SceneError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for SceneError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Destination for a merged scene.
///
/// [`create_scene`](SceneSink::create_scene) registers the scene and
/// reports the padding offsets the host applies; those offsets feed
/// the wall and light projections. [`attach`](SceneSink::attach) then
/// delivers the projected features.
pub trait SceneSink {
    fn create_scene(&mut self, record: &SceneRecord) -> Result<SceneDimensions, SceneError>;

    fn attach(&mut self, walls: &[WallSegment], lights: &[LightPoint])
    -> Result<(), SceneError>;
}
