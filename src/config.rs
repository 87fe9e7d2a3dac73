//! Render settings and JSON scene files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::RelativityError;
use crate::relativity::{Event, Frame, Velocity};
use crate::simulation::{BodySpec, Orientation, Simulation};
use crate::visualization::PlotLimits;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Relativity(#[from] RelativityError),
}

/// Output settings shared by every renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Delay between GIF frames, in milliseconds.
    pub frame_delay_ms: u32,
    /// Simulation time between frames.
    pub dt: f64,
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            frame_delay_ms: 33,
            dt: 0.1,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ValidationError(
                "Image dimensions must be greater than 0".to_string(),
            ));
        }
        if !(self.dt > 0.0) || !self.dt.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "Time step must be positive, got {}",
                self.dt
            )));
        }
        Ok(())
    }
}

/// A body as written in a scene file. Coordinates are given in `frame`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    #[serde(flatten)]
    pub shape: ShapeConfig,
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
    #[serde(default)]
    pub frame: [f64; 2],
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeConfig {
    Point,
    Rod {
        length: f64,
        #[serde(default)]
        orientation: Orientation,
    },
    Person {
        size: f64,
    },
    Train {
        length: f64,
        height: f64,
    },
    Pulse {
        period: f64,
        max_radius: f64,
        end_emission: f64,
    },
    LightClock {
        height: f64,
        ticks: usize,
    },
    Signal {
        direction: [f64; 2],
    },
}

impl BodyConfig {
    pub fn to_spec(&self) -> Result<BodySpec, ConfigError> {
        let [x, y] = self.position;
        if let ShapeConfig::Rod { length, .. } | ShapeConfig::Train { length, .. } = self.shape {
            if !(length >= 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "Length must not be negative, got {length}"
                )));
            }
        }
        let spec = match &self.shape {
            ShapeConfig::Point => BodySpec::point(x, y),
            ShapeConfig::Rod { length, orientation } => BodySpec::rod(x, y, *length, *orientation),
            ShapeConfig::Person { size } => BodySpec::person(x, y, *size),
            ShapeConfig::Train { length, height } => BodySpec::train(x, y, *length, *height),
            ShapeConfig::Pulse {
                period,
                max_radius,
                end_emission,
            } => BodySpec::pulse(x, y, *period, *max_radius, *end_emission)?,
            ShapeConfig::LightClock { height, ticks } => BodySpec::light_clock(x, y, *height, *ticks)?,
            ShapeConfig::Signal { direction } => {
                BodySpec::light_signal(x, y, Velocity::new(direction[0], direction[1]))?
            }
        };
        let mut spec = spec
            .moving(Velocity::new(self.velocity[0], self.velocity[1]))
            .in_frame(Frame::new(self.frame[0], self.frame[1])?);
        if let Some(start) = self.start {
            spec = spec.starting_at(start);
        }
        if let Some(end) = self.end {
            spec = spec.until(end);
        }
        if let Some(label) = &self.label {
            spec = spec.labelled(label.clone());
        }
        Ok(spec)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    /// `[t, x, y]`
    pub at: Vec<f64>,
    #[serde(default)]
    pub frame: [f64; 2],
    #[serde(default)]
    pub label: String,
}

/// One observer to render the scene from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub frame: [f64; 2],
    #[serde(default)]
    pub title: Option<String>,
    /// Fitted to the run when absent.
    #[serde(default)]
    pub limits: Option<PlotLimits>,
}

/// A user-described scene, loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub title: String,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub events: Vec<EventConfig>,
    pub views: Vec<ViewConfig>,
    pub t_start: f64,
    pub t_end: f64,
    #[serde(default)]
    pub render: RenderConfig,
}

impl SceneFile {
    pub fn build_simulation(&self) -> Result<Simulation, ConfigError> {
        let mut sim = Simulation::new();
        for body in &self.bodies {
            sim.add(body.to_spec()?)?;
        }
        for event in &self.events {
            let at = Event::from_slice(&event.at)?;
            sim.add_event(at, Frame::new(event.frame[0], event.frame[1])?, event.label.clone());
        }
        Ok(sim)
    }

    pub fn view_frames(&self) -> Result<Vec<Frame>, ConfigError> {
        self.views
            .iter()
            .map(|v| Frame::new(v.frame[0], v.frame[1]).map_err(ConfigError::from))
            .collect()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn from_file(path: &Path) -> Result<SceneFile, ConfigError> {
        let file_content = fs::read_to_string(path).map_err(ConfigError::FileReadError)?;
        let scene: SceneFile = serde_json::from_str(&file_content).map_err(ConfigError::JsonParseError)?;
        Ok(scene)
    }

    pub fn validate(scene: &SceneFile) -> Result<(), ConfigError> {
        scene.render.validate()?;

        if scene.views.is_empty() {
            return Err(ConfigError::ValidationError(
                "At least one view is required".to_string(),
            ));
        }
        if !(scene.t_end >= scene.t_start) {
            return Err(ConfigError::ValidationError(format!(
                "t_end ({}) must not be before t_start ({})",
                scene.t_end, scene.t_start
            )));
        }
        for limits in scene.views.iter().filter_map(|v| v.limits.as_ref()) {
            limits.validate()?;
        }
        // Velocities, vector shapes and lifetimes are checked by building.
        scene.view_frames()?;
        scene.build_simulation()?;
        Ok(())
    }
}
