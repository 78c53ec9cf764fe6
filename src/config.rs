use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::resolver::Target;
use crate::view::View;

/// Environment variable naming a JSON tuning snapshot to seed defaults from.
pub const CONFIG_ENV: &str = "DESK_CONFIG";

const DEFAULT_LIFT: f32 = 0.05;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPoses {
    pub default: CameraPose,
    pub monitor: CameraPose,
    pub phone: CameraPose,
    pub notepad: CameraPose,
    pub reading: CameraPose,
    pub papers: CameraPose,
}

impl Default for CameraPoses {
    fn default() -> Self {
        Self {
            default: CameraPose::new(Vec3::new(0.4, 1.55, -4.7), Vec3::new(-1.0, 0.95, -4.8)),
            monitor: CameraPose::new(Vec3::new(-0.55, 1.2, -4.92), Vec3::new(-1.3, 1.15, -4.92)),
            phone: CameraPose::new(Vec3::new(-0.85, 1.35, -4.3), Vec3::new(-0.85, 1.0, -4.31)),
            notepad: CameraPose::new(Vec3::new(-0.9, 1.3, -4.55), Vec3::new(-0.95, 0.93, -4.6)),
            reading: CameraPose::new(Vec3::new(-0.7, 1.3, -5.1), Vec3::new(-0.85, 0.93, -5.15)),
            papers: CameraPose::new(Vec3::new(-1.0, 1.35, -5.5), Vec3::new(-1.015, 0.95, -5.544)),
        }
    }
}

impl CameraPoses {
    pub fn get(&self, view: View) -> &CameraPose {
        match view {
            View::Default => &self.default,
            View::Monitor => &self.monitor,
            View::Phone => &self.phone,
            View::Notepad => &self.notepad,
            View::Reading => &self.reading,
            View::Papers => &self.papers,
        }
    }
}

/// Offset applied to the phone body while the phone view is active.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneFocus {
    pub lift: f32,
    pub slide_x: f32,
    pub slide_z: f32,
    pub tilt: f32,
    pub hover_lift: f32,
}

impl Default for PhoneFocus {
    fn default() -> Self {
        Self {
            lift: 0.185,
            slide_x: -0.098,
            slide_z: 0.067,
            tilt: 0.004,
            hover_lift: 0.05,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowMode {
    All,
    #[default]
    Essential,
    None,
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub scene_path: String,
    pub poses: CameraPoses,
    pub camera_smooth_time: f32,
    pub hover_smooth_time: f32,
    pub phone_smooth_time: f32,
    pub parallax_strength: f32,
    pub lift: BTreeMap<Target, f32>,
    pub phone_focus: PhoneFocus,
    pub shadow_mode: ShadowMode,
    pub contact_shadow_opacity: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    /// Keep idling in the default view after a focus view was visited.
    pub auto_rotate_after_focus: bool,
}

impl Default for DeskConfig {
    fn default() -> Self {
        let lift = [
            Target::Keyboard,
            Target::Mouse,
            Target::Book,
            Target::PaperStack,
        ]
        .into_iter()
        .map(|t| (t, DEFAULT_LIFT))
        .collect();

        Self {
            scene_path: "scene.glb#Scene0".into(),
            poses: CameraPoses::default(),
            camera_smooth_time: 0.4,
            hover_smooth_time: 0.1,
            phone_smooth_time: 0.4,
            parallax_strength: 0.015,
            lift,
            phone_focus: PhoneFocus::default(),
            shadow_mode: ShadowMode::default(),
            contact_shadow_opacity: 0.4,
            auto_rotate: false,
            auto_rotate_speed: 0.05,
            auto_rotate_after_focus: false,
        }
    }
}

impl DeskConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.clamped())
    }

    /// Config from `$DESK_CONFIG` if set and readable, defaults otherwise.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                info!("loaded desk config from {}", Path::new(&path).display());
                config
            }
            Err(err) => {
                warn!("{err}; using defaults");
                Self::default()
            }
        }
    }

    pub fn clamped(mut self) -> Self {
        self.camera_smooth_time = self.camera_smooth_time.max(1e-3);
        self.hover_smooth_time = self.hover_smooth_time.max(1e-3);
        self.phone_smooth_time = self.phone_smooth_time.max(1e-3);
        self.contact_shadow_opacity = self.contact_shadow_opacity.clamp(0.0, 1.0);
        for amount in self.lift.values_mut() {
            *amount = amount.max(0.0);
        }
        self
    }

    pub fn lift_for(&self, target: Target) -> f32 {
        self.lift.get(&target).copied().unwrap_or(DEFAULT_LIFT)
    }

    pub fn pose(&self, view: View) -> &CameraPose {
        self.poses.get(view)
    }

    /// Pretty JSON of the live values, for pasting back in as new defaults.
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Whether the default view should idle-orbit right now.
    pub fn idles(&self, visited_focus: bool) -> bool {
        self.auto_rotate && (self.auto_rotate_after_focus || !visited_focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_seeds_an_identical_config() {
        let mut config = DeskConfig::default();
        config.shadow_mode = ShadowMode::None;
        config.lift.insert(Target::Book, 0.08);
        let json = config.snapshot().unwrap();
        let back: DeskConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert!(json.contains("\"shadow_mode\": \"none\""));
        assert!(json.contains("\"paper_stack\""));
    }

    #[test]
    fn partial_snapshot_falls_back_to_defaults() {
        let config: DeskConfig =
            serde_json::from_str(r#"{ "phone_focus": { "lift": 0.3 } }"#).unwrap();
        assert_eq!(config.phone_focus.lift, 0.3);
        assert_eq!(config.phone_focus.slide_x, PhoneFocus::default().slide_x);
        assert_eq!(config.poses, CameraPoses::default());
    }

    #[test]
    fn clamps_out_of_range_values() {
        let mut config = DeskConfig::default();
        config.camera_smooth_time = 0.0;
        config.contact_shadow_opacity = 3.0;
        config.lift.insert(Target::Mouse, -1.0);
        let config = config.clamped();
        assert!(config.camera_smooth_time > 0.0);
        assert_eq!(config.contact_shadow_opacity, 1.0);
        assert_eq!(config.lift_for(Target::Mouse), 0.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DeskConfig::load("/nonexistent/desk.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = std::env::temp_dir().join("desk-scene-malformed.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = DeskConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn idle_flag_respects_focus_history() {
        let mut config = DeskConfig {
            auto_rotate: true,
            ..default()
        };
        assert!(config.idles(false));
        assert!(!config.idles(true));
        config.auto_rotate_after_focus = true;
        assert!(config.idles(true));
        config.auto_rotate = false;
        assert!(!config.idles(false));
    }

    #[test]
    fn every_view_has_a_pose() {
        let config = DeskConfig::default();
        for view in View::FOCUS {
            assert_ne!(config.pose(view), config.pose(View::Default));
        }
    }
}
