//! Application-side configuration the repository reads from and writes into
//!
//! The caller owns the configuration object for the whole session. The
//! repository only goes through the accessors below.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use glam::{Quat, Vec3};

use crate::consts::{DEFAULT_TIME, SAVE_DIR_ENV};

/// Accessor contract for the state a session wants persisted
pub trait PlayerConfig {
    /// Directory the save file lives in (None = persistence disabled)
    fn save_dir(&self) -> Option<&Path>;

    fn player_position(&self) -> Vec3;
    fn set_player_position(&mut self, position: Vec3);

    /// Camera orientation, if a camera has been set up yet
    fn camera_rotation(&self) -> Option<Quat>;
    fn set_camera_rotation(&mut self, rotation: Quat);

    /// Simulation time
    fn time(&self) -> f32;
    fn set_time(&mut self, time: f32);

    /// Start in fly mode instead of walking
    fn fly_start(&self) -> bool;
    fn set_fly_start(&mut self, fly: bool);

    /// View radius in grid cells
    fn grid_radius(&self) -> i32;
    fn set_grid_radius(&mut self, radius: i32);

    /// Index into the time-scale table
    fn time_factor_index(&self) -> i32;
    fn set_time_factor_index(&mut self, index: i32);
}

/// Plain in-memory configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub save_dir: Option<PathBuf>,

    // === Player ===
    pub player_position: Vec3,
    pub camera_rotation: Option<Quat>,
    pub fly_start: bool,

    // === World ===
    pub time: f32,
    pub grid_radius: i32,
    pub time_factor_index: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_dir: None,

            player_position: Vec3::ZERO,
            camera_rotation: None,
            fly_start: false,

            time: DEFAULT_TIME,
            grid_radius: 0,
            time_factor_index: 0,
        }
    }
}

impl AppConfig {
    /// Default configuration saving under `dir`
    pub fn with_save_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Default configuration with the save directory taken from the environment
    pub fn from_env() -> Self {
        Self::from_dir_var(std::env::var_os(SAVE_DIR_ENV))
    }

    /// Unset or empty means no save directory
    fn from_dir_var(value: Option<OsString>) -> Self {
        match value {
            Some(dir) if !dir.is_empty() => {
                log::debug!("Save directory from {}: {:?}", SAVE_DIR_ENV, dir);
                Self::with_save_dir(dir)
            }
            _ => Self::default(),
        }
    }
}

impl PlayerConfig for AppConfig {
    fn save_dir(&self) -> Option<&Path> {
        self.save_dir.as_deref()
    }

    fn player_position(&self) -> Vec3 {
        self.player_position
    }

    fn set_player_position(&mut self, position: Vec3) {
        self.player_position = position;
    }

    fn camera_rotation(&self) -> Option<Quat> {
        self.camera_rotation
    }

    fn set_camera_rotation(&mut self, rotation: Quat) {
        self.camera_rotation = Some(rotation);
    }

    fn time(&self) -> f32 {
        self.time
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    fn fly_start(&self) -> bool {
        self.fly_start
    }

    fn set_fly_start(&mut self, fly: bool) {
        self.fly_start = fly;
    }

    fn grid_radius(&self) -> i32 {
        self.grid_radius
    }

    fn set_grid_radius(&mut self, radius: i32) {
        self.grid_radius = radius;
    }

    fn time_factor_index(&self) -> i32 {
        self.time_factor_index
    }

    fn set_time_factor_index(&mut self, index: i32) {
        self.time_factor_index = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.save_dir(), None);
        assert_eq!(config.player_position(), Vec3::ZERO);
        assert_eq!(config.camera_rotation(), None);
        assert!((config.time() - std::f32::consts::FRAC_PI_2).abs() < f32::EPSILON);
        assert!(!config.fly_start());
    }

    #[test]
    fn test_with_save_dir() {
        let config = AppConfig::with_save_dir("/tmp/saves");
        assert_eq!(config.save_dir(), Some(Path::new("/tmp/saves")));
        assert_eq!(config.grid_radius(), 0);
    }

    #[test]
    fn test_save_dir_from_env_value() {
        let config = AppConfig::from_dir_var(Some(OsString::from("/var/saves")));
        assert_eq!(config.save_dir(), Some(Path::new("/var/saves")));
        assert_eq!(config.time, AppConfig::default().time);

        assert_eq!(AppConfig::from_dir_var(None).save_dir(), None);
        assert_eq!(AppConfig::from_dir_var(Some(OsString::new())).save_dir(), None);
    }

    #[test]
    fn test_setters_roundtrip_through_trait() {
        let mut config = AppConfig::default();
        let cfg: &mut dyn PlayerConfig = &mut config;
        cfg.set_player_position(Vec3::new(1.0, 2.0, 3.0));
        cfg.set_camera_rotation(Quat::IDENTITY);
        cfg.set_fly_start(true);
        cfg.set_grid_radius(7);
        cfg.set_time_factor_index(2);

        assert_eq!(config.player_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.camera_rotation, Some(Quat::IDENTITY));
        assert!(config.fly_start);
        assert_eq!(config.grid_radius, 7);
        assert_eq!(config.time_factor_index, 2);
    }
}
