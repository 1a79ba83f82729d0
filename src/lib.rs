//! Player State - resume a 3D session where the user left it
//!
//! Core modules:
//! - `config`: Caller-owned configuration and its accessor trait
//! - `persistence`: YAML state record, codec and load/save repository

pub mod config;
pub mod persistence;

pub use config::{AppConfig, PlayerConfig};
pub use persistence::{Decoded, PersistError, Repository, StateCodec, StateRecord};

/// Persistence constants
pub mod consts {
    /// File name inside the save directory
    pub const SAVE_FILE_NAME: &str = "player.yml";
    /// Environment variable naming the save directory
    pub const SAVE_DIR_ENV: &str = "PLAYER_STATE_DIR";
    /// Simulation time used when none was saved
    pub const DEFAULT_TIME: f32 = std::f32::consts::FRAC_PI_2;
    /// Tolerance for the unit-length rotation check
    pub const UNIT_EPSILON: f32 = 1.0e-4;
}
