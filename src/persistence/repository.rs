//! Load/save of the player state file
//!
//! Load never blocks startup: a missing, unreadable or corrupt file leaves
//! the caller's state untouched. The only error it returns is a save path
//! that points at something other than a directory.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::codec::{Decoded, StateCodec};
use super::error::PersistError;
use super::record::StateRecord;
use crate::config::PlayerConfig;
use crate::consts::SAVE_FILE_NAME;

/// Moves player state between a [`PlayerConfig`] and `<save dir>/player.yml`
#[derive(Debug, Clone, Default)]
pub struct Repository {
    /// Overrides the directory reported by the config
    save_dir: Option<PathBuf>,
    codec: StateCodec,
}

impl Repository {
    /// Repository that follows each config's own save directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pinned to `dir` for the whole session
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: Some(dir.into()),
            codec: StateCodec::new(),
        }
    }

    fn resolve_dir<'a, C: PlayerConfig + ?Sized>(&'a self, config: &'a C) -> Option<&'a Path> {
        self.save_dir.as_deref().or_else(|| config.save_dir())
    }

    /// Full path of the save file, if a directory is configured
    pub fn file_path<C: PlayerConfig + ?Sized>(&self, config: &C) -> Option<PathBuf> {
        self.resolve_dir(config).map(|dir| dir.join(SAVE_FILE_NAME))
    }

    /// Existing save file, or None on first run
    fn existing_file<C: PlayerConfig + ?Sized>(
        &self,
        config: &C,
    ) -> Result<Option<PathBuf>, PersistError> {
        let Some(dir) = self.resolve_dir(config) else {
            log::info!("No save directory configured, skipping load");
            return Ok(None);
        };

        if !dir.exists() {
            log::info!("Save directory {} does not exist yet", dir.display());
            return Ok(None);
        }
        if !dir.is_dir() {
            return Err(PersistError::InvalidConfiguration {
                path: dir.to_path_buf(),
            });
        }

        let path = dir.join(SAVE_FILE_NAME);
        if !path.exists() {
            log::info!("No saved player state at {}", path.display());
            return Ok(None);
        }
        Ok(Some(path))
    }

    /// Read and decode the save file without touching the config
    ///
    /// `Ok(None)` means there is no file to read.
    pub fn read_record<C: PlayerConfig + ?Sized>(
        &self,
        config: &C,
    ) -> Result<Option<Decoded>, PersistError> {
        let Some(path) = self.existing_file(config)? else {
            return Ok(None);
        };

        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(self.codec.decode(&text))),
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                Ok(Some(Decoded::Defaulted))
            }
        }
    }

    /// Load saved state into `target`, returning the same reference
    pub fn load<'a, C: PlayerConfig + ?Sized>(
        &self,
        target: &'a mut C,
    ) -> Result<&'a mut C, PersistError> {
        match self.read_record(target)? {
            Some(Decoded::Record(record)) => {
                merge(&record, target);
                log::info!("Player state loaded");
            }
            Some(Decoded::Defaulted) => {
                log::info!("Saved player state unusable, keeping current state");
            }
            None => {}
        }
        Ok(target)
    }

    /// Save `current`, reporting only success or failure
    pub fn save<C: PlayerConfig + ?Sized>(&self, current: &C) -> bool {
        match self.try_save(current) {
            Ok(_) => true,
            Err(PersistError::NoSaveDirectory) => {
                log::debug!("No save directory configured, skipping save");
                false
            }
            Err(e) => {
                log::error!("Failed to save player state: {}", e);
                false
            }
        }
    }

    /// Save `current`, returning the path written
    ///
    /// The file is always rewritten from scratch.
    pub fn try_save<C: PlayerConfig + ?Sized>(&self, current: &C) -> Result<PathBuf, PersistError> {
        let dir = self
            .resolve_dir(current)
            .ok_or(PersistError::NoSaveDirectory)?;

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
            log::info!("Created save directory {}", dir.display());
        }

        let record = snapshot(current);
        let path = dir.join(SAVE_FILE_NAME);

        let file = File::create(&path).map_err(|e| PersistError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        self.codec.encode_to(&mut writer, &record)?;
        writer.flush().map_err(|e| PersistError::io(&path, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| PersistError::io(&path, e))?;

        log::info!("Player state saved to {}", path.display());
        Ok(path)
    }

    /// Delete the save file. Returns whether a file was removed.
    pub fn clear<C: PlayerConfig + ?Sized>(&self, config: &C) -> Result<bool, PersistError> {
        let Some(path) = self.existing_file(config)? else {
            return Ok(false);
        };
        fs::remove_file(&path).map_err(|e| PersistError::io(&path, e))?;
        log::info!("Removed {}", path.display());
        Ok(true)
    }
}

/// Current config values as a record
fn snapshot<C: PlayerConfig + ?Sized>(config: &C) -> StateRecord {
    StateRecord::new(
        config.player_position(),
        config.camera_rotation(),
        config.time(),
    )
    .with_fly(config.fly_start())
    .with_grid_radius(config.grid_radius())
    .with_time_factor_index(config.time_factor_index())
}

/// Copy recognized fields into the config
fn merge<C: PlayerConfig + ?Sized>(record: &StateRecord, target: &mut C) {
    if let Some(position) = record.position() {
        target.set_player_position(position);
    }

    match record.valid_rotation() {
        Some(rotation) => target.set_camera_rotation(rotation),
        None => {
            if let Some(rotation) = record.rotation() {
                log::debug!("Ignoring degenerate camera rotation {:?}", rotation);
            }
        }
    }

    target.set_time(record.time);
    target.set_fly_start(record.fly);
    target.set_grid_radius(record.grid_radius);
    target.set_time_factor_index(record.time_factor_index);
}
