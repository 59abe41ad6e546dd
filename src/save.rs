//! # Save Module
//!
//! JSON encoding of session snapshots on disk.
//!
//! The core decides what a snapshot holds; this module only decides how it is
//! written. A save file wraps the snapshot with a format version so that an
//! incompatible file is reported as corrupt rather than half-loaded.

use crate::game::Snapshot;
use crate::{DelveError, DelveResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

/// Current save file format version.
pub const SAVE_VERSION: u32 = 1;

/// On-disk layout of a save file.
#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    version: u32,
    snapshot: Snapshot,
}

/// Reads and writes the snapshot at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if a save file is present.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Writes the snapshot, replacing any previous save.
    pub fn save(&self, snapshot: &Snapshot) -> DelveResult<()> {
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        let save_file = SaveFile {
            version: SAVE_VERSION,
            snapshot: snapshot.clone(),
        };
        serde_json::to_writer(writer, &save_file)?;
        info!("Saved depth {} to {}", snapshot.depth, self.path.display());
        Ok(())
    }

    /// Reads the snapshot back.
    ///
    /// A missing file is [`DelveError::NoSaveGame`]; unreadable contents or an
    /// unknown format version are [`DelveError::CorruptSave`].
    pub fn load(&self) -> DelveResult<Snapshot> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!("No save file at {}", self.path.display());
                return Err(DelveError::NoSaveGame);
            }
            Err(err) => return Err(err.into()),
        };

        let save_file: SaveFile = serde_json::from_reader(BufReader::new(file)).map_err(|err| {
            warn!("Could not parse {}: {}", self.path.display(), err);
            DelveError::CorruptSave(err.to_string())
        })?;

        if save_file.version != SAVE_VERSION {
            warn!(
                "Save file {} has version {}, expected {}",
                self.path.display(),
                save_file.version,
                SAVE_VERSION
            );
            return Err(DelveError::CorruptSave(format!(
                "unsupported save version {}",
                save_file.version
            )));
        }

        info!("Loaded depth {} from {}", save_file.snapshot.depth, self.path.display());
        Ok(save_file.snapshot)
    }

    /// Removes the save file if there is one.
    pub fn delete(&self) -> DelveResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SAVE_PATH)
    }
}
