//! Descriptor files: load into and save from a running engine
//!
//! Files are JSON and must carry a `.json` suffix (any case). Saving writes
//! to a temporary file and renames it into place. Loading validates the
//! whole file before the engine's registry is touched, so a rejected file
//! leaves the previous instrument set active.

use matching_engine::MatchingEngine;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::descriptor::{Descriptor, DescriptorError};

/// Required file suffix, compared case-insensitively
pub const DESCRIPTOR_SUFFIX: &str = "json";

/// Configuration for reading and writing descriptor files
#[derive(Debug, Clone)]
pub struct DescriptorConfig {
    pub path: PathBuf,
    /// Pretty-print JSON on save
    pub pretty: bool,
}

impl DescriptorConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

fn check_suffix(path: &Path) -> Result<(), DescriptorError> {
    let ok = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DESCRIPTOR_SUFFIX));
    if ok {
        Ok(())
    } else {
        Err(DescriptorError::InvalidSuffix {
            path: path.display().to_string(),
        })
    }
}

/// Read a descriptor file without installing it
pub fn read(config: &DescriptorConfig) -> Result<Descriptor, DescriptorError> {
    check_suffix(&config.path)?;
    let file = File::open(&config.path)?;
    let descriptor: Descriptor = serde_json::from_reader(BufReader::new(file))?;
    Ok(descriptor)
}

/// Load a descriptor file into the engine, replacing its instrument set
pub fn load(config: &DescriptorConfig, engine: &mut MatchingEngine) -> Result<(), DescriptorError> {
    let result = read(config).and_then(|descriptor| {
        let instruments = descriptor.into_instruments(engine.config().first_order_id)?;
        engine.load_instruments(instruments)?;
        Ok(())
    });

    match &result {
        Ok(()) => info!(path = %config.path.display(), "Loaded descriptor"),
        Err(err) => warn!(path = %config.path.display(), error = %err, "Failed to load descriptor"),
    }
    result
}

/// Save the engine's instrument set to a descriptor file
pub fn save(config: &DescriptorConfig, engine: &MatchingEngine) -> Result<(), DescriptorError> {
    check_suffix(&config.path)?;
    let descriptor = Descriptor::from_engine(engine)?;

    let data = if config.pretty {
        serde_json::to_vec_pretty(&descriptor)?
    } else {
        serde_json::to_vec(&descriptor)?
    };

    if let Some(dir) = config.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut tmp_name = config.path.clone().into_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    // Atomic write: write to tmp, fsync, rename
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, &config.path)?;

    info!(
        path = %config.path.display(),
        instruments = descriptor.instruments.len(),
        "Saved descriptor"
    );
    Ok(())
}
