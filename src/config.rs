//! Configuración de solo lectura cargada desde un archivo JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::cleaner::CleanOptions;
use crate::error::{CleanError, Result};
use crate::exiftool::ExifTool;
use crate::policy::{CleaningMode, Overrides};

const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Ejecutable de ExifTool; si falta se usa `METADATA_CLEANER_EXIFTOOL` o el `PATH`.
    pub exiftool_path: Option<PathBuf>,
    pub mode: CleaningMode,
    pub overwrite_files: bool,
    pub confirm_overwrite: bool,
    pub recursive: bool,
    /// Límite por archivo; `null` desactiva el límite.
    pub timeout_secs: Option<u64>,
    /// Reglas de usuario avanzado por categoría (`"gps": "preserve"`).
    pub rules: Overrides,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exiftool_path: None,
            mode: CleaningMode::Lossless,
            overwrite_files: false,
            confirm_overwrite: true,
            recursive: false,
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            rules: Overrides::new(),
        }
    }
}

impl Settings {
    /// Lee `path`; un archivo inexistente equivale a la configuración por defecto.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text).map_err(|error| match error {
                CleanError::Config(message) => {
                    CleanError::Config(format!("{}: {message}", path.display()))
                }
                other => other,
            }),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "sin archivo de configuración, usando valores por defecto");
                Ok(Self::default())
            }
            Err(error) => Err(error.into()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|error| CleanError::Config(error.to_string()))
    }

    pub fn exiftool(&self) -> ExifTool {
        ExifTool::locate(self.exiftool_path.as_deref())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            mode: self.mode,
            overwrite: self.overwrite_files,
            overrides: self.rules.clone(),
        }
    }
}
