//! Adaptador de la herramienta externa de metadata (ExifTool).

mod arguments;
mod process;
mod tags;

use std::path::Path;

use crate::error::Result;
use crate::policy::PolicyResult;

pub use arguments::{build_strip_arguments, edit_arguments, tag_patterns};
pub use process::{EXIFTOOL_ENV, ExifTool};
pub use tags::{TagMap, group_by_category, parse_json_output, removed_tags};

/// Herramienta capaz de leer y reescribir metadata según una política.
pub trait MetadataTool {
    /// Escribe en `destination` una copia de `source` con la política aplicada.
    fn strip(&self, policy: &PolicyResult, source: &Path, destination: &Path) -> Result<ToolOutput>;

    fn read(&self, path: &Path) -> Result<TagMap>;
}

#[derive(Clone, Debug, Default)]
pub struct ToolOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Mensaje de error legible a partir de stderr.
    pub fn error_message(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            "ExifTool error".to_string()
        } else {
            stderr.to_string()
        }
    }
}
