//! Tipos de archivo reconocidos por el motor de políticas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Pdf,
    Unknown,
}

impl FileKind {
    pub const ALL: [FileKind; 5] = [
        FileKind::Image,
        FileKind::Video,
        FileKind::Audio,
        FileKind::Pdf,
        FileKind::Unknown,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Pdf => "pdf",
            FileKind::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Image => "Imagen",
            FileKind::Video => "Video",
            FileKind::Audio => "Audio",
            FileKind::Pdf => "PDF",
            FileKind::Unknown => "Desconocido",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FileKind {
    type Err = PolicyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "image" | "imagen" => Ok(FileKind::Image),
            "video" => Ok(FileKind::Video),
            "audio" => Ok(FileKind::Audio),
            "pdf" => Ok(FileKind::Pdf),
            "unknown" | "desconocido" | "other" => Ok(FileKind::Unknown),
            _ => Err(PolicyError::UnknownFileKind(input.to_string())),
        }
    }
}
