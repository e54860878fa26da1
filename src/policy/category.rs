//! Categorías semánticas de metadata sobre las que actúan las reglas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;

/// Grupo de etiquetas de metadata relacionadas.
///
/// El orden de declaración es el orden canónico de cualquier política resuelta.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    Gps,
    Timestamp,
    CameraInfo,
    Xmp,
    Iptc,
    DeviceIds,
    SoftwareTags,
    Thumbnails,
    Other,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; 9] = [
        FieldCategory::Gps,
        FieldCategory::Timestamp,
        FieldCategory::CameraInfo,
        FieldCategory::Xmp,
        FieldCategory::Iptc,
        FieldCategory::DeviceIds,
        FieldCategory::SoftwareTags,
        FieldCategory::Thumbnails,
        FieldCategory::Other,
    ];

    /// Identificador estable usado en la CLI y en los archivos de configuración.
    pub fn key(self) -> &'static str {
        match self {
            FieldCategory::Gps => "gps",
            FieldCategory::Timestamp => "timestamp",
            FieldCategory::CameraInfo => "camera_info",
            FieldCategory::Xmp => "xmp",
            FieldCategory::Iptc => "iptc",
            FieldCategory::DeviceIds => "device_ids",
            FieldCategory::SoftwareTags => "software_tags",
            FieldCategory::Thumbnails => "thumbnails",
            FieldCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldCategory::Gps => "Ubicación GPS",
            FieldCategory::Timestamp => "Fechas",
            FieldCategory::CameraInfo => "Cámara y lente",
            FieldCategory::Xmp => "XMP",
            FieldCategory::Iptc => "IPTC",
            FieldCategory::DeviceIds => "Identificadores de dispositivo",
            FieldCategory::SoftwareTags => "Software",
            FieldCategory::Thumbnails => "Miniaturas",
            FieldCategory::Other => "Otros",
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldCategory {
    type Err = PolicyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_lowercase().replace(['-', ' '], "_");
        let category = match normalized.as_str() {
            "gps" | "location" | "ubicacion" => FieldCategory::Gps,
            "timestamp" | "timestamps" | "dates" | "fechas" => FieldCategory::Timestamp,
            "camera_info" | "camera" | "camara" => FieldCategory::CameraInfo,
            "xmp" => FieldCategory::Xmp,
            "iptc" => FieldCategory::Iptc,
            "device_ids" | "device" | "serials" => FieldCategory::DeviceIds,
            "software_tags" | "software" => FieldCategory::SoftwareTags,
            "thumbnails" | "thumbnail" | "miniaturas" => FieldCategory::Thumbnails,
            "other" | "otros" => FieldCategory::Other,
            _ => return Err(PolicyError::UnknownCategory(input.to_string())),
        };
        Ok(category)
    }
}
