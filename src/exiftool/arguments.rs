//! Traducción de una política resuelta a argumentos de línea de comandos de ExifTool.

use std::ffi::OsString;
use std::path::Path;

use crate::policy::{Action, CleaningMode, FieldCategory, PolicyResult};

/// Patrones de etiqueta de ExifTool que cubre cada categoría.
///
/// `Other` no tiene patrones propios: se elimina con `-all=` y las categorías
/// conservadas se restauran desde el original.
pub fn tag_patterns(category: FieldCategory) -> &'static [&'static str] {
    match category {
        FieldCategory::Gps => &["GPS*"],
        FieldCategory::Timestamp => &["AllDates"],
        FieldCategory::CameraInfo => &["Make", "Model", "Lens*"],
        FieldCategory::Xmp => &["XMP:all"],
        FieldCategory::Iptc => &["IPTC:all"],
        FieldCategory::DeviceIds => &[
            "SerialNumber",
            "InternalSerialNumber",
            "LensSerialNumber",
            "BodySerialNumber",
            "ImageUniqueID",
            "OwnerName",
        ],
        FieldCategory::SoftwareTags => &[
            "Software",
            "ProcessingSoftware",
            "CreatorTool",
            "Producer",
            "Encoder",
        ],
        FieldCategory::Thumbnails => &["ThumbnailImage", "PreviewImage", "Picture", "CoverArt"],
        FieldCategory::Other => &[],
    }
}

/// Argumentos de edición (sin rutas) para aplicar `policy`.
pub fn edit_arguments(policy: &PolicyResult) -> Vec<String> {
    let mut args = Vec::new();

    if policy.mode == CleaningMode::Lossless {
        args.push("-P".to_string());
    }

    if policy.action_for(FieldCategory::Other) == Some(Action::Strip) {
        args.push("-all=".to_string());

        let preserved = policy.preserved();
        if !preserved.is_empty() {
            args.push("-tagsFromFile".to_string());
            args.push("@".to_string());
            for category in preserved {
                args.extend(tag_patterns(category).iter().map(|pattern| format!("-{pattern}")));
            }
        }
    } else {
        for category in policy.stripped() {
            args.extend(tag_patterns(category).iter().map(|pattern| format!("-{pattern}=")));
        }
    }

    args
}

/// Invocación completa: edición, destino (`-o`) y archivo de origen.
pub fn build_strip_arguments(
    policy: &PolicyResult,
    source: &Path,
    destination: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = edit_arguments(policy)
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push("-o".into());
    args.push(destination.as_os_str().to_owned());
    args.push(source.as_os_str().to_owned());
    args
}
