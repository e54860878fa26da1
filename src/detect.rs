//! Clasificación de archivos en los tipos que entiende el motor de políticas.

use infer::Infer;
use std::path::Path;

use crate::policy::FileKind;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "heic", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "m4v"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "m4a", "ogg"];

/// Detecta el tipo por extensión y, si no se reconoce, por el contenido.
pub fn detect_file_kind(path: &Path) -> FileKind {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    if let Some(kind) = extension.as_deref().and_then(kind_from_extension) {
        return kind;
    }

    mime_type(path)
        .map(|mime| kind_from_mime(&mime))
        .unwrap_or(FileKind::Unknown)
}

pub fn kind_from_extension(extension: &str) -> Option<FileKind> {
    if IMAGE_EXTENSIONS.contains(&extension) {
        Some(FileKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&extension) {
        Some(FileKind::Video)
    } else if AUDIO_EXTENSIONS.contains(&extension) {
        Some(FileKind::Audio)
    } else if extension == "pdf" {
        Some(FileKind::Pdf)
    } else {
        None
    }
}

pub fn kind_from_mime(mime: &str) -> FileKind {
    if mime == "application/pdf" {
        FileKind::Pdf
    } else if mime.starts_with("image/") {
        FileKind::Image
    } else if mime.starts_with("video/") {
        FileKind::Video
    } else if mime.starts_with("audio/") {
        FileKind::Audio
    } else {
        FileKind::Unknown
    }
}

/// Intenta detectar el tipo MIME del archivo a partir de su contenido.
pub fn mime_type(path: &Path) -> Option<String> {
    let infer = Infer::new();
    infer
        .get_from_path(path)
        .ok()
        .flatten()
        .map(|kind| kind.mime_type().to_string())
}
