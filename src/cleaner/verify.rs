//! Verificación posterior de imágenes: busca campos EXIF que la política
//! debía eliminar.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{CleanError, Result};
use crate::policy::{Action, FieldCategory, FileKind, PolicyResult, classify_tag, is_structural_tag};

/// Categorías eliminadas por `policy` que siguen presentes en `path`.
///
/// Solo inspecciona EXIF; para otros tipos de archivo devuelve una lista vacía.
/// Las etiquetas estructurales (dimensiones, tiras de datos) no cuentan.
pub fn verify_image_clean(path: &Path, policy: &PolicyResult) -> Result<Vec<FieldCategory>> {
    if policy.kind != FileKind::Image {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_))
        | Err(exif::Error::BlankValue(_))
        | Err(exif::Error::InvalidFormat(_)) => return Ok(Vec::new()),
        Err(exif::Error::Io(err)) => return Err(CleanError::Io(err)),
        Err(other) => {
            return Err(CleanError::Verification(format!(
                "Error leyendo metadata EXIF: {other}"
            )));
        }
    };

    let mut leftovers: Vec<FieldCategory> = exif
        .fields()
        .map(|field| field.tag.to_string())
        .filter(|tag| !is_structural_tag(tag))
        .map(|tag| classify_tag(&tag))
        .filter(|category| policy.action_for(*category) == Some(Action::Strip))
        .collect();
    leftovers.sort();
    leftovers.dedup();
    Ok(leftovers)
}
