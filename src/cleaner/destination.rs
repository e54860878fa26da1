//! Rutas de salida para los archivos limpios.

use std::path::{Path, PathBuf};

use crate::error::{CleanError, Result};
use crate::policy::CleaningMode;

const MAX_NUMBERED_CANDIDATES: usize = 999;

/// Decide dónde escribe la herramienta externa.
///
/// Con `overwrite` se usa un archivo oculto junto al original que luego lo
/// reemplaza; sin él, `<nombre>_cleaned[_lossless].<ext>`, numerado si ya existe.
pub fn plan_destination(source: &Path, mode: CleaningMode, overwrite: bool) -> Result<PathBuf> {
    let parent = source.parent().unwrap_or_else(|| Path::new("."));
    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    let extension = source
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    if overwrite {
        let suffix = match mode {
            CleaningMode::Lossless => "_tmp_clean_lossless",
            CleaningMode::Full => "_tmp_clean",
        };
        return Ok(parent.join(format!(".{stem}{suffix}{extension}")));
    }

    let suffix = match mode {
        CleaningMode::Lossless => "_cleaned_lossless",
        CleaningMode::Full => "_cleaned",
    };

    let first = parent.join(format!("{stem}{suffix}{extension}"));
    if !first.exists() {
        return Ok(first);
    }

    (2..=MAX_NUMBERED_CANDIDATES)
        .map(|index| parent.join(format!("{stem}{suffix}_{index}{extension}")))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| CleanError::DestinationUnavailable(source.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn names_follow_mode_suffixes() -> Result<()> {
        let dir = tempdir()?;
        let source = dir.path().join("viaje.jpg");

        assert_eq!(
            plan_destination(&source, CleaningMode::Lossless, false)?,
            dir.path().join("viaje_cleaned_lossless.jpg")
        );
        assert_eq!(
            plan_destination(&source, CleaningMode::Full, false)?,
            dir.path().join("viaje_cleaned.jpg")
        );
        assert_eq!(
            plan_destination(&source, CleaningMode::Full, true)?,
            dir.path().join(".viaje_tmp_clean.jpg")
        );
        Ok(())
    }

    #[test]
    fn existing_outputs_get_numbered() -> Result<()> {
        let dir = tempdir()?;
        let source = dir.path().join("nota.pdf");
        fs::write(dir.path().join("nota_cleaned.pdf"), b"")?;
        fs::write(dir.path().join("nota_cleaned_2.pdf"), b"")?;

        assert_eq!(
            plan_destination(&source, CleaningMode::Full, false)?,
            dir.path().join("nota_cleaned_3.pdf")
        );
        Ok(())
    }

    #[test]
    fn files_without_extension_keep_no_dot() -> Result<()> {
        let dir = tempdir()?;
        let source = dir.path().join("grabacion");

        assert_eq!(
            plan_destination(&source, CleaningMode::Full, false)?,
            dir.path().join("grabacion_cleaned")
        );
        Ok(())
    }
}
