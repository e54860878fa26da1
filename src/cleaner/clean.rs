//! Limpieza de un archivo: detección, política, herramienta externa y reemplazo.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

use super::destination::plan_destination;
use crate::detect::detect_file_kind;
use crate::error::{CleanError, Result};
use crate::exiftool::MetadataTool;
use crate::policy::{CleaningMode, FileKind, Overrides, PolicyResult, resolve};

/// Opciones de una sesión de limpieza.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CleanOptions {
    pub mode: CleaningMode,
    pub overwrite: bool,
    pub overrides: Overrides,
}

#[derive(Clone, Debug, Serialize)]
pub struct CleanOutcome {
    pub source: PathBuf,
    pub output: PathBuf,
    pub kind: FileKind,
    pub policy: PolicyResult,
    /// `false` cuando la política no eliminaba ninguna categoría.
    pub changed: bool,
    pub message: String,
    pub output_size: u64,
}

/// Política que se aplicaría a `path`, sin tocar el archivo.
pub fn preview_policy(path: &Path, options: &CleanOptions) -> PolicyResult {
    resolve(detect_file_kind(path), options.mode, &options.overrides)
}

/// Turno compartido entre la limpieza y quien vigila su tiempo límite.
///
/// Solo el primero en reclamarlo decide: la limpieza publica su salida o el
/// vigilante la da por vencida, y entonces la salida se descarta.
#[derive(Debug, Default)]
pub struct CommitGuard {
    claimed: AtomicBool,
}

impl CommitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` si nadie lo había reclamado antes.
    pub fn claim(&self) -> bool {
        !self.claimed.swap(true, Ordering::SeqCst)
    }
}

pub fn clean_file<T>(tool: &T, path: &Path, options: &CleanOptions) -> Result<CleanOutcome>
where
    T: MetadataTool + ?Sized,
{
    clean_file_guarded(tool, path, options, &CommitGuard::new())
}

/// Igual que [`clean_file`], pero no publica nada si `guard` ya fue reclamado
/// cuando la herramienta termina: el original queda intacto y la salida se borra.
pub fn clean_file_guarded<T>(
    tool: &T,
    path: &Path,
    options: &CleanOptions,
    guard: &CommitGuard,
) -> Result<CleanOutcome>
where
    T: MetadataTool + ?Sized,
{
    if !path.is_file() {
        warn!(path = %path.display(), "archivo no encontrado");
        return Err(CleanError::NotFound(path.to_path_buf()));
    }

    let policy = preview_policy(path, options);
    let kind = policy.kind;
    info!(
        path = %path.display(),
        kind = %kind,
        mode = %options.mode,
        "iniciando limpieza"
    );
    debug!(?policy, "política resuelta");

    let changed = policy.strips_anything();
    if !changed && options.overwrite {
        if !guard.claim() {
            return Err(CleanError::Cancelled);
        }
        return finish(path, path.to_path_buf(), policy, changed);
    }

    let destination = plan_destination(path, options.mode, options.overwrite)?;
    if options.overwrite && destination.exists() {
        fs::remove_file(&destination)?;
    }

    let written = if changed {
        tool.strip(&policy, path, &destination).map(|_| ())
    } else {
        fs::copy(path, &destination).map(|_| ()).map_err(CleanError::from)
    };

    if let Err(error) = written {
        discard(&destination);
        warn!(path = %path.display(), %error, "la limpieza falló");
        return Err(error);
    }

    if !guard.claim() {
        discard(&destination);
        warn!(path = %path.display(), "salida descartada: la limpieza fue cancelada");
        return Err(CleanError::Cancelled);
    }

    let output = if options.overwrite {
        if let Err(error) = fs::rename(&destination, path) {
            discard(&destination);
            warn!(path = %path.display(), %error, "no se pudo reemplazar el original");
            return Err(error.into());
        }
        path.to_path_buf()
    } else {
        destination
    };

    finish(path, output, policy, changed)
}

fn finish(source: &Path, output: PathBuf, policy: PolicyResult, changed: bool) -> Result<CleanOutcome> {
    let message = match (changed, policy.mode) {
        (false, _) => "La política no elimina ninguna categoría".to_string(),
        (true, CleaningMode::Lossless) => {
            format!("{}: metadata eliminada sin pérdida", policy.kind.label())
        }
        (true, CleaningMode::Full) => format!("{}: metadata eliminada", policy.kind.label()),
    };
    let output_size = fs::metadata(&output)?.len();
    info!(output = %output.display(), "limpieza completada");

    Ok(CleanOutcome {
        source: source.to_path_buf(),
        output,
        kind: policy.kind,
        policy,
        changed,
        message,
        output_size,
    })
}

fn discard(path: &Path) {
    if path.exists() {
        let _ = fs::remove_file(path);
    }
}
