//! Limpieza por lotes con eventos de progreso.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;
use tracing::warn;
use walkdir::WalkDir;

use super::clean::{CleanOptions, CleanOutcome, CommitGuard, clean_file, clean_file_guarded};
use crate::detect::detect_file_kind;
use crate::error::{CleanError, Result};
use crate::exiftool::MetadataTool;
use crate::policy::FileKind;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CleanupEvent {
    Started { total: usize },
    Processing { index: usize, total: usize, path: PathBuf },
    Success {
        path: PathBuf,
        output: PathBuf,
        message: String,
        output_size: u64,
    },
    Failure { path: PathBuf, error: String },
    Finished { successes: usize, failures: usize },
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub successes: usize,
    pub failures: usize,
}

/// Archivos bajo `root` con un tipo reconocido, ordenados por ruta.
pub fn collect_candidate_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CleanError::NotFound(root.to_path_buf()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| detect_file_kind(path) != FileKind::Unknown)
        .collect();

    files.sort();
    Ok(files)
}

/// Expande directorios y conserva archivos sueltos tal como se indicaron.
///
/// Cada ruta aparece una sola vez, en el orden de su primera aparición.
pub fn expand_inputs(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(collect_candidate_files(input, recursive)?);
        } else {
            files.push(input.clone());
        }
    }

    let mut seen = HashSet::new();
    files.retain(|path| seen.insert(path.clone()));
    Ok(files)
}

/// Limpia `files` en orden, notificando cada paso por `sender`.
///
/// Con `timeout`, cada archivo corre en un hilo propio y se reporta como
/// fallido si no termina a tiempo; lo que ese hilo escriba después se descarta.
pub fn run_cleanup_with_sender<T>(
    tool: Arc<T>,
    files: Vec<PathBuf>,
    options: &CleanOptions,
    timeout: Option<Duration>,
    sender: Sender<CleanupEvent>,
) -> BatchSummary
where
    T: MetadataTool + Send + Sync + ?Sized + 'static,
{
    let total = files.len();
    let _ = sender.send(CleanupEvent::Started { total });

    let mut summary = BatchSummary::default();

    for (index, path) in files.into_iter().enumerate() {
        let _ = sender.send(CleanupEvent::Processing {
            index: index + 1,
            total,
            path: path.clone(),
        });

        let result = match timeout {
            Some(limit) => clean_with_timeout(Arc::clone(&tool), path.clone(), options.clone(), limit),
            None => clean_file(&*tool, &path, options),
        };

        match result {
            Ok(outcome) => {
                summary.successes += 1;
                let _ = sender.send(CleanupEvent::Success {
                    path,
                    output: outcome.output,
                    message: outcome.message,
                    output_size: outcome.output_size,
                });
            }
            Err(error) => {
                summary.failures += 1;
                let _ = sender.send(CleanupEvent::Failure {
                    path,
                    error: error.to_string(),
                });
            }
        }
    }

    let _ = sender.send(CleanupEvent::Finished {
        successes: summary.successes,
        failures: summary.failures,
    });
    summary
}

fn clean_with_timeout<T>(
    tool: Arc<T>,
    path: PathBuf,
    options: CleanOptions,
    timeout: Duration,
) -> Result<CleanOutcome>
where
    T: MetadataTool + Send + Sync + ?Sized + 'static,
{
    let guard = Arc::new(CommitGuard::new());
    let worker_guard = Arc::clone(&guard);
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let result = clean_file_guarded(&*tool, &path, &options, &worker_guard);
        let _ = sender.send(result);
    });

    let disconnected = || CleanError::Tool("No se pudo completar la limpieza".to_string());
    match receiver.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) if guard.claim() => {
            warn!(?timeout, "tiempo de espera agotado, se descartará la salida");
            Err(CleanError::Timeout(timeout))
        }
        // La limpieza ya estaba publicando su salida: se espera su resultado.
        Err(RecvTimeoutError::Timeout) => receiver.recv().unwrap_or_else(|_| Err(disconnected())),
        Err(RecvTimeoutError::Disconnected) => Err(disconnected()),
    }
}
