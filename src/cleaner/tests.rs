use super::*;
use crate::error::{CleanError, Result};
use crate::exiftool::{MetadataTool, TagMap, ToolOutput};
use crate::policy::{Action, CleaningMode, FieldCategory, FileKind, Overrides, PolicyResult, resolve};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

/// Herramienta falsa: copia el archivo y registra cada invocación.
#[derive(Default)]
struct CopyingTool {
    calls: Mutex<Vec<(PathBuf, PathBuf, PolicyResult)>>,
}

impl CopyingTool {
    fn calls(&self) -> Vec<(PathBuf, PathBuf, PolicyResult)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl MetadataTool for CopyingTool {
    fn strip(&self, policy: &PolicyResult, source: &Path, destination: &Path) -> Result<ToolOutput> {
        fs::copy(source, destination)?;
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((source.to_path_buf(), destination.to_path_buf(), policy.clone()));
        }
        Ok(ToolOutput {
            status: Some(0),
            ..ToolOutput::default()
        })
    }

    fn read(&self, _path: &Path) -> Result<TagMap> {
        Ok(TagMap::new())
    }
}

/// Deja un archivo a medio escribir y falla.
struct FailingTool;

impl MetadataTool for FailingTool {
    fn strip(&self, _policy: &PolicyResult, _source: &Path, destination: &Path) -> Result<ToolOutput> {
        fs::write(destination, b"parcial")?;
        Err(CleanError::Tool("Error: archivo corrupto".to_string()))
    }

    fn read(&self, _path: &Path) -> Result<TagMap> {
        Err(CleanError::Tool("sin lectura".to_string()))
    }
}

/// Tarda `delay` con los archivos cuyo nombre empieza por "lento" y luego
/// escribe "limpio" en el destino; el resto se limpia al instante.
struct SlowTool {
    delay: Duration,
}

impl MetadataTool for SlowTool {
    fn strip(&self, _policy: &PolicyResult, source: &Path, destination: &Path) -> Result<ToolOutput> {
        let slow = source
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("lento"));
        if slow {
            thread::sleep(self.delay);
        }
        fs::write(destination, b"limpio")?;
        Ok(ToolOutput {
            status: Some(0),
            ..ToolOutput::default()
        })
    }

    fn read(&self, _path: &Path) -> Result<TagMap> {
        Ok(TagMap::new())
    }
}

fn options(mode: CleaningMode, overwrite: bool) -> CleanOptions {
    CleanOptions {
        mode,
        overwrite,
        overrides: Overrides::new(),
    }
}

#[test]
fn clean_writes_sibling_copy_and_keeps_original() -> Result<()> {
    let dir = tempdir()?;
    let source = dir.path().join("vacaciones.jpg");
    fs::write(&source, b"jpeg")?;

    let tool = CopyingTool::default();
    let outcome = clean_file(&tool, &source, &options(CleaningMode::Lossless, false))?;

    assert_eq!(outcome.kind, FileKind::Image);
    assert_eq!(outcome.output, dir.path().join("vacaciones_cleaned_lossless.jpg"));
    assert!(outcome.changed);
    assert_eq!(outcome.output_size, 4);
    assert!(source.exists());

    let calls = tool.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].2.mode, CleaningMode::Lossless);
    Ok(())
}

#[test]
fn overwrite_replaces_source_and_leaves_no_temp_file() -> Result<()> {
    let dir = tempdir()?;
    let source = dir.path().join("pista.mp3");
    fs::write(&source, b"id3")?;

    let tool = CopyingTool::default();
    let outcome = clean_file(&tool, &source, &options(CleaningMode::Full, true))?;

    assert_eq!(outcome.output, source);
    assert_eq!(fs::read(&source)?, b"id3");
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn failed_clean_discards_partial_output() -> Result<()> {
    let dir = tempdir()?;
    let source = dir.path().join("contrato.pdf");
    fs::write(&source, b"%PDF-1.4")?;

    let error = clean_file(&FailingTool, &source, &options(CleaningMode::Full, true))
        .expect_err("la herramienta falla");

    assert!(matches!(error, CleanError::Tool(_)));
    assert_eq!(fs::read(&source)?, b"%PDF-1.4");
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn missing_file_is_not_found() {
    let tool = CopyingTool::default();
    let result = clean_file(
        &tool,
        Path::new("/no/existe/foto.jpg"),
        &options(CleaningMode::Full, false),
    );
    assert!(matches!(result, Err(CleanError::NotFound(_))));
    assert!(tool.calls().is_empty());
}

#[test]
fn policy_without_strips_skips_the_tool() -> Result<()> {
    let dir = tempdir()?;
    let source = dir.path().join("nota.pdf");
    fs::write(&source, b"%PDF-1.4")?;

    let overrides = FieldCategory::ALL
        .iter()
        .map(|&category| (category, Action::Preserve))
        .collect();
    let options = CleanOptions {
        mode: CleaningMode::Full,
        overwrite: false,
        overrides,
    };

    let tool = CopyingTool::default();
    let outcome = clean_file(&tool, &source, &options)?;

    assert!(!outcome.changed);
    assert!(tool.calls().is_empty());
    assert_eq!(fs::read(&outcome.output)?, b"%PDF-1.4");
    Ok(())
}

#[test]
fn preview_resolves_without_touching_files() {
    let preview = preview_policy(
        Path::new("/no/existe/clip.mov"),
        &options(CleaningMode::Full, false),
    );
    assert_eq!(
        preview,
        resolve(FileKind::Video, CleaningMode::Full, &Overrides::new())
    );
}

#[test]
fn batch_reports_progress_for_each_file() -> Result<()> {
    let dir = tempdir()?;
    let image = dir.path().join("a.png");
    fs::write(&image, b"png")?;
    let missing = dir.path().join("b.png");

    let (sender, receiver) = std::sync::mpsc::channel();
    let summary = run_cleanup_with_sender(
        Arc::new(CopyingTool::default()),
        vec![image.clone(), missing.clone()],
        &options(CleaningMode::Full, false),
        None,
        sender,
    );
    let events: Vec<CleanupEvent> = receiver.iter().collect();

    assert_eq!(summary, BatchSummary { successes: 1, failures: 1 });
    assert!(matches!(events.first(), Some(CleanupEvent::Started { total: 2 })));
    assert!(events.iter().any(|event| matches!(
        event,
        CleanupEvent::Processing { index: 2, total: 2, .. }
    )));
    assert!(events.iter().any(|event| matches!(
        event,
        CleanupEvent::Success { path, .. } if *path == image
    )));
    assert!(events.iter().any(|event| matches!(
        event,
        CleanupEvent::Failure { path, .. } if *path == missing
    )));
    assert!(matches!(
        events.last(),
        Some(CleanupEvent::Finished { successes: 1, failures: 1 })
    ));
    Ok(())
}

#[test]
fn batch_with_timeout_still_completes_fast_files() -> Result<()> {
    let dir = tempdir()?;
    let audio = dir.path().join("voz.wav");
    fs::write(&audio, b"RIFF")?;

    let (sender, _receiver) = std::sync::mpsc::channel();
    let summary = run_cleanup_with_sender(
        Arc::new(CopyingTool::default()),
        vec![audio],
        &options(CleaningMode::Lossless, false),
        Some(std::time::Duration::from_secs(10)),
        sender,
    );

    assert_eq!(summary, BatchSummary { successes: 1, failures: 0 });
    Ok(())
}

#[test]
fn timed_out_file_fails_and_is_never_written_later() -> Result<()> {
    for overwrite in [true, false] {
        let dir = tempdir()?;
        let slow = dir.path().join("lento.jpg");
        let fast = dir.path().join("rapido.jpg");
        fs::write(&slow, b"original")?;
        fs::write(&fast, b"original")?;

        let (sender, receiver) = std::sync::mpsc::channel();
        let summary = run_cleanup_with_sender(
            Arc::new(SlowTool {
                delay: Duration::from_millis(300),
            }),
            vec![slow.clone(), fast.clone()],
            &options(CleaningMode::Full, overwrite),
            Some(Duration::from_millis(50)),
            sender,
        );
        let events: Vec<CleanupEvent> = receiver.iter().collect();

        assert_eq!(summary, BatchSummary { successes: 1, failures: 1 });
        assert!(events.iter().any(|event| matches!(
            event,
            CleanupEvent::Failure { path, error } if *path == slow && error.contains("50 ms")
        )));
        assert!(events.iter().any(|event| matches!(
            event,
            CleanupEvent::Success { path, .. } if *path == fast
        )));

        thread::sleep(Duration::from_millis(600));
        assert_eq!(fs::read(&slow)?, b"original");

        let mut names: Vec<String> = fs::read_dir(dir.path())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        if overwrite {
            assert_eq!(names, vec!["lento.jpg", "rapido.jpg"]);
            assert_eq!(fs::read(&fast)?, b"limpio");
        } else {
            assert_eq!(names, vec!["lento.jpg", "rapido.jpg", "rapido_cleaned.jpg"]);
        }
    }
    Ok(())
}

#[test]
fn claimed_guard_discards_the_output() -> Result<()> {
    let dir = tempdir()?;
    let source = dir.path().join("retrato.png");
    fs::write(&source, b"png")?;

    let guard = CommitGuard::new();
    assert!(guard.claim());

    let tool = CopyingTool::default();
    let error = clean_file_guarded(&tool, &source, &options(CleaningMode::Full, true), &guard)
        .expect_err("la salida ya no se puede publicar");

    assert!(matches!(error, CleanError::Cancelled));
    assert_eq!(tool.calls().len(), 1);
    assert_eq!(fs::read(&source)?, b"png");
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn expanded_inputs_drop_repeated_paths() -> Result<()> {
    let dir = tempdir()?;
    let photo = dir.path().join("a.jpg");
    let clip = dir.path().join("b.mp4");
    fs::write(&photo, b"")?;
    fs::write(&clip, b"")?;

    let files = expand_inputs(
        &[photo.clone(), dir.path().to_path_buf(), photo.clone()],
        false,
    )?;
    assert_eq!(files, vec![photo, clip]);
    Ok(())
}

#[test]
fn candidates_skip_unknown_types_and_respect_recursion() -> Result<()> {
    let dir = tempdir()?;
    let nested = dir.path().join("sub");
    fs::create_dir(&nested)?;
    fs::write(dir.path().join("foto.jpg"), b"")?;
    fs::write(dir.path().join("notas.txt"), b"texto")?;
    fs::write(nested.join("video.mp4"), b"")?;

    let shallow = collect_candidate_files(dir.path(), false)?;
    assert_eq!(shallow, vec![dir.path().join("foto.jpg")]);

    let deep = collect_candidate_files(dir.path(), true)?;
    assert_eq!(deep, vec![dir.path().join("foto.jpg"), nested.join("video.mp4")]);

    assert!(matches!(
        collect_candidate_files(&dir.path().join("foto.jpg"), true),
        Err(CleanError::NotFound(_))
    ));
    Ok(())
}

/// TIFF mínimo con una sola etiqueta `Make = "Can"`.
const TIFF_WITH_MAKE: &[u8] = &[
    0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, // cabecera little-endian
    0x01, 0x00, // una entrada
    0x0F, 0x01, 0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x43, 0x61, 0x6E, 0x00, // Make
    0x00, 0x00, 0x00, 0x00, // sin IFD siguiente
];

/// TIFF mínimo con `ImageWidth = 64` y `Make = "Can"`.
const TIFF_WITH_WIDTH_AND_MAKE: &[u8] = &[
    0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, // cabecera little-endian
    0x02, 0x00, // dos entradas
    0x00, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, // ImageWidth
    0x0F, 0x01, 0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x43, 0x61, 0x6E, 0x00, // Make
    0x00, 0x00, 0x00, 0x00, // sin IFD siguiente
];

/// TIFF mínimo con una sola etiqueta `ImageWidth = 64`.
const TIFF_WITH_WIDTH: &[u8] = &[
    0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, // cabecera little-endian
    0x01, 0x00, // una entrada
    0x00, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, // ImageWidth
    0x00, 0x00, 0x00, 0x00, // sin IFD siguiente
];

#[test]
fn verification_ignores_structural_tiff_tags() -> Result<()> {
    let dir = tempdir()?;
    let full = resolve(FileKind::Image, CleaningMode::Full, &Overrides::new());

    let bare = dir.path().join("limpia.tif");
    fs::write(&bare, TIFF_WITH_WIDTH)?;
    assert!(verify_image_clean(&bare, &full)?.is_empty());

    let with_make = dir.path().join("marca.tif");
    fs::write(&with_make, TIFF_WITH_WIDTH_AND_MAKE)?;
    assert_eq!(verify_image_clean(&with_make, &full)?, vec![FieldCategory::CameraInfo]);
    Ok(())
}

#[test]
fn verification_flags_camera_fields_left_behind() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("muestra.tif");
    fs::write(&path, TIFF_WITH_MAKE)?;

    let full = resolve(FileKind::Image, CleaningMode::Full, &Overrides::new());
    assert_eq!(verify_image_clean(&path, &full)?, vec![FieldCategory::CameraInfo]);

    let keep_camera = Overrides::new().with(FieldCategory::CameraInfo, Action::Preserve);
    let lenient = resolve(FileKind::Image, CleaningMode::Lossless, &keep_camera);
    assert!(verify_image_clean(&path, &lenient)?.is_empty());
    Ok(())
}

#[test]
fn verification_accepts_images_without_exif() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("vacia.jpg");
    fs::write(&path, b"no es una imagen")?;

    let policy = resolve(FileKind::Image, CleaningMode::Full, &Overrides::new());
    assert!(verify_image_clean(&path, &policy)?.is_empty());

    let pdf = resolve(FileKind::Pdf, CleaningMode::Full, &Overrides::new());
    assert!(verify_image_clean(&dir.path().join("x.pdf"), &pdf)?.is_empty());
    Ok(())
}
