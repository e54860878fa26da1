//! Metadata Cleaner: motor de políticas de metadata y limpieza de archivos
//! mediante ExifTool.
//!
//! El núcleo es [`policy::resolve`], que decide para cada tipo de archivo y
//! modo de limpieza qué categorías de metadata se conservan. El resto del
//! crate detecta tipos de archivo, traduce la política a argumentos de
//! ExifTool y orquesta la limpieza individual o por lotes.

pub mod app;
pub mod cleaner;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod exiftool;
pub mod formatting;
pub mod logger;
pub mod policy;
pub mod ui;

pub use cleaner::{CleanOptions, CleanOutcome, clean_file};
pub use error::{CleanError, PolicyError, Result};
pub use policy::{Action, CleaningMode, FieldCategory, FileKind, Overrides, PolicyResult, resolve};
