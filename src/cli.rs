//! Argumentos de línea de comandos.

use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::cleaner::CleanOptions;
use crate::config::Settings;
use crate::policy::{Action, CleaningMode, FieldCategory, FileKind, Overrides};

#[derive(Parser, Debug)]
#[command(
    name = "metadata-cleaner",
    version,
    about = "Elimina metadata de imágenes, video, audio y PDF usando ExifTool"
)]
pub struct Cli {
    /// Archivo de configuración JSON.
    #[arg(long, global = true, value_name = "ARCHIVO")]
    pub config: Option<PathBuf>,

    /// Aumenta el detalle de los mensajes (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Imprime el registro de la sesión al terminar.
    #[arg(long, global = true)]
    pub show_log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Muestra la política que se aplicaría, sin modificar archivos.
    Policy(PolicyArgs),
    /// Limpia archivos o directorios.
    Clean(CleanArgs),
    /// Lista la metadata de un archivo agrupada por categoría.
    Inspect(InspectArgs),
    /// Compara un original con su versión limpia.
    Compare(CompareArgs),
}

/// Reglas que se superponen a la configuración para esta ejecución.
#[derive(Args, Debug, Default, Clone)]
pub struct RuleArgs {
    /// Modo de limpieza: `lossless` o `full`.
    #[arg(long, value_name = "MODO")]
    pub mode: Option<CleaningMode>,

    /// Conserva una categoría (gps, timestamp, camera_info, xmp, iptc, ...).
    #[arg(long = "keep", value_name = "CATEGORIA")]
    pub keep: Vec<FieldCategory>,

    /// Elimina una categoría aunque el modo la conserve.
    #[arg(long = "strip", value_name = "CATEGORIA")]
    pub strip: Vec<FieldCategory>,
}

impl RuleArgs {
    /// Opciones de limpieza: configuración, luego `--mode`, `--keep` y `--strip`.
    pub fn clean_options(&self, settings: &Settings) -> CleanOptions {
        let mut options = settings.clean_options();
        if let Some(mode) = self.mode {
            options.mode = mode;
        }
        let session: Overrides = self
            .keep
            .iter()
            .map(|&category| (category, Action::Preserve))
            .chain(self.strip.iter().map(|&category| (category, Action::Strip)))
            .collect();
        options.overrides.merge(&session);
        options
    }
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["path", "kind"])))]
pub struct PolicyArgs {
    /// Archivo cuyo tipo se detecta.
    pub path: Option<PathBuf>,

    /// Tipo de archivo explícito: image, video, audio, pdf o unknown.
    #[arg(long)]
    pub kind: Option<FileKind>,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Salida en JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    #[arg(required = true, value_name = "RUTA")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Reemplaza los archivos originales.
    #[arg(long)]
    pub overwrite: bool,

    /// No pide confirmación antes de sobrescribir.
    #[arg(short, long)]
    pub yes: bool,

    /// Recorre subdirectorios.
    #[arg(short, long)]
    pub recursive: bool,

    /// Segundos máximos por archivo (0 desactiva el límite).
    #[arg(long, value_name = "SEGUNDOS")]
    pub timeout: Option<u64>,

    /// Comprueba el EXIF de las imágenes limpias.
    #[arg(long)]
    pub verify: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    pub path: PathBuf,

    #[command(flatten)]
    pub rules: RuleArgs,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    pub original: PathBuf,
    pub cleaned: PathBuf,
}
