//! Tipos de error compartidos por el motor de políticas y la limpieza de archivos.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Resultado de las operaciones de limpieza.
pub type Result<T> = std::result::Result<T, CleanError>;

/// Valores que no pertenecen a los enumerados cerrados del motor de políticas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Tipo de archivo desconocido: `{0}`")]
    UnknownFileKind(String),

    #[error("Modo de limpieza desconocido: `{0}`")]
    UnknownMode(String),

    #[error("Categoría de metadata desconocida: `{0}`")]
    UnknownCategory(String),

    #[error("Acción desconocida: `{0}` (usa `keep` o `strip`)")]
    UnknownAction(String),

    #[error("Regla inválida `{0}`: se esperaba `categoria=accion`")]
    MalformedOverride(String),
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CleanError {
    #[error("Archivo no encontrado: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No se pudo ejecutar ExifTool (`{program}`): {source}")]
    ToolUnavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("ExifTool falló: {0}")]
    Tool(String),

    #[error("La salida de ExifTool no es válida: {0}")]
    ToolOutput(String),

    #[error("Tiempo de espera excedido ({} ms)", .0.as_millis())]
    Timeout(Duration),

    #[error("Limpieza cancelada tras agotar el tiempo de espera")]
    Cancelled,

    #[error("No se encontró un nombre de salida libre para {}", .0.display())]
    DestinationUnavailable(PathBuf),

    #[error("Configuración inválida: {0}")]
    Config(String),

    #[error("Error de verificación: {0}")]
    Verification(String),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("Error de E/S: {0}")]
    Io(#[from] io::Error),

    #[error("Error de JSON: {0}")]
    Json(#[from] serde_json::Error),
}
