//! Modos de limpieza y acciones aplicables a cada categoría.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningMode {
    /// Conserva las categorías marcadas como seguras para el tipo de archivo.
    #[default]
    Lossless,
    /// Elimina toda categoría aplicable.
    Full,
}

impl CleaningMode {
    pub fn key(self) -> &'static str {
        match self {
            CleaningMode::Lossless => "lossless",
            CleaningMode::Full => "full",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CleaningMode::Lossless => "Sin pérdida",
            CleaningMode::Full => "Completa",
        }
    }
}

impl fmt::Display for CleaningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CleaningMode {
    type Err = PolicyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "lossless" | "safe" | "sin-perdida" => Ok(CleaningMode::Lossless),
            "full" | "completa" | "all" => Ok(CleaningMode::Full),
            _ => Err(PolicyError::UnknownMode(input.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Preserve,
    Strip,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Preserve => "Conservar",
            Action::Strip => "Eliminar",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Preserve => f.write_str("preserve"),
            Action::Strip => f.write_str("strip"),
        }
    }
}

impl FromStr for Action {
    type Err = PolicyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "preserve" | "keep" | "conservar" => Ok(Action::Preserve),
            "strip" | "remove" | "eliminar" => Ok(Action::Strip),
            _ => Err(PolicyError::UnknownAction(input.to_string())),
        }
    }
}
