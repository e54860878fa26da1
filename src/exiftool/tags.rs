//! Lectura de la salida JSON de ExifTool y comparación antes/después.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{CleanError, Result};
use crate::policy::{FieldCategory, classify_tag};

/// Etiquetas de un archivo, ordenadas por nombre.
pub type TagMap = BTreeMap<String, String>;

/// Campos que ExifTool agrega a su salida y no pertenecen al archivo.
const TOOL_TAGS: &[&str] = &["SourceFile", "ExifToolVersion"];

/// Interpreta la salida de `exiftool -json`, que es un arreglo con un objeto por archivo.
pub fn parse_json_output(stdout: &str) -> Result<TagMap> {
    let documents: Vec<serde_json::Map<String, Value>> = serde_json::from_str(stdout)?;
    let first = documents
        .into_iter()
        .next()
        .ok_or_else(|| CleanError::ToolOutput("ExifTool no devolvió ningún archivo".to_string()))?;

    Ok(first
        .into_iter()
        .filter(|(key, _)| !TOOL_TAGS.contains(&key.as_str()))
        .map(|(key, value)| (key, value_to_string(value)))
        .collect())
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Etiquetas que desaparecieron o cambiaron de valor tras la limpieza.
pub fn removed_tags(before: &TagMap, after: &TagMap) -> TagMap {
    before
        .iter()
        .filter(|(key, value)| after.get(*key) != Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Agrupa las etiquetas por categoría en orden canónico.
pub fn group_by_category(tags: &TagMap) -> BTreeMap<FieldCategory, Vec<(&str, &str)>> {
    let mut groups: BTreeMap<FieldCategory, Vec<(&str, &str)>> = BTreeMap::new();
    for (key, value) in tags {
        groups
            .entry(classify_tag(key))
            .or_default()
            .push((key.as_str(), value.as_str()));
    }
    groups
}
