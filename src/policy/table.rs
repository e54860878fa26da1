//! Tabla fija de reglas por defecto: qué categorías aplican a cada tipo de
//! archivo y cuáles son seguras de conservar en modo sin pérdida.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::category::FieldCategory;
use super::kind::FileKind;
use super::mode::Action;

/// Regla por defecto de una categoría aplicable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rule {
    pub category: FieldCategory,
    /// Acción en modo sin pérdida; el modo completo siempre elimina.
    pub lossless: Action,
}

impl Rule {
    const fn safe(category: FieldCategory) -> Self {
        Self {
            category,
            lossless: Action::Preserve,
        }
    }

    const fn strip(category: FieldCategory) -> Self {
        Self {
            category,
            lossless: Action::Strip,
        }
    }
}

use FieldCategory::*;

// Orientación, perfil ICC y resolución viven en `Other`.
const IMAGE_RULES: &[Rule] = &[
    Rule::strip(Gps),
    Rule::safe(Timestamp),
    Rule::strip(CameraInfo),
    Rule::strip(Xmp),
    Rule::strip(Iptc),
    Rule::strip(DeviceIds),
    Rule::strip(SoftwareTags),
    Rule::strip(Thumbnails),
    Rule::safe(Other),
];

const VIDEO_RULES: &[Rule] = &[
    Rule::strip(Gps),
    Rule::safe(Timestamp),
    Rule::strip(CameraInfo),
    Rule::strip(Xmp),
    Rule::strip(DeviceIds),
    Rule::strip(SoftwareTags),
    Rule::strip(Thumbnails),
    Rule::safe(Other),
];

// Para audio las miniaturas son la portada del álbum.
const AUDIO_RULES: &[Rule] = &[
    Rule::safe(Timestamp),
    Rule::strip(Xmp),
    Rule::strip(SoftwareTags),
    Rule::safe(Thumbnails),
    Rule::safe(Other),
];

const PDF_RULES: &[Rule] = &[
    Rule::strip(Timestamp),
    Rule::strip(Xmp),
    Rule::strip(SoftwareTags),
    Rule::strip(Other),
];

const UNKNOWN_RULES: &[Rule] = &[
    Rule::strip(Gps),
    Rule::strip(Timestamp),
    Rule::strip(Xmp),
    Rule::strip(Iptc),
    Rule::strip(Other),
];

/// Filas crudas de la tabla para un tipo de archivo.
pub fn default_rules(kind: FileKind) -> &'static [Rule] {
    match kind {
        FileKind::Image => IMAGE_RULES,
        FileKind::Video => VIDEO_RULES,
        FileKind::Audio => AUDIO_RULES,
        FileKind::Pdf => PDF_RULES,
        FileKind::Unknown => UNKNOWN_RULES,
    }
}

/// Tabla inmutable, normalizada al orden canónico de [`FieldCategory`].
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: HashMap<FileKind, Vec<Rule>>,
}

/// Tabla por defecto del proceso, construida una sola vez.
pub static DEFAULT_TABLE: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::from_rows(FileKind::ALL.iter().map(|&kind| (kind, default_rules(kind))))
});

impl RuleTable {
    /// Construye una tabla a partir de filas por tipo. Una categoría repetida
    /// conserva su primera aparición.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = (FileKind, &'a [Rule])>) -> Self {
        let mut rules = HashMap::new();
        for (kind, rows) in rows {
            let normalized: Vec<Rule> = FieldCategory::ALL
                .iter()
                .filter_map(|&category| rows.iter().find(|rule| rule.category == category))
                .copied()
                .collect();
            rules.insert(kind, normalized);
        }
        Self { rules }
    }

    pub fn rules(&self, kind: FileKind) -> &[Rule] {
        self.rules.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_applicable(&self, kind: FileKind, category: FieldCategory) -> bool {
        self.rules(kind).iter().any(|rule| rule.category == category)
    }

    pub fn applicable_categories(&self, kind: FileKind) -> Vec<FieldCategory> {
        self.rules(kind).iter().map(|rule| rule.category).collect()
    }
}

/// Categorías aplicables a `kind` según la tabla por defecto.
pub fn applicable_categories(kind: FileKind) -> Vec<FieldCategory> {
    DEFAULT_TABLE.applicable_categories(kind)
}
