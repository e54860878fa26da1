//! Resolución de la política definitiva para un archivo.

use serde::{Deserialize, Serialize};

use super::category::FieldCategory;
use super::kind::FileKind;
use super::mode::{Action, CleaningMode};
use super::overrides::Overrides;
use super::table::{DEFAULT_TABLE, RuleTable};

/// Acción decidida para una categoría.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub category: FieldCategory,
    pub action: Action,
}

/// Secuencia ordenada de directivas que recibe el adaptador de la herramienta externa.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PolicyResult {
    pub kind: FileKind,
    pub mode: CleaningMode,
    pub directives: Vec<Directive>,
}

impl PolicyResult {
    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// `None` cuando la categoría no aplica al tipo de archivo.
    pub fn action_for(&self, category: FieldCategory) -> Option<Action> {
        self.directives
            .iter()
            .find(|directive| directive.category == category)
            .map(|directive| directive.action)
    }

    pub fn preserved(&self) -> Vec<FieldCategory> {
        self.categories_with(Action::Preserve)
    }

    pub fn stripped(&self) -> Vec<FieldCategory> {
        self.categories_with(Action::Strip)
    }

    pub fn strips_anything(&self) -> bool {
        self.directives
            .iter()
            .any(|directive| directive.action == Action::Strip)
    }

    pub fn strips_everything(&self) -> bool {
        self.directives
            .iter()
            .all(|directive| directive.action == Action::Strip)
    }

    fn categories_with(&self, action: Action) -> Vec<FieldCategory> {
        self.directives
            .iter()
            .filter(|directive| directive.action == action)
            .map(|directive| directive.category)
            .collect()
    }
}

impl<'a> IntoIterator for &'a PolicyResult {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}

/// Resuelve la política de `kind` con la tabla por defecto del proceso.
pub fn resolve(kind: FileKind, mode: CleaningMode, overrides: &Overrides) -> PolicyResult {
    DEFAULT_TABLE.resolve(kind, mode, overrides)
}

impl RuleTable {
    /// Prioridad: regla explícita del usuario, luego tabla segura (sin pérdida),
    /// luego eliminación (completo). Las categorías no aplicables se omiten,
    /// incluso si el usuario las sobrescribió.
    pub fn resolve(&self, kind: FileKind, mode: CleaningMode, overrides: &Overrides) -> PolicyResult {
        let directives = self
            .rules(kind)
            .iter()
            .map(|rule| {
                let action = match (overrides.get(rule.category), mode) {
                    (Some(explicit), _) => explicit,
                    (None, CleaningMode::Lossless) => rule.lossless,
                    (None, CleaningMode::Full) => Action::Strip,
                };
                Directive {
                    category: rule.category,
                    action,
                }
            })
            .collect();

        PolicyResult {
            kind,
            mode,
            directives,
        }
    }
}
