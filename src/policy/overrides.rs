//! Reglas de usuario avanzado: acciones explícitas por categoría que tienen
//! prioridad sobre el modo de limpieza.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::category::FieldCategory;
use super::mode::Action;
use crate::error::PolicyError;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overrides {
    actions: BTreeMap<FieldCategory, Action>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: FieldCategory, action: Action) -> Self {
        self.set(category, action);
        self
    }

    /// Registra la acción para `category`, reemplazando una anterior.
    pub fn set(&mut self, category: FieldCategory, action: Action) {
        self.actions.insert(category, action);
    }

    pub fn clear(&mut self, category: FieldCategory) {
        self.actions.remove(&category);
    }

    pub fn get(&self, category: FieldCategory) -> Option<Action> {
        self.actions.get(&category).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldCategory, Action)> + '_ {
        self.actions.iter().map(|(category, action)| (*category, *action))
    }

    /// Aplica las reglas de `other` encima de las actuales.
    pub fn merge(&mut self, other: &Overrides) {
        for (category, action) in other.iter() {
            self.set(category, action);
        }
    }

    /// Interpreta una lista de pares `categoria=accion` (`gps=keep`, `xmp=strip`).
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (category, action) = pair
                .split_once('=')
                .ok_or_else(|| PolicyError::MalformedOverride(pair.to_string()))?;
            overrides.set(category.parse()?, action.parse()?);
        }
        Ok(overrides)
    }
}

impl FromStr for Overrides {
    type Err = PolicyError;

    /// Acepta pares separados por comas: `gps=keep,xmp=strip`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse_pairs(
            input
                .split(',')
                .map(str::trim)
                .filter(|pair| !pair.is_empty()),
        )
    }
}

impl FromIterator<(FieldCategory, Action)> for Overrides {
    fn from_iter<T: IntoIterator<Item = (FieldCategory, Action)>>(iter: T) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}
