//! Motor de políticas de metadata: decide, por tipo de archivo y modo de
//! limpieza, qué categorías se conservan y cuáles se eliminan.
//!
//! El cálculo es puro: no hace E/S ni muta estado compartido, por lo que la
//! interfaz puede previsualizar la política antes de tocar ningún archivo.

mod category;
mod classify;
mod kind;
mod mode;
mod overrides;
mod resolve;
mod table;

pub use category::FieldCategory;
pub use classify::{classify_tag, is_structural_tag};
pub use kind::FileKind;
pub use mode::{Action, CleaningMode};
pub use overrides::Overrides;
pub use resolve::{Directive, PolicyResult, resolve};
pub use table::{DEFAULT_TABLE, Rule, RuleTable, applicable_categories, default_rules};
