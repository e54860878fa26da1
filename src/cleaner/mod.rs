//! Limpieza de archivos individuales y por lotes delegando en la herramienta externa.

mod batch;
mod clean;
mod destination;
mod verify;

pub use batch::{
    BatchSummary, CleanupEvent, collect_candidate_files, expand_inputs, run_cleanup_with_sender,
};
pub use clean::{
    CleanOptions, CleanOutcome, CommitGuard, clean_file, clean_file_guarded, preview_policy,
};
pub use destination::plan_destination;
pub use verify::verify_image_clean;

#[cfg(test)]
mod tests;
