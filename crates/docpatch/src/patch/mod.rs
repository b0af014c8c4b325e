//! Patch synthesis and forward-only application.

mod apply;
mod synth;

pub use apply::{ApplySummary, apply_patches};
pub use synth::{SynthesisOptions, SynthesisSummary, synthesize_patches};
