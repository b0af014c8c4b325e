pub mod config;
pub mod coverage;
pub mod decls;
pub mod discover;
pub mod error;
pub mod filter;
pub mod generate;
pub mod parser;
pub mod patch;

pub use config::Config;
pub use coverage::CoverageReport;
pub use decls::{
    CorrelationMap, DeclKind, DeclTable, Declaration, Definition, Extent, NameCollision, correlate,
    extract_header, extract_into,
};
pub use error::{DocpatchError, Result};
pub use filter::{FilterRule, MatchKind, RuleAction, RuleSet};
pub use generate::{DocGenerator, OllamaClient, OllamaGenerator};
pub use parser::{DocComment, SyntaxRecord, parse_records};
pub use patch::{ApplySummary, SynthesisOptions, SynthesisSummary, apply_patches, synthesize_patches};
