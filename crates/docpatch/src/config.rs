use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::decls::DeclKind;
use crate::error::{DocpatchError, Result};
use crate::filter::{FilterRule, MatchKind, RuleAction, RuleSet};

const CONFIG_FILENAME: &str = "docpatch.toml";

/// Walks parent directories from `start` looking for `docpatch.toml`.
/// Returns the path to the first one found, or `None`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() { start.parent()? } else { start };
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Top-level tool configuration.
///
/// Every section has working defaults, so running without a `docpatch.toml`
/// is the common case. Unknown keys are tolerated.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub generator: GeneratorConfig,
    pub synthesis: SynthesisConfig,
    /// Filter rules, applied in order (`[[rules]]` entries).
    pub rules: Vec<RuleConfig>,
}

/// `[parser]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Compiler binary used for the AST dump.
    pub binary: String,
    /// Language standard passed as `-std=`.
    pub std: String,
    /// Extra arguments appended to every dump invocation (`-I`, `-D`, ...).
    pub extra_args: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            binary: "clang".to_string(),
            std: "c11".to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// `[generator]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
    /// Where `out_<name>.txt` request/response captures are written.
    pub audit_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            host: "localhost".to_string(),
            port: 11434,
            model: "llama3.1".to_string(),
            audit_dir: PathBuf::from("."),
        }
    }
}

/// `[synthesis]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Warn (rather than quietly skip) when a docstring would land past the
    /// end of its file.
    pub warn_out_of_range: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            warn_out_of_range: true,
        }
    }
}

/// One `[[rules]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub action: RuleAction,
    pub kind: DeclKind,
    #[serde(rename = "match")]
    pub match_kind: MatchKind,
    pub value: String,
}

impl Config {
    /// Load the config nearest to `start`, or defaults when none exists.
    ///
    /// A config file that exists but does not parse is a hard error, not a
    /// fallback to defaults.
    pub fn load(start: &Path) -> Result<(Config, Option<PathBuf>)> {
        let Some(path) = find_config(start) else {
            return Ok((Config::default(), None));
        };
        let content =
            std::fs::read_to_string(&path).map_err(|e| DocpatchError::io(path.clone(), e))?;
        let config: Config = toml::from_str(&content).map_err(|e| DocpatchError::Config {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        Ok((config, Some(path)))
    }

    /// Compile the `[[rules]]` entries into a rule set.
    pub fn rule_set(&self) -> Result<RuleSet> {
        let mut rules = RuleSet::new();
        for rule in &self.rules {
            rules.push(match rule.match_kind {
                MatchKind::Exact => FilterRule::exact(rule.action, rule.kind, &rule.value),
                MatchKind::Pattern => FilterRule::pattern(rule.action, rule.kind, &rule.value)?,
            });
        }
        Ok(rules)
    }
}

#[cfg(test)]
#[path = "../tests/src/config_tests.rs"]
mod tests;
