use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::config::GeneratorConfig;
use crate::decls::{Declaration, Definition};
use crate::error::Result;

use super::ollama::OllamaClient;

/// The fixed request template. The comment style is not configurable.
const PROMPT_PREAMBLE: &str = "I will give you the code of a C declaration and need a \
documentation comment for it. The comment follows typical manpage style: explain each \
parameter and its value range, the return value with its meaning and implications, and \
side effects such as setting errno or handing ownership of returned resources to the \
caller. Answer only with the comment exactly as it should be placed in the code, with \
no other additions.";

/// Produces a documentation comment for one declaration.
///
/// Implementations never fail: whatever happens on the way to the backend,
/// the caller gets text it can splice into a patch.
pub trait DocGenerator {
    fn docstring_for(&self, decl: &Declaration, def: Option<&Definition>) -> String;
}

/// [`DocGenerator`] backed by an Ollama endpoint.
pub struct OllamaGenerator {
    client: OllamaClient,
    /// Where `out_<name>.txt` request/response captures land; `None` disables them.
    audit_dir: Option<PathBuf>,
}

impl OllamaGenerator {
    pub fn new(config: &GeneratorConfig, audit_dir: Option<PathBuf>) -> Result<Self> {
        Ok(OllamaGenerator {
            client: OllamaClient::new(&config.host, config.port, &config.model)?,
            audit_dir,
        })
    }

    fn write_audit(&self, name: &str, prompt: &str, result: &str) {
        let Some(dir) = &self.audit_dir else {
            return;
        };
        let path = dir.join(format!("out_{name}.txt"));
        let body = format!("query:\n{prompt}\n\nresult:\n{result}\n");
        if let Err(e) = fs::write(&path, body) {
            warn!("[generate] failed to write audit file {}: {e}", path.display());
        }
    }
}

impl DocGenerator for OllamaGenerator {
    fn docstring_for(&self, decl: &Declaration, def: Option<&Definition>) -> String {
        let snippet = match source_snippet(decl, def) {
            Ok(snippet) => snippet,
            Err(e) => {
                warn!("[generate] cannot read source for {}: {e}", decl.name);
                return placeholder(&decl.name, &e.to_string());
            }
        };

        let prompt = build_prompt(&snippet);
        let result = match self.client.generate(&prompt) {
            Ok(text) => text,
            Err(e) => {
                warn!("[generate] backend request for {} failed: {e}", decl.name);
                placeholder(&decl.name, &e.to_string())
            }
        };

        self.write_audit(&decl.name, &prompt, &result);
        result
    }
}

fn build_prompt(snippet: &str) -> String {
    format!("{PROMPT_PREAMBLE} The code to write the comment for is as follows:\n```\n{snippet}\n```")
}

/// A syntactically harmless stand-in so the patch pipeline keeps moving
/// when the backend or the filesystem lets a single declaration down.
fn placeholder(name: &str, reason: &str) -> String {
    format!("/* {name}: documentation generation failed: {reason} */")
}

/// Read the authoritative source text for a declaration.
///
/// The definition body is the better context when one was correlated;
/// otherwise the declaration line itself has to do. Lines come back
/// verbatim, terminators included.
fn source_snippet(decl: &Declaration, def: Option<&Definition>) -> std::io::Result<String> {
    let (file, start_line, end_line) = match def {
        Some(d) => match d.extent {
            Some(extent) => (d.file.as_str(), extent.start_line, extent.end_line),
            None => (d.file.as_str(), d.line, d.line),
        },
        None => (decl.file.as_str(), decl.line, decl.line),
    };

    let content = fs::read_to_string(file)?;
    let start = start_line.saturating_sub(1) as usize;
    let count = (end_line as usize).saturating_sub(start);
    Ok(content.split_inclusive('\n').skip(start).take(count).collect())
}

#[cfg(test)]
#[path = "../../tests/src/generate/gateway_tests.rs"]
mod tests;
