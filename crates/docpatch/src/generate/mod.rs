//! Docstring generation through an external text-generation backend.

mod gateway;
mod ollama;

pub use gateway::{DocGenerator, OllamaGenerator};
pub use ollama::OllamaClient;
