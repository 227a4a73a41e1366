//! Language registry: extension mapping and chunker construction

use std::path::Path;

use crate::chunker::{Chunker, LanguageSpec};
use crate::error::ChunkError;

/// Languages with an extraction spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Go,
    Python,
    JavaScript,
    TypeScript,
    Markdown,
}

impl Language {
    /// Map a lowercased extension (without the dot) to a language
    pub fn detect(extension: &str) -> Option<Language> {
        match extension {
            "go" => Some(Language::Go),
            "py" => Some(Language::Python),
            "js" | "mjs" | "cjs" | "jsx" => Some(Language::JavaScript),
            "ts" | "tsx" => Some(Language::TypeScript),
            "md" | "markdown" => Some(Language::Markdown),
            _ => None,
        }
    }

    /// Detect the language of a workspace path from its extension
    pub fn detect_path(path: impl AsRef<Path>) -> Option<Language> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        Language::detect(&ext)
    }

    /// Every extension the registry knows, lowercased, without dots
    pub fn supported_extensions() -> &'static [&'static str] {
        &[
            "go", "py", "js", "mjs", "cjs", "jsx", "ts", "tsx", "md", "markdown",
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Go => "Go",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Markdown => "Markdown",
        }
    }

    /// The tree-sitter grammar backing this language
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Markdown => tree_sitter_md::LANGUAGE.into(),
        }
    }

    pub(crate) fn spec(&self) -> LanguageSpec {
        match self {
            Language::Go => super::go::spec(),
            Language::Python => super::python::spec(),
            Language::JavaScript => super::javascript::spec(),
            Language::TypeScript => super::typescript::spec(),
            Language::Markdown => super::markdown::spec(),
        }
    }

    /// Build a chunker for this language rooted at `workspace_root`
    pub fn chunker(&self, workspace_root: impl AsRef<Path>) -> Result<Chunker, ChunkError> {
        Chunker::new(workspace_root, *self)
    }
}
