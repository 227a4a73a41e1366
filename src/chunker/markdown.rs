//! Markdown extraction spec
//!
//! Chunks by section; nested sections produce overlapping chunks so a
//! query can land on either the enclosing or the inner heading's text.
//! Sections have no stable name, so their paths are content hashes.

use std::collections::HashMap;

use crate::chunker::{FileType, FileTypeRule, LanguageSpec};

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec {
        named_chunks: HashMap::new(),
        extract_children_in: &["section"],
        fold_into_next_node: &[],
        skip_types: &[
            // Headings are organizational markers, not containers.
            "atx_heading",
            "setext_heading",
            // We're chunking by section so lower level nodes don't get
            // their own chunks since this would lead to a lot of noise
            // as sections overlap.
            "block_quote",
            "block_continuation",
            "fenced_code_block",
            "indented_code_block",
            "html_block",
            "link_reference_definition",
            "list",
            "paragraph",
            "pipe_table",
            "thematic_break",
        ],
        file_type_rules: &[FileTypeRule {
            pattern: "**/*.md",
            file_type: FileType::Docs,
        }],
    }
}
