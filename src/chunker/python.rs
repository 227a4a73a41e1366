//! Python extraction spec

use std::collections::HashMap;

use crate::chunker::{FileType, FileTypeRule, LanguageSpec, NamedChunkExtractor};

pub(super) fn spec() -> LanguageSpec {
    let mut named_chunks = HashMap::new();

    named_chunks.insert(
        "function_definition",
        NamedChunkExtractor {
            name_query: "(function_definition name: (identifier) @name)",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "class_definition",
        NamedChunkExtractor {
            name_query: "(class_definition name: (identifier) @name)",
            parent_name_query: None,
        },
    );
    // Single assignments become named chunks; docstrings and tuple
    // targets fall back to content hashes.
    named_chunks.insert(
        "expression_statement",
        NamedChunkExtractor {
            name_query: "(expression_statement (assignment left: (identifier) @name))",
            parent_name_query: None,
        },
    );

    LanguageSpec {
        named_chunks,
        // decorated_definition and block are transparent containers:
        // the inner definition is emitted, members carry the class prefix
        extract_children_in: &["class_definition", "decorated_definition", "block"],
        fold_into_next_node: &["comment", "decorator"],
        skip_types: &[
            // Imports pollute search results
            "import_statement",
            "import_from_statement",
            "future_import_statement",
            // Keyword and punctuation tokens
            "class",
            ":",
            // Identifier and clause tokens (part of the declarations)
            "identifier",
            "argument_list",
            "type_parameter",
            // Containers (still recursed into)
            "decorated_definition",
            "block",
        ],
        file_type_rules: &[
            FileTypeRule {
                pattern: "**/test_*.py",
                file_type: FileType::Tests,
            },
            FileTypeRule {
                pattern: "**/*_test.py",
                file_type: FileType::Tests,
            },
            FileTypeRule {
                pattern: "**/tests/**",
                file_type: FileType::Tests,
            },
            FileTypeRule {
                pattern: "**/__pycache__/**",
                file_type: FileType::Ignore,
            },
            FileTypeRule {
                pattern: "**/.venv/**",
                file_type: FileType::Ignore,
            },
        ],
    }
}
