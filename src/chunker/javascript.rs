//! JavaScript extraction spec

use std::collections::HashMap;

use crate::chunker::{FileType, FileTypeRule, LanguageSpec, NamedChunkExtractor};

pub(super) fn spec() -> LanguageSpec {
    let mut named_chunks = HashMap::new();

    named_chunks.insert(
        "function_declaration",
        NamedChunkExtractor {
            name_query: "(function_declaration name: (identifier) @name)",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "generator_function_declaration",
        NamedChunkExtractor {
            name_query: "(generator_function_declaration name: (identifier) @name)",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "class_declaration",
        NamedChunkExtractor {
            name_query: "(class_declaration name: (identifier) @name)",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "lexical_declaration",
        NamedChunkExtractor {
            name_query: "(lexical_declaration (variable_declarator name: (identifier) @name))",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "variable_declaration",
        NamedChunkExtractor {
            name_query: "(variable_declaration (variable_declarator name: (identifier) @name))",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "method_definition",
        NamedChunkExtractor {
            name_query: "(method_definition name: (property_identifier) @name)",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "field_definition",
        NamedChunkExtractor {
            name_query: "(field_definition property: (property_identifier) @name)",
            parent_name_query: None,
        },
    );

    LanguageSpec {
        named_chunks,
        extract_children_in: &["class_declaration", "class_body", "export_statement"],
        fold_into_next_node: &["comment", "export", "default"],
        skip_types: &[
            // Imports pollute search results
            "import_statement",
            // Punctuation and keyword tokens
            "{",
            "}",
            ";",
            "class",
            "extends",
            "implements",
            // Identifier tokens (part of the declarations)
            "identifier",
            // Heritage clauses
            "class_heritage",
            // Containers (still recursed into)
            "class_body",
            "export_statement",
        ],
        file_type_rules: &[
            FileTypeRule {
                pattern: "**/*.test.js",
                file_type: FileType::Tests,
            },
            FileTypeRule {
                pattern: "**/*.test.jsx",
                file_type: FileType::Tests,
            },
            FileTypeRule {
                pattern: "**/*.spec.js",
                file_type: FileType::Tests,
            },
            FileTypeRule {
                pattern: "**/*.spec.jsx",
                file_type: FileType::Tests,
            },
            FileTypeRule {
                pattern: "**/node_modules/**",
                file_type: FileType::Ignore,
            },
            FileTypeRule {
                pattern: "**/dist/**",
                file_type: FileType::Ignore,
            },
            FileTypeRule {
                pattern: "**/build/**",
                file_type: FileType::Ignore,
            },
        ],
    }
}
