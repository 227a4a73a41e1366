//! TypeScript extraction spec

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
        "function_signature",
        NamedChunkExtractor {
            name_query: "(function_signature name: (identifier) @name)",
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
            name_query: "(class_declaration name: (type_identifier) @name)",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "abstract_class_declaration",
        NamedChunkExtractor {
            name_query: "(abstract_class_declaration name: (type_identifier) @name)",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "interface_declaration",
        NamedChunkExtractor {
            name_query: "(interface_declaration name: (type_identifier) @name)",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "type_alias_declaration",
        NamedChunkExtractor {
            name_query: "(type_alias_declaration name: (type_identifier) @name)",
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
        "ambient_declaration",
        NamedChunkExtractor {
            name_query:
                "(ambient_declaration (variable_declaration (variable_declarator name: (identifier) @name)))",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "enum_declaration",
        NamedChunkExtractor {
            name_query: "(enum_declaration name: (identifier) @name)",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "module",
        NamedChunkExtractor {
            name_query: "(module name: (identifier) @name)",
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
        "public_field_definition",
        NamedChunkExtractor {
            name_query: "(public_field_definition name: (property_identifier) @name)",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "field_definition",
        NamedChunkExtractor {
            name_query: "(field_definition name: (property_identifier) @name)",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "abstract_method_signature",
        NamedChunkExtractor {
            name_query: "(abstract_method_signature name: (property_identifier) @name)",
            parent_name_query: None,
        },
    );

    LanguageSpec {
        named_chunks,
        extract_children_in: &[
            "class_declaration",
            "abstract_class_declaration",
            "class_body",
            "export_statement",
        ],
        fold_into_next_node: &["comment", "export", "default"],
        skip_types: &[
            // Imports pollute search results
            "import_statement",
            "import_alias",
            // Punctuation and keyword tokens
            "{",
            "}",
            ";",
            "class",
            "abstract",
            "extends",
            "implements",
            // Identifier tokens (part of the declarations)
            "type_identifier",
            "identifier",
            // Type parameters and clauses
            "type_parameters",
            "class_heritage",
            // Decorators are folded into the definitions they annotate
            "decorator",
            // Containers (still recursed into)
            "class_body",
            "export_statement",
        ],
        file_type_rules: &[
            FileTypeRule {
                pattern: "**/*.test.ts",
                file_type: FileType::Tests,
            },
            FileTypeRule {
                pattern: "**/*.test.tsx",
                file_type: FileType::Tests,
            },
            FileTypeRule {
                pattern: "**/*.spec.ts",
                file_type: FileType::Tests,
            },
            FileTypeRule {
                pattern: "**/*.spec.tsx",
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
