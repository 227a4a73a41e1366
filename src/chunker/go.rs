//! Go extraction spec

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
        "method_declaration",
        NamedChunkExtractor {
            name_query: "(method_declaration name: (field_identifier) @name)",
            parent_name_query: Some(
                r#"
(method_declaration
  receiver: (parameter_list
    (parameter_declaration
      type: [
        (type_identifier) @receiver
        (pointer_type (type_identifier) @receiver)
        (generic_type type: (type_identifier) @receiver)
        (pointer_type (generic_type type: (type_identifier) @receiver))
      ])))
"#,
            ),
        },
    );
    named_chunks.insert(
        "type_declaration",
        NamedChunkExtractor {
            name_query: r#"
(type_declaration [
  (type_spec name: (type_identifier) @name)
  (type_alias name: (type_identifier) @name)
])
"#,
            parent_name_query: None,
        },
    );
    // Single-spec declarations only; grouped blocks produce multiple
    // captures and fall back to content hashes.
    named_chunks.insert(
        "const_declaration",
        NamedChunkExtractor {
            name_query: "(const_declaration (const_spec name: (identifier) @name))",
            parent_name_query: None,
        },
    );
    named_chunks.insert(
        "var_declaration",
        NamedChunkExtractor {
            name_query: "(var_declaration (var_spec name: (identifier) @name))",
            parent_name_query: None,
        },
    );

    LanguageSpec {
        named_chunks,
        extract_children_in: &[],
        fold_into_next_node: &["comment"],
        skip_types: &["package_clause"],
        file_type_rules: &[
            FileTypeRule {
                pattern: "**/*_test.go",
                file_type: FileType::Tests,
            },
            FileTypeRule {
                pattern: "**/vendor/**",
                file_type: FileType::Ignore,
            },
        ],
    }
}
