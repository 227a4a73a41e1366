//! Structural chunking of source files
//!
//! Walks a tree-sitter concrete syntax tree with a per-language
//! [`LanguageSpec`] and produces path-addressed [`Chunk`]s: named
//! syntactic units (functions, methods, classes, Markdown sections)
//! plus content-hash-addressed chunks for everything unnamed.

mod go;
mod javascript;
pub mod language;
mod markdown;
mod python;
mod typescript;

#[cfg(test)]
mod tests;

pub use language::Language;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use globset::{Glob, GlobMatcher};
use tree_sitter::{Node, Parser, Point, Query, QueryCursor, StreamingIterator};
use twox_hash::XxHash64;

use crate::error::ChunkError;

const SUMMARY_MAX_CHARS: usize = 80;

/// Classification of a file within the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Src,
    Tests,
    Docs,
    Ignore,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Src => "src",
            FileType::Tests => "tests",
            FileType::Docs => "docs",
            FileType::Ignore => "ignore",
        }
    }

    pub fn parse(s: &str) -> Option<FileType> {
        match s {
            "src" => Some(FileType::Src),
            "tests" => Some(FileType::Tests),
            "docs" => Some(FileType::Docs),
            "ignore" => Some(FileType::Ignore),
            _ => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous, addressable region of a source file
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Workspace-relative file path (forward-slashed)
    pub file: String,
    /// Classification inherited from the enclosing file
    pub chunk_type: FileType,
    /// In-file address, `::`-separated; a content hash for unnamed regions
    pub path: String,
    /// First non-blank line of the node, truncated at 80 characters
    pub summary: String,
    /// Exact bytes of the region, including any folded predecessors
    pub source: String,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    /// Seconds since epoch at the moment the enclosing file was parsed
    pub parsed_at: i64,
}

impl Chunk {
    /// Stable identifier used across processes: `file::path`
    pub fn id(&self) -> String {
        format!("{}::{}", self.file, self.path)
    }
}

/// A parsed file and its ordered chunks
///
/// The syntax tree is discarded after extraction; chunks retain only
/// their extracted source.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Workspace-relative path
    pub path: String,
    /// Raw file bytes
    pub source: Vec<u8>,
    /// Seconds since epoch when the file was parsed
    pub parsed_at: i64,
    /// Chunks in source order
    pub chunks: Vec<Chunk>,
}

/// Capture queries used to name a chunk of a given node kind
///
/// Each query must return exactly one named capture. `parent_name_query`
/// is evaluated on the same node (not its syntactic parent); its result
/// becomes the `parent::` prefix.
#[derive(Debug, Clone)]
pub struct NamedChunkExtractor {
    pub name_query: &'static str,
    pub parent_name_query: Option<&'static str>,
}

/// A glob-to-classification rule applied to workspace-relative paths
#[derive(Debug, Clone)]
pub struct FileTypeRule {
    pub pattern: &'static str,
    pub file_type: FileType,
}

/// Per-language extraction configuration
#[derive(Debug, Clone, Default)]
pub struct LanguageSpec {
    /// Node kind -> naming queries
    pub named_chunks: HashMap<&'static str, NamedChunkExtractor>,
    /// Node kinds whose children are recursed into, carrying the
    /// current chunk path as the parent prefix
    pub extract_children_in: &'static [&'static str],
    /// Node kinds absorbed into the start of the next emitted sibling
    pub fold_into_next_node: &'static [&'static str],
    /// Node kinds that are neither emitted nor recursed into
    pub skip_types: &'static [&'static str],
    /// Evaluated after the global rules; first match wins
    pub file_type_rules: &'static [FileTypeRule],
}

// Evaluated before any language rules. First match wins; default is src.
const GLOBAL_FILE_TYPE_RULES: &[FileTypeRule] = &[
    FileTypeRule {
        pattern: "tests/**",
        file_type: FileType::Tests,
    },
    FileTypeRule {
        pattern: "test/**",
        file_type: FileType::Tests,
    },
    FileTypeRule {
        pattern: "**/testdata/**",
        file_type: FileType::Tests,
    },
    FileTypeRule {
        pattern: "docs/**",
        file_type: FileType::Docs,
    },
    FileTypeRule {
        pattern: "doc/**",
        file_type: FileType::Docs,
    },
    FileTypeRule {
        pattern: ".git/**",
        file_type: FileType::Ignore,
    },
];

/// Produce the 16-hex-digit (at most) address of an unnamed region
pub(crate) fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", XxHash64::oneshot(0, bytes))
}

/// First non-blank line of `source`, trimmed; truncated past 80
/// characters at the next space with a `...` suffix.
pub fn summarize(source: &str) -> String {
    let source = source.trim();
    let first_line = source.lines().next().unwrap_or("").trim();

    if first_line.len() <= SUMMARY_MAX_CHARS {
        return first_line.to_string();
    }

    let tail = &first_line.as_bytes()[SUMMARY_MAX_CHARS..];
    match tail.iter().position(|&b| b == b' ') {
        Some(offset) => format!("{}...", &first_line[..SUMMARY_MAX_CHARS + offset]),
        None => {
            let mut cut = SUMMARY_MAX_CHARS;
            while !first_line.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}...", &first_line[..cut])
        }
    }
}

struct CompiledExtractor {
    name: Query,
    parent_name: Option<Query>,
}

type QueryCache = Mutex<HashMap<&'static str, Option<Arc<CompiledExtractor>>>>;

struct Extraction<'s> {
    source: &'s [u8],
    file: &'s str,
    file_type: FileType,
    parsed_at: i64,
    used_paths: HashSet<String>,
    chunks: Vec<Chunk>,
}

/// Spec-driven chunk extractor for a single language
///
/// The tree-sitter parser is not reentrant, so it lives behind a mutex
/// and a single `Chunker` can be shared across tasks.
pub struct Chunker {
    workspace_root: PathBuf,
    grammar: tree_sitter::Language,
    spec: LanguageSpec,
    parser: Mutex<Parser>,
    // Name queries compile on first use; a query the grammar rejects is
    // memoized as None and its node kind falls back to content hashes
    queries: QueryCache,
    type_rules: Vec<(GlobMatcher, FileType)>,
}

impl Chunker {
    /// Create a chunker for `language` rooted at `workspace_root`
    pub fn new(workspace_root: impl AsRef<Path>, language: Language) -> Result<Self, ChunkError> {
        let grammar = language.grammar();
        let spec = language.spec();

        let mut parser = Parser::new();
        parser
            .set_language(&grammar)
            .map_err(|e| ChunkError::InvalidSpec(format!("failed to set parser language: {e}")))?;

        let mut type_rules = Vec::new();
        for rule in GLOBAL_FILE_TYPE_RULES.iter().chain(spec.file_type_rules) {
            let matcher = Glob::new(rule.pattern)
                .map_err(|e| ChunkError::InvalidSpec(format!("bad glob {}: {e}", rule.pattern)))?
                .compile_matcher();
            type_rules.push((matcher, rule.file_type));
        }

        Ok(Self {
            workspace_root: workspace_root.as_ref().to_path_buf(),
            grammar,
            spec,
            parser: Mutex::new(parser),
            queries: Mutex::new(HashMap::new()),
            type_rules,
        })
    }

    fn extractor_for(
        &self,
        kind: &'static str,
        extractor: &NamedChunkExtractor,
    ) -> Option<Arc<CompiledExtractor>> {
        let mut cache = self.queries.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(cached) = cache.get(kind) {
            return cached.clone();
        }

        let compiled = compile_extractor(&self.grammar, extractor).map(Arc::new);
        if compiled.is_none() {
            tracing::warn!("Invalid name query for node kind {kind}, using content hashes");
        }
        cache.insert(kind, compiled.clone());
        compiled
    }

    /// Classify a workspace-relative path; global rules run first
    pub fn classify_file_type(&self, file_path: &str) -> FileType {
        for (matcher, file_type) in &self.type_rules {
            if matcher.is_match(file_path) {
                return *file_type;
            }
        }

        FileType::Src
    }

    /// Parse `file_path` and extract its chunks
    pub fn chunk(&self, file_path: &str) -> Result<SourceFile, ChunkError> {
        let file_type = self.classify_file_type(file_path);
        if file_type == FileType::Ignore {
            return Err(ChunkError::IgnoredFile(file_path.to_string()));
        }

        let full_path = self.workspace_root.join(file_path);
        let source = fs::read(&full_path)?;

        let tree = {
            let mut parser = self
                .parser
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            parser.parse(&source, None)
        }
        .ok_or_else(|| ChunkError::ParseFailed(file_path.to_string()))?;

        let parsed_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        let mut cx = Extraction {
            source: &source,
            file: file_path,
            file_type,
            parsed_at,
            used_paths: HashSet::new(),
            chunks: Vec::new(),
        };

        let mut folded = Vec::new();
        self.extract_children(tree.root_node(), "", &mut folded, &mut cx);
        self.flush_folded(&mut folded, &mut cx);

        let chunks = cx.chunks;
        Ok(SourceFile {
            path: file_path.to_string(),
            source,
            parsed_at,
            chunks,
        })
    }

    fn extract_children<'t>(
        &self,
        node: Node<'t>,
        parent_path: &str,
        folded: &mut Vec<Node<'t>>,
        cx: &mut Extraction<'_>,
    ) {
        for i in 0..node.child_count() {
            let Some(child) = node.child(i) else { continue };
            let kind = child.kind();
            let recurse = self.spec.extract_children_in.contains(&kind);

            if self.spec.skip_types.contains(&kind) {
                // Containers like class bodies are skipped but still
                // recursed into, carrying the current prefix. A skipped
                // sibling also ends any pending fold run.
                if recurse {
                    self.extract_children(child, parent_path, folded, cx);
                } else {
                    self.flush_folded(folded, cx);
                }
                continue;
            }

            if self.spec.fold_into_next_node.contains(&kind) {
                folded.push(child);
                continue;
            }

            let mut path = parent_path.to_string();
            let compiled = self
                .spec
                .named_chunks
                .get(kind)
                .and_then(|extractor| self.extractor_for(kind, extractor));
            match compiled {
                Some(extractor) => {
                    match self.build_chunk_path(&extractor, child, cx.source, parent_path) {
                        Ok(chunk_path) => {
                            path = self.emit(child, chunk_path, folded, cx);
                        }
                        Err(_) => {
                            // Query failed, fall back to content-hash extraction
                            self.emit_unnamed(child, folded, cx);
                        }
                    }
                }
                None => {
                    self.emit_unnamed(child, folded, cx);
                }
            }

            if recurse {
                let mut inner = Vec::new();
                self.extract_children(child, &path, &mut inner, cx);
                self.flush_folded(&mut inner, cx);
            }
        }
    }

    fn build_chunk_path(
        &self,
        extractor: &CompiledExtractor,
        node: Node<'_>,
        source: &[u8],
        parent_path: &str,
    ) -> Result<String, ChunkError> {
        let name = self.single_capture(&extractor.name, node, source)?;

        let path = match &extractor.parent_name {
            Some(query) => {
                let parent_name = self.single_capture(query, node, source)?;
                format!("{parent_name}::{name}")
            }
            None => name,
        };

        if parent_path.is_empty() {
            Ok(path)
        } else {
            Ok(format!("{parent_path}::{path}"))
        }
    }

    fn single_capture(
        &self,
        query: &Query,
        node: Node<'_>,
        source: &[u8],
    ) -> Result<String, ChunkError> {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, node, source);

        let mut captured = None;
        while let Some(m) = matches.next() {
            for capture in m.captures {
                if captured.is_some() {
                    return Err(ChunkError::QueryFailed("too many matches".to_string()));
                }
                let range = capture.node.byte_range();
                captured = Some(String::from_utf8_lossy(&source[range]).into_owned());
            }
        }

        captured.ok_or_else(|| ChunkError::QueryFailed("no matches found".to_string()))
    }

    /// Emit `node` under `path`, extending its start over any buffered
    /// foldable predecessors. Returns the disambiguated path.
    fn emit<'t>(
        &self,
        node: Node<'t>,
        path: String,
        folded: &mut Vec<Node<'t>>,
        cx: &mut Extraction<'_>,
    ) -> String {
        let start = folded
            .first()
            .map(|n| (n.start_position(), n.start_byte()))
            .unwrap_or((node.start_position(), node.start_byte()));
        folded.clear();

        self.push_chunk(node, path, start, cx)
    }

    fn emit_unnamed<'t>(
        &self,
        node: Node<'t>,
        folded: &mut Vec<Node<'t>>,
        cx: &mut Extraction<'_>,
    ) {
        let path = content_hash(&cx.source[node.byte_range()]);
        self.emit(node, path, folded, cx);
    }

    /// Fold buffers only extend the immediately following emitted
    /// sibling; anything still buffered becomes its own hash chunk.
    fn flush_folded<'t>(&self, folded: &mut Vec<Node<'t>>, cx: &mut Extraction<'_>) {
        for node in std::mem::take(folded) {
            let path = content_hash(&cx.source[node.byte_range()]);
            self.push_chunk(node, path, (node.start_position(), node.start_byte()), cx);
        }
    }

    fn push_chunk(
        &self,
        node: Node<'_>,
        path: String,
        start: (Point, usize),
        cx: &mut Extraction<'_>,
    ) -> String {
        let path = disambiguate(path, &mut cx.used_paths);

        let (start_point, start_byte) = start;
        let end_point = node.end_position();

        // Summary and hash come from the node's own text; the emitted
        // source includes folded predecessors.
        let node_text = String::from_utf8_lossy(&cx.source[node.byte_range()]);
        let source = String::from_utf8_lossy(&cx.source[start_byte..node.end_byte()]).into_owned();

        cx.chunks.push(Chunk {
            file: cx.file.to_string(),
            chunk_type: cx.file_type,
            path: path.clone(),
            summary: summarize(&node_text),
            source,
            start_line: start_point.row as u32 + 1,
            start_column: start_point.column as u32 + 1,
            end_line: end_point.row as u32 + 1,
            end_column: end_point.column as u32 + 1,
            parsed_at: cx.parsed_at,
        });

        path
    }
}

fn compile_extractor(
    grammar: &tree_sitter::Language,
    extractor: &NamedChunkExtractor,
) -> Option<CompiledExtractor> {
    let name = Query::new(grammar, extractor.name_query).ok()?;
    let parent_name = match extractor.parent_name_query {
        Some(query) => Some(Query::new(grammar, query).ok()?),
        None => None,
    };

    Some(CompiledExtractor { name, parent_name })
}

/// Resolve collisions by suffixing `-2`, `-3`, ... in encounter order
fn disambiguate(path: String, used: &mut HashSet<String>) -> String {
    let final_path = if used.contains(&path) {
        let mut counter = 2;
        while used.contains(&format!("{path}-{counter}")) {
            counter += 1;
        }
        format!("{path}-{counter}")
    } else {
        path
    };

    used.insert(final_path.clone());
    final_path
}
