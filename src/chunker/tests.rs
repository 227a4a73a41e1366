use super::*;
use tempfile::TempDir;

fn write_file(dir: &TempDir, rel: &str, content: &str) {
    let path = dir.path().join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn chunk_map(file: &SourceFile) -> HashMap<String, Chunk> {
    file.chunks
        .iter()
        .map(|c| (c.path.clone(), c.clone()))
        .collect()
}

fn is_hash_path(path: &str) -> bool {
    !path.is_empty()
        && path.len() <= 16
        && path.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

const GO_FUNCTIONS: &str = r#"package testdata

import (
	"fmt"
)

// SimpleFunction demonstrates basic function parsing
func SimpleFunction(x int) string {
	return fmt.Sprintf("%d", x)
}

// DuplicateNameFunction - testing duplicate function names
func DuplicateNameFunction() string {
	return "duplicate name"
}

// DuplicateNameFunction (2)
func DuplicateNameFunction() string {
	return "duplicate name"
}

// DuplicateNameFunction (3)
func DuplicateNameFunction() string {
	return "duplicate name"
}

// A standalone comment
"#;

#[test]
fn test_go_function_parsing() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "go/functions.go", GO_FUNCTIONS);

    let chunker = Chunker::new(dir.path(), Language::Go).unwrap();
    let file = chunker.chunk("go/functions.go").unwrap();
    assert_eq!(file.chunks.len(), 6);

    let chunks = chunk_map(&file);

    let tests = [
        (
            "SimpleFunction",
            "func SimpleFunction(x int) string {",
            "// SimpleFunction demonstrates basic function parsing\nfunc SimpleFunction(x int) string {\n\treturn fmt.Sprintf(\"%d\", x)\n}",
            7,
            10,
        ),
        (
            "DuplicateNameFunction",
            "func DuplicateNameFunction() string {",
            "// DuplicateNameFunction - testing duplicate function names\nfunc DuplicateNameFunction() string {\n\treturn \"duplicate name\"\n}",
            12,
            15,
        ),
        (
            "DuplicateNameFunction-2",
            "func DuplicateNameFunction() string {",
            "// DuplicateNameFunction (2)\nfunc DuplicateNameFunction() string {\n\treturn \"duplicate name\"\n}",
            17,
            20,
        ),
        (
            "DuplicateNameFunction-3",
            "func DuplicateNameFunction() string {",
            "// DuplicateNameFunction (3)\nfunc DuplicateNameFunction() string {\n\treturn \"duplicate name\"\n}",
            22,
            25,
        ),
    ];

    for (path, summary, source, start_line, end_line) in tests {
        let chunk = chunks.get(path).unwrap_or_else(|| panic!("chunk {path} not found"));
        assert_eq!(chunk.chunk_type, FileType::Src);
        assert_eq!(chunk.summary, summary);
        assert_eq!(chunk.source, source);
        assert_eq!(chunk.start_line, start_line);
        assert_eq!(chunk.end_line, end_line);
        assert_eq!(chunk.id(), format!("go/functions.go::{path}"));
    }

    // The import block has no name and gets a content-hash address
    let import_chunk = file
        .chunks
        .iter()
        .find(|c| c.summary == "import (")
        .unwrap();
    assert!(is_hash_path(&import_chunk.path), "path {}", import_chunk.path);
    assert_eq!(import_chunk.path, content_hash(import_chunk.source.as_bytes()));
    assert_eq!(import_chunk.source, "import (\n\t\"fmt\"\n)");
    assert_eq!(import_chunk.start_line, 3);
    assert_eq!(import_chunk.end_line, 5);

    // A trailing comment has nothing to fold into
    let standalone = file
        .chunks
        .iter()
        .find(|c| c.source == "// A standalone comment")
        .unwrap();
    assert!(is_hash_path(&standalone.path));
    assert_eq!(standalone.summary, "// A standalone comment");
    assert_eq!(standalone.start_line, 27);
    assert_eq!(standalone.end_line, 27);
}

const GO_METHODS: &str = r#"package testdata

// User struct for testing method parsing
type User struct {
	Name string
}

// SetName is a pointer receiver method
func (u *User) SetName(name string) {
	u.Name = name
}

// GetName is a value receiver method
func (u User) GetName() string {
	return u.Name
}

// Generic repository
type Repository[T any] struct {
	items []T
}

// Add adds an item
func (r *Repository[T]) Add(item T) {
	r.items = append(r.items, item)
}

type ServiceA struct{}
type ServiceB struct{}

func (s ServiceA) Helper() string {
	return "service A helper"
}

func (s ServiceB) Helper() string {
	return "service B helper"
}
"#;

#[test]
fn test_go_method_parsing() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "go/methods.go", GO_METHODS);

    let chunker = Chunker::new(dir.path(), Language::Go).unwrap();
    let file = chunker.chunk("go/methods.go").unwrap();
    assert_eq!(file.chunks.len(), 9);

    let chunks = chunk_map(&file);

    let tests = [
        (
            "User::SetName",
            "func (u *User) SetName(name string) {",
            "// SetName is a pointer receiver method\nfunc (u *User) SetName(name string) {\n\tu.Name = name\n}",
            8,
            11,
        ),
        (
            "User::GetName",
            "func (u User) GetName() string {",
            "// GetName is a value receiver method\nfunc (u User) GetName() string {\n\treturn u.Name\n}",
            13,
            16,
        ),
        (
            "Repository::Add",
            "func (r *Repository[T]) Add(item T) {",
            "// Add adds an item\nfunc (r *Repository[T]) Add(item T) {\n\tr.items = append(r.items, item)\n}",
            23,
            26,
        ),
        (
            "ServiceA::Helper",
            "func (s ServiceA) Helper() string {",
            "func (s ServiceA) Helper() string {\n\treturn \"service A helper\"\n}",
            31,
            33,
        ),
        (
            "ServiceB::Helper",
            "func (s ServiceB) Helper() string {",
            "func (s ServiceB) Helper() string {\n\treturn \"service B helper\"\n}",
            35,
            37,
        ),
    ];

    for (path, summary, source, start_line, end_line) in tests {
        let chunk = chunks.get(path).unwrap_or_else(|| panic!("chunk {path} not found"));
        assert_eq!(chunk.chunk_type, FileType::Src);
        assert_eq!(chunk.summary, summary);
        assert_eq!(chunk.source, source);
        assert_eq!(chunk.start_line, start_line);
        assert_eq!(chunk.end_line, end_line);
        assert_eq!(chunk.id(), format!("go/methods.go::{path}"));
    }

    assert!(chunks.contains_key("User"));
    assert!(chunks.contains_key("Repository"));
    assert!(chunks.contains_key("ServiceA"));
    assert!(chunks.contains_key("ServiceB"));
}

const GO_TYPES: &str = r#"package testdata

// BasicStruct demonstrates struct type parsing
type BasicStruct struct {
	Field1 string
	Field2 int
}

// SimpleInterface demonstrates interface parsing
type SimpleInterface interface {
	Method1() string
}

// TypeAlias demonstrates type alias
type TypeAlias = string

// Single constant
const DefaultTimeout = 30

// Constants for testing const parsing
const (
	StatusActive   = "active"
	StatusInactive = "inactive"
)

// Single variable
var DefaultConfig = BasicStruct{
	Field1: "default",
}

// Variables for testing var parsing
var (
	GlobalCounter int
	SystemReady   bool
)
"#;

#[test]
fn test_go_type_parsing() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "go/types.go", GO_TYPES);

    let chunker = Chunker::new(dir.path(), Language::Go).unwrap();
    let file = chunker.chunk("go/types.go").unwrap();
    assert_eq!(file.chunks.len(), 7);

    let chunks = chunk_map(&file);

    let tests = [
        (
            "BasicStruct",
            "type BasicStruct struct {",
            "// BasicStruct demonstrates struct type parsing\ntype BasicStruct struct {\n\tField1 string\n\tField2 int\n}",
            3,
            7,
        ),
        (
            "SimpleInterface",
            "type SimpleInterface interface {",
            "// SimpleInterface demonstrates interface parsing\ntype SimpleInterface interface {\n\tMethod1() string\n}",
            9,
            12,
        ),
        (
            "TypeAlias",
            "type TypeAlias = string",
            "// TypeAlias demonstrates type alias\ntype TypeAlias = string",
            14,
            15,
        ),
        (
            "DefaultTimeout",
            "const DefaultTimeout = 30",
            "// Single constant\nconst DefaultTimeout = 30",
            17,
            18,
        ),
        (
            "DefaultConfig",
            "var DefaultConfig = BasicStruct{",
            "// Single variable\nvar DefaultConfig = BasicStruct{\n\tField1: \"default\",\n}",
            26,
            29,
        ),
    ];

    for (path, summary, source, start_line, end_line) in tests {
        let chunk = chunks.get(path).unwrap_or_else(|| panic!("chunk {path} not found"));
        assert_eq!(chunk.chunk_type, FileType::Src);
        assert_eq!(chunk.summary, summary);
        assert_eq!(chunk.source, source);
        assert_eq!(chunk.start_line, start_line);
        assert_eq!(chunk.end_line, end_line);
    }

    // Grouped const and var blocks have multiple names, so the name
    // query fails and they fall back to content hashes.
    let const_block = file.chunks.iter().find(|c| c.summary == "const (").unwrap();
    assert!(is_hash_path(&const_block.path));
    assert_eq!(const_block.start_line, 20);
    assert_eq!(const_block.end_line, 24);
    assert!(const_block.source.starts_with("// Constants for testing const parsing\nconst ("));

    let var_block = file.chunks.iter().find(|c| c.summary == "var (").unwrap();
    assert!(is_hash_path(&var_block.path));
    assert_eq!(var_block.start_line, 31);
    assert_eq!(var_block.end_line, 35);
}

#[test]
fn test_go_test_file_classification() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "pkg/api_test.go",
        "package pkg\n\n// TestSimple is a basic test function\nfunc TestSimple(t *testing.T) {\n\tt.Log(\"ok\")\n}\n",
    );

    let chunker = Chunker::new(dir.path(), Language::Go).unwrap();
    let file = chunker.chunk("pkg/api_test.go").unwrap();

    let chunks = chunk_map(&file);
    let chunk = chunks.get("TestSimple").unwrap();
    assert_eq!(chunk.chunk_type, FileType::Tests);
    assert_eq!(chunk.summary, "func TestSimple(t *testing.T) {");
    assert_eq!(chunk.id(), "pkg/api_test.go::TestSimple");
}

#[test]
fn test_testdata_classification() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "internal/testdata/fixture.go", "package testdata\n\nfunc Fixture() {}\n");

    let chunker = Chunker::new(dir.path(), Language::Go).unwrap();
    let file = chunker.chunk("internal/testdata/fixture.go").unwrap();
    assert!(file.chunks.iter().all(|c| c.chunk_type == FileType::Tests));
}

#[test]
fn test_ignored_file() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, ".git/hooks.go", "package hooks\n");

    let chunker = Chunker::new(dir.path(), Language::Go).unwrap();
    let err = chunker.chunk(".git/hooks.go").unwrap_err();
    assert!(matches!(err, ChunkError::IgnoredFile(_)));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let chunker = Chunker::new(dir.path(), Language::Go).unwrap();
    let err = chunker.chunk("nope.go").unwrap_err();
    assert!(matches!(err, ChunkError::Io(_)));
}

#[test]
fn test_rechunk_produces_identical_ids() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "go/functions.go", GO_FUNCTIONS);

    let chunker = Chunker::new(dir.path(), Language::Go).unwrap();
    let first = chunker.chunk("go/functions.go").unwrap();
    let second = chunker.chunk("go/functions.go").unwrap();

    let first_ids: Vec<String> = first.chunks.iter().map(|c| c.id()).collect();
    let second_ids: Vec<String> = second.chunks.iter().map(|c| c.id()).collect();
    assert_eq!(first_ids, second_ids);
}

#[test]
fn test_path_uniqueness_and_order() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "go/functions.go", GO_FUNCTIONS);

    let chunker = Chunker::new(dir.path(), Language::Go).unwrap();
    let file = chunker.chunk("go/functions.go").unwrap();

    let paths: HashSet<String> = file.chunks.iter().map(|c| c.path.clone()).collect();
    assert_eq!(paths.len(), file.chunks.len());

    let positions: Vec<(u32, u32)> = file
        .chunks
        .iter()
        .map(|c| (c.start_line, c.start_column))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

const PY_FUNCTIONS: &str = r#"# Simple function with no parameters
def simple_function():
    pass

# Property decorator example
@property
def decorated_function():
    return "decorated"

# Async function example
async def async_function():
    return "async"
"#;

#[test]
fn test_python_function_parsing() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "python/functions.py", PY_FUNCTIONS);

    let chunker = Chunker::new(dir.path(), Language::Python).unwrap();
    let file = chunker.chunk("python/functions.py").unwrap();
    assert_eq!(file.chunks.len(), 3);

    let chunks = chunk_map(&file);

    let tests = [
        (
            "simple_function",
            "def simple_function():",
            "# Simple function with no parameters\ndef simple_function():\n    pass",
            1,
            3,
        ),
        (
            "decorated_function",
            "def decorated_function():",
            "# Property decorator example\n@property\ndef decorated_function():\n    return \"decorated\"",
            5,
            8,
        ),
        (
            "async_function",
            "async def async_function():",
            "# Async function example\nasync def async_function():\n    return \"async\"",
            10,
            12,
        ),
    ];

    for (path, summary, source, start_line, end_line) in tests {
        let chunk = chunks.get(path).unwrap_or_else(|| panic!("chunk {path} not found"));
        assert_eq!(chunk.chunk_type, FileType::Src);
        assert_eq!(chunk.summary, summary);
        assert_eq!(chunk.source, source);
        assert_eq!(chunk.start_line, start_line);
        assert_eq!(chunk.end_line, end_line);
        assert_eq!(chunk.id(), format!("python/functions.py::{path}"));
    }
}

const PY_CLASSES: &str = r#""""Test file for Python classes."""

# Simple class with no methods
class SimpleClass:
    pass

class ClassWithMethods:
    value = -1

    # Constructor method
    def __init__(self):
        self.value = 0

    # Property method with decorator
    @property
    def property_method(self):
        return self.value * 2

# Decorated class using dataclass
@dataclass
class DecoratedClass:
    name: str
"#;

#[test]
fn test_python_class_parsing() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "python/classes.py", PY_CLASSES);

    let chunker = Chunker::new(dir.path(), Language::Python).unwrap();
    let file = chunker.chunk("python/classes.py").unwrap();

    let chunks = chunk_map(&file);
    assert_eq!(chunks.len(), file.chunks.len(), "paths must be unique");

    let tests = [
        (
            "SimpleClass",
            "class SimpleClass:",
            "# Simple class with no methods\nclass SimpleClass:\n    pass",
            3,
            5,
        ),
        (
            "ClassWithMethods::value",
            "value = -1",
            "value = -1",
            8,
            8,
        ),
        (
            "ClassWithMethods::__init__",
            "def __init__(self):",
            "# Constructor method\n    def __init__(self):\n        self.value = 0",
            10,
            12,
        ),
        (
            "ClassWithMethods::property_method",
            "def property_method(self):",
            "# Property method with decorator\n    @property\n    def property_method(self):\n        return self.value * 2",
            14,
            17,
        ),
        (
            "DecoratedClass",
            "class DecoratedClass:",
            "# Decorated class using dataclass\n@dataclass\nclass DecoratedClass:\n    name: str",
            19,
            22,
        ),
    ];

    for (path, summary, source, start_line, end_line) in tests {
        let chunk = chunks.get(path).unwrap_or_else(|| panic!("chunk {path} not found"));
        assert_eq!(chunk.chunk_type, FileType::Src);
        assert_eq!(chunk.summary, summary);
        assert_eq!(chunk.source, source);
        assert_eq!(chunk.start_line, start_line);
        assert_eq!(chunk.end_line, end_line);
    }

    // The enclosing class spans all of its members
    let class_chunk = chunks.get("ClassWithMethods").unwrap();
    assert_eq!(class_chunk.start_line, 7);
    assert_eq!(class_chunk.end_line, 17);
    assert!(class_chunk.source.contains("def property_method(self):"));

    // Module docstring is unnamed
    let docstring = file
        .chunks
        .iter()
        .find(|c| c.source == "\"\"\"Test file for Python classes.\"\"\"")
        .unwrap();
    assert!(is_hash_path(&docstring.path));
    assert_eq!(docstring.start_line, 1);
}

#[test]
fn test_python_tests_dir_classification() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "python/tests/test_module.py",
        "def test_simple_function():\n    assert True\n",
    );

    let chunker = Chunker::new(dir.path(), Language::Python).unwrap();
    let file = chunker.chunk("python/tests/test_module.py").unwrap();

    let chunks = chunk_map(&file);
    let chunk = chunks.get("test_simple_function").unwrap();
    assert_eq!(chunk.chunk_type, FileType::Tests);
    assert_eq!(chunk.id(), "python/tests/test_module.py::test_simple_function");
}

const TS_SOURCE: &str = r#"// Service wrapper
export class UserService {
  private users: string[] = [];

  // Adds a user
  addUser(name: string): void {
    this.users.push(name);
  }

  count(): number {
    return this.users.length;
  }
}

export interface Shape {
  area(): number;
}

export type UserId = string;

export const MAX_USERS = 100;

function helper() {
  return 42;
}
"#;

#[test]
fn test_typescript_parsing() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "src/service.ts", TS_SOURCE);

    let chunker = Chunker::new(dir.path(), Language::TypeScript).unwrap();
    let file = chunker.chunk("src/service.ts").unwrap();
    assert_eq!(file.chunks.len(), 8);

    let chunks = chunk_map(&file);

    // The leading comment and the export keyword both fold into the class
    let class_chunk = chunks.get("UserService").unwrap();
    assert_eq!(class_chunk.chunk_type, FileType::Src);
    assert_eq!(class_chunk.summary, "class UserService {");
    assert_eq!(class_chunk.start_line, 1);
    assert_eq!(class_chunk.end_line, 13);
    assert!(class_chunk.source.starts_with("// Service wrapper\nexport class UserService {"));

    let tests = [
        (
            "UserService::users",
            "private users: string[] = []",
            3,
            3,
        ),
        (
            "UserService::addUser",
            "addUser(name: string): void {",
            5,
            8,
        ),
        (
            "UserService::count",
            "count(): number {",
            10,
            12,
        ),
        ("Shape", "interface Shape {", 15, 17),
        ("UserId", "type UserId = string;", 19, 19),
        ("MAX_USERS", "const MAX_USERS = 100;", 21, 21),
        ("helper", "function helper() {", 23, 25),
    ];

    for (path, summary, start_line, end_line) in tests {
        let chunk = chunks.get(path).unwrap_or_else(|| panic!("chunk {path} not found"));
        assert_eq!(chunk.summary, summary);
        assert_eq!(chunk.start_line, start_line);
        assert_eq!(chunk.end_line, end_line);
        assert_eq!(chunk.id(), format!("src/service.ts::{path}"));
    }

    let add_user = chunks.get("UserService::addUser").unwrap();
    assert_eq!(
        add_user.source,
        "// Adds a user\n  addUser(name: string): void {\n    this.users.push(name);\n  }"
    );
}

#[test]
fn test_typescript_test_file_classification() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "src/service.test.ts",
        "function checkService() {\n  return true;\n}\n",
    );

    let chunker = Chunker::new(dir.path(), Language::TypeScript).unwrap();
    let file = chunker.chunk("src/service.test.ts").unwrap();
    assert!(file.chunks.iter().all(|c| c.chunk_type == FileType::Tests));
}

const JS_SOURCE: &str = r#"// App module
class App {
  run() {
    return true;
  }
}

const config = { debug: false };

function start() {
  return new App().run();
}
"#;

#[test]
fn test_javascript_parsing() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "lib/app.js", JS_SOURCE);

    let chunker = Chunker::new(dir.path(), Language::JavaScript).unwrap();
    let file = chunker.chunk("lib/app.js").unwrap();
    assert_eq!(file.chunks.len(), 4);

    let chunks = chunk_map(&file);

    let app = chunks.get("App").unwrap();
    assert_eq!(app.summary, "class App {");
    assert_eq!(app.start_line, 1);
    assert_eq!(app.end_line, 6);
    assert!(app.source.starts_with("// App module\nclass App {"));

    let run = chunks.get("App::run").unwrap();
    assert_eq!(run.source, "run() {\n    return true;\n  }");
    assert_eq!(run.start_line, 3);
    assert_eq!(run.end_line, 5);

    let config = chunks.get("config").unwrap();
    assert_eq!(config.source, "const config = { debug: false };");
    assert_eq!(config.start_line, 8);

    let start = chunks.get("start").unwrap();
    assert_eq!(start.start_line, 10);
    assert_eq!(start.end_line, 12);
}

const MD_SOURCE: &str = "# Title\n\nIntro paragraph.\n\n## Sub\n\nSub body.\n";

#[test]
fn test_markdown_section_parsing() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "guide.md", MD_SOURCE);

    let chunker = Chunker::new(dir.path(), Language::Markdown).unwrap();
    let file = chunker.chunk("guide.md").unwrap();
    assert_eq!(file.chunks.len(), 2);

    let outer = &file.chunks[0];
    let inner = &file.chunks[1];

    // Sections are classified docs and addressed by content hash
    for chunk in [outer, inner] {
        assert_eq!(chunk.chunk_type, FileType::Docs);
        assert!(is_hash_path(&chunk.path), "path {}", chunk.path);
        assert_eq!(chunk.path, content_hash(chunk.source.as_bytes()));
    }
    assert_ne!(outer.path, inner.path);

    // The H1 section contains the nested H2 section
    assert_eq!(outer.source, MD_SOURCE);
    assert_eq!(outer.start_line, 1);
    assert_eq!(inner.source, "## Sub\n\nSub body.\n");
    assert_eq!(inner.start_line, 5);
    assert!(outer.source.contains(&inner.source));
}

#[test]
fn test_markdown_hash_determinism() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "a.md", MD_SOURCE);
    write_file(&dir, "b.md", MD_SOURCE);

    let chunker = Chunker::new(dir.path(), Language::Markdown).unwrap();
    let a = chunker.chunk("a.md").unwrap();
    let b = chunker.chunk("b.md").unwrap();

    let a_paths: Vec<&str> = a.chunks.iter().map(|c| c.path.as_str()).collect();
    let b_paths: Vec<&str> = b.chunks.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(a_paths, b_paths, "identical content must hash identically");
}

#[test]
fn test_summarize_short_line() {
    assert_eq!(summarize("func main() {\n\treturn\n}"), "func main() {");
    assert_eq!(summarize("  \n  trimmed line  \n"), "trimmed line");
    assert_eq!(summarize(""), "");
}

#[test]
fn test_summarize_truncates_at_next_space() {
    // 80 chars, then a space later in the line
    let line = format!("{} tail words here", "x".repeat(85));
    let summary = summarize(&line);
    assert_eq!(summary, format!("{}...", "x".repeat(85)));
}

#[test]
fn test_summarize_hard_truncates_without_space() {
    let line = "y".repeat(100);
    let summary = summarize(&line);
    assert_eq!(summary, format!("{}...", "y".repeat(80)));
}

#[test]
fn test_summarize_exactly_80_chars() {
    let line = "z".repeat(80);
    assert_eq!(summarize(&line), line);
}

#[test]
fn test_summarize_idempotent_when_short() {
    let s = "const answer = 42;";
    assert_eq!(summarize(&summarize(s)), summarize(s));
}

#[test]
fn test_content_hash_format() {
    let hash = content_hash(b"import (\n\t\"fmt\"\n)");
    assert!(is_hash_path(&hash));
    assert_eq!(hash, content_hash(b"import (\n\t\"fmt\"\n)"));
    assert_ne!(hash, content_hash(b"something else"));
}

#[test]
fn test_disambiguate_suffixes() {
    let mut used = HashSet::new();
    assert_eq!(disambiguate("Foo".to_string(), &mut used), "Foo");
    assert_eq!(disambiguate("Foo".to_string(), &mut used), "Foo-2");
    assert_eq!(disambiguate("Foo".to_string(), &mut used), "Foo-3");
    assert_eq!(disambiguate("Bar".to_string(), &mut used), "Bar");
}

#[test]
fn test_file_type_round_trip() {
    for file_type in [FileType::Src, FileType::Tests, FileType::Docs, FileType::Ignore] {
        assert_eq!(FileType::parse(file_type.as_str()), Some(file_type));
    }
    assert_eq!(FileType::parse("other"), None);
}
