//! Single pass syntax highlighter for the text viewer.
//!
//! Each line is scanned once, left to right, and split into [HighlightSpan]s tagged with a
//! [TokenKind]. Nothing is carried over between lines: block comments and multi-line strings
//! are not tracked, line comments and strings simply run to the end of the line.
//!
//! Language rules live in an immutable table built at compile time with `phf`, looked up by
//! language id ([rules_for]) which in turn is resolved from a file extension
//! ([language_for_path]).

use phf::phf_map;
use std::path::Path;

/// Style category of a highlighted span.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Comment,
    String,
    Keyword,
    Number,
    Call,
    Operator,
    Variable,
}

/// A contiguous slice of the input line tagged with its style category.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HighlightSpan<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

impl<'a> HighlightSpan<'a> {
    #[inline]
    fn new(text: &'a str, kind: TokenKind) -> Self {
        Self { text, kind }
    }
}

/// Keyword, comment and string rules of one language.
#[derive(Debug)]
pub struct LanguageRules {
    pub name: &'static str,
    /// Checked in order, first match wins.
    pub keywords: &'static [&'static str],
    /// Markers that turn the rest of the line into a comment.
    pub line_comments: &'static [&'static str],
    /// String delimiters, checked in order.
    pub strings: &'static [&'static str],
    pub case_insensitive: bool,
    /// Prefix characters that start a variable reference besides `$`.
    pub extra_sigils: &'static [u8],
}

/// Single byte operators and punctuation.
const OPERATORS: &[u8] = b"{}[]()=<>+-*/%&|!^~:;,.";

/// Universal variable sigil.
const SIGIL: u8 = b'$';

static PHP: LanguageRules = LanguageRules {
    name: "php",
    keywords: &[
        "function", "class", "public", "private", "protected", "static", "const", "new",
        "return", "if", "else", "elseif", "while", "for", "foreach", "switch", "case", "break",
        "continue", "try", "catch", "throw", "finally", "use", "namespace", "extends",
        "implements", "interface", "trait", "abstract", "final", "echo", "print", "require",
        "include", "require_once", "include_once", "array", "true", "false", "null", "self",
        "parent", "this",
    ],
    line_comments: &["//", "#"],
    strings: &["\"", "'"],
    case_insensitive: false,
    extra_sigils: &[],
};

static PYTHON: LanguageRules = LanguageRules {
    name: "python",
    keywords: &[
        "def", "class", "import", "from", "as", "return", "if", "elif", "else", "while", "for",
        "in", "try", "except", "finally", "raise", "with", "lambda", "yield", "global",
        "nonlocal", "pass", "break", "continue", "True", "False", "None", "and", "or", "not",
        "is", "async", "await", "self",
    ],
    line_comments: &["#"],
    strings: &["\"", "'", "\"\"\"", "'''"],
    case_insensitive: false,
    extra_sigils: &[],
};

static JAVASCRIPT: LanguageRules = LanguageRules {
    name: "javascript",
    keywords: &[
        "function", "const", "let", "var", "class", "extends", "new", "return", "if", "else",
        "while", "for", "switch", "case", "break", "continue", "try", "catch", "throw",
        "finally", "async", "await", "import", "export", "default", "from", "true", "false",
        "null", "undefined", "this", "super", "typeof", "instanceof", "of", "in",
    ],
    line_comments: &["//"],
    strings: &["\"", "'", "`"],
    case_insensitive: false,
    extra_sigils: &[],
};

static RUBY: LanguageRules = LanguageRules {
    name: "ruby",
    keywords: &[
        "def", "class", "module", "end", "if", "elsif", "else", "unless", "while", "until",
        "for", "do", "begin", "rescue", "ensure", "raise", "return", "yield", "require",
        "include", "extend", "attr_accessor", "attr_reader", "attr_writer", "true", "false",
        "nil", "self", "super", "and", "or", "not", "lambda", "proc",
    ],
    line_comments: &["#"],
    strings: &["\"", "'"],
    case_insensitive: false,
    extra_sigils: b"@",
};

static GO: LanguageRules = LanguageRules {
    name: "go",
    keywords: &[
        "func", "package", "import", "type", "struct", "interface", "const", "var", "return",
        "if", "else", "for", "range", "switch", "case", "default", "break", "continue", "go",
        "defer", "select", "chan", "map", "make", "new", "true", "false", "nil", "iota",
    ],
    line_comments: &["//"],
    strings: &["\"", "'", "`"],
    case_insensitive: false,
    extra_sigils: &[],
};

static RUST: LanguageRules = LanguageRules {
    name: "rust",
    keywords: &[
        "fn", "let", "mut", "const", "struct", "enum", "impl", "trait", "pub", "mod", "use",
        "return", "if", "else", "match", "while", "for", "loop", "break", "continue", "async",
        "await", "move", "ref", "self", "Self", "super", "true", "false", "Some", "None", "Ok",
        "Err", "where", "unsafe", "extern", "crate",
    ],
    line_comments: &["//"],
    strings: &["\""],
    case_insensitive: false,
    extra_sigils: &[],
};

static C: LanguageRules = LanguageRules {
    name: "c",
    keywords: &[
        "int", "char", "float", "double", "void", "long", "short", "unsigned", "signed",
        "const", "static", "extern", "struct", "union", "enum", "typedef", "sizeof", "return",
        "if", "else", "while", "for", "do", "switch", "case", "default", "break", "continue",
        "goto", "include", "define", "ifdef", "ifndef", "endif", "NULL", "true", "false",
    ],
    line_comments: &["//"],
    strings: &["\"", "'"],
    case_insensitive: false,
    extra_sigils: &[],
};

static BASH: LanguageRules = LanguageRules {
    name: "bash",
    keywords: &[
        "if", "then", "else", "elif", "fi", "for", "while", "do", "done", "case", "esac",
        "function", "return", "exit", "echo", "read", "local", "export", "source", "alias",
        "unalias", "set", "unset", "shift", "true", "false", "in",
    ],
    line_comments: &["#"],
    strings: &["\"", "'"],
    case_insensitive: false,
    extra_sigils: &[],
};

static SQL: LanguageRules = LanguageRules {
    name: "sql",
    keywords: &[
        "SELECT", "FROM", "WHERE", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER",
        "TABLE", "INDEX", "VIEW", "INTO", "VALUES", "SET", "JOIN", "LEFT", "RIGHT", "INNER",
        "OUTER", "ON", "AND", "OR", "NOT", "NULL", "IS", "IN", "LIKE", "ORDER", "BY", "GROUP",
        "HAVING", "LIMIT", "OFFSET", "AS", "DISTINCT", "COUNT", "SUM", "AVG", "MAX", "MIN",
        "TRUE", "FALSE",
    ],
    line_comments: &["--"],
    strings: &["'"],
    case_insensitive: true,
    extra_sigils: &[],
};

/// Language id to rule set.
static RULES: phf::Map<&'static str, &'static LanguageRules> = phf_map! {
    "php" => &PHP,
    "python" => &PYTHON,
    "javascript" => &JAVASCRIPT,
    "ruby" => &RUBY,
    "go" => &GO,
    "rust" => &RUST,
    "c" => &C,
    "bash" => &BASH,
    "sql" => &SQL,
};

/// Lowercase file extension to language id.
static EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "php" => "php",
    "py" => "python",
    "js" => "javascript",
    "jsx" => "javascript",
    "ts" => "javascript",
    "tsx" => "javascript",
    "rb" => "ruby",
    "go" => "go",
    "rs" => "rust",
    "c" => "c",
    "h" => "c",
    "cpp" => "c",
    "hpp" => "c",
    "cc" => "c",
    "sh" => "bash",
    "bash" => "bash",
    "zsh" => "bash",
    "sql" => "sql",
    "mysql" => "sql",
};

/// Looks up the rule set of a language id.
pub fn rules_for(language: &str) -> Option<&'static LanguageRules> {
    RULES.get(language).copied()
}

/// Resolves the language id of a file from its extension.
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    EXTENSIONS.get(ext.as_str()).copied()
}

/// Highlights one line.
///
/// Without rules the line comes back as a single plain span. Empty lines yield no spans.
pub fn highlight<'a>(line: &'a str, rules: Option<&LanguageRules>) -> Vec<HighlightSpan<'a>> {
    match rules {
        Some(rules) => Tokens::new(line, rules).collect(),
        None if line.is_empty() => Vec::new(),
        None => vec![HighlightSpan::new(line, TokenKind::Plain)],
    }
}

/// Lazy span iterator over a single line.
#[derive(Debug)]
pub struct Tokens<'a, 'r> {
    line: &'a str,
    rules: &'r LanguageRules,
    pos: usize,
}

impl<'a, 'r> Tokens<'a, 'r> {
    pub fn new(line: &'a str, rules: &'r LanguageRules) -> Self {
        Self {
            line,
            rules,
            pos: 0,
        }
    }

    #[inline]
    fn byte_at(&self, idx: usize) -> Option<u8> {
        self.line.as_bytes().get(idx).copied()
    }

    fn is_sigil(&self, b: u8) -> bool {
        b == SIGIL || self.rules.extra_sigils.contains(&b)
    }

    fn emit(&mut self, end: usize, kind: TokenKind) -> HighlightSpan<'a> {
        let span = HighlightSpan::new(&self.line[self.pos..end], kind);
        self.pos = end;
        span
    }

    /// Consumes alphanumerics and underscores from `start`, returning the end offset.
    fn word_end(&self, start: usize) -> usize {
        let bytes = self.line.as_bytes();
        let mut end = start;
        while end < bytes.len() && is_ident(bytes[end]) {
            end += 1;
        }
        end
    }

    fn match_line_comment(&self, rest: &str) -> bool {
        self.rules
            .line_comments
            .iter()
            .any(|marker| rest.starts_with(marker))
    }

    /// Returns the end offset of a string opened at the current position, if any.
    /// An unterminated string runs to the end of the line.
    fn match_string(&self, rest: &str) -> Option<usize> {
        let delim = self.rules.strings.iter().find(|d| rest.starts_with(*d))?;
        let body = &rest[delim.len()..];
        let end = match body.find(delim) {
            Some(idx) => self.pos + delim.len() + idx + delim.len(),
            None => self.line.len(),
        };
        Some(end)
    }

    fn match_keyword(&self) -> Option<usize> {
        let left_ok = match self.pos.checked_sub(1).and_then(|i| self.byte_at(i)) {
            Some(b) => !is_ident(b) && !self.is_sigil(b),
            None => true,
        };
        if !left_ok {
            return None;
        }

        for keyword in self.rules.keywords {
            let end = self.pos + keyword.len();
            let Some(candidate) = self.line.get(self.pos..end) else {
                continue;
            };

            let matches = if self.rules.case_insensitive {
                candidate.eq_ignore_ascii_case(keyword)
            } else {
                candidate == *keyword
            };

            if matches && self.byte_at(end).is_none_or(|b| !is_ident(b)) {
                return Some(end);
            }
        }
        None
    }

    fn match_number(&self, b: u8) -> Option<usize> {
        let starts = b.is_ascii_digit()
            || (b == b'.' && self.byte_at(self.pos + 1).is_some_and(|n| n.is_ascii_digit()));
        if !starts {
            return None;
        }

        let bytes = self.line.as_bytes();
        let mut end = self.pos;
        while end < bytes.len()
            && (bytes[end].is_ascii_hexdigit() || bytes[end] == b'.' || bytes[end] == b'x')
        {
            end += 1;
        }
        Some(end)
    }
}

impl<'a> Iterator for Tokens<'a, '_> {
    type Item = HighlightSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let b = self.byte_at(self.pos)?;
        let rest = &self.line[self.pos..];

        if self.match_line_comment(rest) {
            return Some(self.emit(self.line.len(), TokenKind::Comment));
        }

        if let Some(end) = self.match_string(rest) {
            return Some(self.emit(end, TokenKind::String));
        }

        if (b.is_ascii_alphabetic() || b == b'_' || b == SIGIL)
            && let Some(end) = self.match_keyword()
        {
            return Some(self.emit(end, TokenKind::Keyword));
        }

        if let Some(end) = self.match_number(b) {
            return Some(self.emit(end, TokenKind::Number));
        }

        if b.is_ascii_alphabetic() || b == b'_' {
            let end = self.word_end(self.pos);
            let kind = if self.byte_at(end) == Some(b'(') {
                TokenKind::Call
            } else {
                TokenKind::Plain
            };
            return Some(self.emit(end, kind));
        }

        if self.is_sigil(b) {
            let end = self.word_end(self.pos + 1);
            return Some(self.emit(end, TokenKind::Variable));
        }

        if OPERATORS.contains(&b) {
            return Some(self.emit(self.pos + 1, TokenKind::Operator));
        }

        let char_len = rest.chars().next().map_or(1, char::len_utf8);
        Some(self.emit(self.pos + char_len, TokenKind::Plain))
    }
}

#[inline]
fn is_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds<'a>(line: &'a str, lang: &str) -> Vec<(&'a str, TokenKind)> {
        highlight(line, rules_for(lang))
            .into_iter()
            .map(|s| (s.text, s.kind))
            .collect()
    }

    fn first_of(spans: &[(&str, TokenKind)], kind: TokenKind) -> Option<String> {
        spans
            .iter()
            .find(|(_, k)| *k == kind)
            .map(|(t, _)| t.to_string())
    }

    #[test]
    fn keyword_needs_trailing_boundary() {
        let spans = kinds("iffy(x)", "c");
        assert_eq!(first_of(&spans, TokenKind::Keyword), None);
        assert_eq!(spans[0], ("iffy", TokenKind::Call));

        let spans = kinds("if (x)", "c");
        assert_eq!(spans[0], ("if", TokenKind::Keyword));
    }

    #[test]
    fn keyword_needs_leading_boundary() {
        // the digit run stops at 'i', which is preceded by a digit
        let spans = kinds("3if", "c");
        assert_eq!(spans[0], ("3", TokenKind::Number));
        assert_eq!(spans[1], ("if", TokenKind::Plain));
    }

    #[test]
    fn comment_before_string() {
        let spans = kinds("// \"not a string\"", "c");
        assert_eq!(spans, vec![("// \"not a string\"", TokenKind::Comment)]);

        let spans = kinds("x = 1 # trailing", "python");
        assert_eq!(spans.last(), Some(&("# trailing", TokenKind::Comment)));
    }

    #[test]
    fn numbers_and_operators() {
        let spans = kinds("x = 0x1F + 3.14", "c");
        assert_eq!(
            spans,
            vec![
                ("x", TokenKind::Plain),
                (" ", TokenKind::Plain),
                ("=", TokenKind::Operator),
                (" ", TokenKind::Plain),
                ("0x1F", TokenKind::Number),
                (" ", TokenKind::Plain),
                ("+", TokenKind::Operator),
                (" ", TokenKind::Plain),
                ("3.14", TokenKind::Number),
            ]
        );
    }

    #[test]
    fn block_comment_markers_are_operators() {
        let spans = kinds("/* x */", "c");
        assert_eq!(spans[0], ("/", TokenKind::Operator));
        assert_eq!(spans[1], ("*", TokenKind::Operator));
    }

    #[test]
    fn leading_decimal_point() {
        let spans = kinds("a.5", "c");
        assert_eq!(spans[1], (".5", TokenKind::Number));

        let spans = kinds("a.b", "c");
        assert_eq!(spans[1], (".", TokenKind::Operator));
    }

    #[test]
    fn strings_close_on_same_delimiter() {
        let spans = kinds(r#"s = "it's" + 'x'"#, "python");
        assert!(spans.contains(&(r#""it's""#, TokenKind::String)));
        assert!(spans.contains(&("'x'", TokenKind::String)));
    }

    #[test]
    fn unterminated_string_runs_to_eol() {
        let spans = kinds("let s = \"open // not comment", "rust");
        assert_eq!(
            spans.last(),
            Some(&("\"open // not comment", TokenKind::String))
        );
    }

    #[test]
    fn sql_is_case_insensitive() {
        let spans = kinds("select * from users", "sql");
        assert_eq!(spans[0], ("select", TokenKind::Keyword));
        assert_eq!(first_of(&spans[1..], TokenKind::Keyword).as_deref(), Some("from"));

        let spans = kinds("select", "c");
        assert_eq!(spans[0], ("select", TokenKind::Plain));
    }

    #[test]
    fn first_keyword_in_order_wins() {
        // "include" is listed before "include_once", the boundary check rejects it
        let spans = kinds("include_once 'a.php';", "php");
        assert_eq!(spans[0], ("include_once", TokenKind::Keyword));
    }

    #[test]
    fn variables_and_sigils() {
        let spans = kinds("$this->name", "php");
        assert_eq!(spans[0], ("$this", TokenKind::Variable));

        let spans = kinds("@count += 1", "ruby");
        assert_eq!(spans[0], ("@count", TokenKind::Variable));

        let spans = kinds("@count", "python");
        assert_eq!(spans[0], ("@", TokenKind::Plain));

        let spans = kinds("echo $HOME", "bash");
        assert_eq!(spans[0], ("echo", TokenKind::Keyword));
        assert_eq!(spans[2], ("$HOME", TokenKind::Variable));
    }

    #[test]
    fn non_ascii_is_plain() {
        let spans = kinds("ä = \"ü\"", "python");
        assert_eq!(spans[0], ("ä", TokenKind::Plain));
        assert_eq!(spans.last(), Some(&("\"ü\"", TokenKind::String)));
    }

    #[test]
    fn no_rules_returns_input() {
        assert_eq!(
            highlight("fn main() {}", None),
            vec![HighlightSpan::new("fn main() {}", TokenKind::Plain)]
        );
        assert!(highlight("", None).is_empty());
        assert!(highlight("", rules_for("rust")).is_empty());
    }

    #[test]
    fn extension_lookup() {
        assert_eq!(language_for_path(Path::new("main.RS")), Some("rust"));
        assert_eq!(language_for_path(Path::new("a/b/app.tsx")), Some("javascript"));
        assert_eq!(language_for_path(Path::new("notes.txt")), None);
        assert_eq!(language_for_path(Path::new("Makefile")), None);
        assert!(rules_for("cobol").is_none());
        assert_eq!(rules_for("sql").map(|r| r.name), Some("sql"));
    }
}
