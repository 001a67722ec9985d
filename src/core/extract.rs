//! core::extract
//!
//! Lightweight pre-processing of source text for file dependencies.
//!
//! # Design
//!
//! This is not a parser. It recognizes two statement shapes with regular
//! expressions and returns their specifiers untouched:
//!
//! - **References**: `/// <reference path="..." />` directives
//! - **Imports**: `import ... from "..."`, `import "..."`,
//!   `export ... from "..."`, and `import x = require("...")`
//!
//! Comments are blanked before imports are scanned so commented-out imports
//! are not followed. Comments and string literals are recognized in a single
//! left-to-right pass, so a `/*` inside a `//` comment or a string does not
//! open a block comment. Triple-slash references are themselves line comments
//! and are scanned on the raw text.
//!
//! The [`ReferenceExtractor`] trait is the seam callers can replace with a
//! real language service.
//!
//! # Example
//!
//! ```
//! use tsproj::core::extract::{PreProcessor, ReferenceExtractor};
//!
//! let text = r#"
//! /// <reference path="typings/node.d.ts" />
//! import { helper } from "./helper";
//! import fs = require("fs");
//! "#;
//!
//! let info = PreProcessor.extract(text);
//! assert_eq!(info.referenced_files, vec!["typings/node.d.ts"]);
//! assert_eq!(info.imported_files, vec!["./helper", "fs"]);
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Specifiers found in one source file, in textual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReferences {
    /// Paths from triple-slash reference directives.
    pub referenced_files: Vec<String>,
    /// Module specifiers from import/export declarations.
    pub imported_files: Vec<String>,
}

/// Extracts static file dependencies from source text.
pub trait ReferenceExtractor: Send + Sync {
    /// Return the references and imports declared in `text`.
    fn extract(&self, text: &str) -> FileReferences;
}

/// The built-in regex pre-processor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreProcessor;

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*///[ \t]*<reference\s+path\s*=\s*["']([^"']+)["'][^>]*>"#)
        .expect("reference directive regex")
});

// Strings are matched only so that comment markers inside them are skipped.
static COMMENT_OR_STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)(?P<comment>//[^\n]*|/\*.*?\*/)|"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`(?:[^`\\]|\\.)*`"#,
    )
    .expect("comment and string regex")
});

// `[\w$*{},\s]` spans multi-line named import lists and `* as ns`.
static IMPORT_FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*(?:import|export)\s+(?:[\w$*{},\s]+?\s+from\s*)?["']([^"'\n]+)["']"#)
        .expect("import declaration regex")
});

static IMPORT_REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*(?:export\s+)?import\s+[\w$]+\s*=\s*require\s*\(\s*["']([^"'\n]+)["']\s*\)"#,
    )
    .expect("import require regex")
});

/// Remove comments, keeping their line breaks and every string literal.
fn strip_comments(text: &str) -> std::borrow::Cow<'_, str> {
    COMMENT_OR_STRING_RE.replace_all(text, |caps: &Captures| match caps.name("comment") {
        Some(comment) => comment.as_str().chars().filter(|&c| c == '\n').collect(),
        None => caps[0].to_string(),
    })
}

impl ReferenceExtractor for PreProcessor {
    fn extract(&self, text: &str) -> FileReferences {
        let referenced_files = REFERENCE_RE
            .captures_iter(text)
            .map(|c| c[1].to_string())
            .collect();

        let code = strip_comments(text);

        // Both import shapes are merged back into source order.
        let mut imports: Vec<(usize, String)> = IMPORT_FROM_RE
            .captures_iter(&code)
            .chain(IMPORT_REQUIRE_RE.captures_iter(&code))
            .filter_map(|c| c.get(1).map(|m| (m.start(), m.as_str().to_string())))
            .collect();
        imports.sort_by_key(|(offset, _)| *offset);

        FileReferences {
            referenced_files,
            imported_files: imports.into_iter().map(|(_, s)| s).collect(),
        }
    }
}
