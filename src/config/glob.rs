//! Shell-style glob expansion for file-set entries.
//!
//! The pattern is matched one path component at a time against directory
//! listings, so `*`, `?` and `[...]` never cross a `/`. A `**` component
//! behaves like `*`: expansion does not recurse into subdirectories. Names
//! starting with `.` only match a component that itself starts with `.`.
//!
//! Braces and backslashes have no special meaning, and a `[` without a
//! closing `]` is an ordinary character. Expansion therefore never fails: a
//! pattern that matches nothing yields no paths.
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

/// Whether `component` contains glob metacharacters.
fn has_magic(component: &str) -> bool {
    component.contains(['*', '?', '['])
}

/// Rewrite a shell pattern into globset syntax.
///
/// Returns `None` when a character class is never closed.
fn translate(component: &str) -> Option<String> {
    let mut out = String::with_capacity(component.len() + 8);
    let mut chars = component.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                out.push('*');
                while chars.next_if_eq(&'*').is_some() {}
            }
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            '[' => {
                out.push('[');
                if let Some(bang) = chars.next_if(|&n| n == '!' || n == '^') {
                    out.push(bang);
                }
                if chars.next_if_eq(&']').is_some() {
                    out.push(']');
                }
                loop {
                    let inner = chars.next()?;
                    out.push(inner);
                    if inner == ']' {
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }

    Some(out)
}

/// How one pattern component is matched against directory entries.
#[derive(Debug)]
enum Matcher {
    Glob(GlobMatcher),
    /// The component is not a valid pattern and only matches itself.
    Literal(String),
}

impl Matcher {
    fn new(component: &str) -> Self {
        translate(component)
            .and_then(|pattern| {
                GlobBuilder::new(&pattern)
                    .literal_separator(true)
                    .backslash_escape(false)
                    .build()
                    .ok()
            })
            .map_or_else(
                || Self::Literal(component.to_string()),
                |glob| Self::Glob(glob.compile_matcher()),
            )
    }

    fn is_match(&self, name: &str) -> bool {
        match self {
            Self::Glob(matcher) => matcher.is_match(name),
            Self::Literal(literal) => literal == name,
        }
    }
}

/// Entries of `dir` whose names match `matcher`.
fn matching_children(dir: &Path, matcher: &Matcher, allow_hidden: bool) -> Vec<PathBuf> {
    let listing = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let Ok(entries) = fs::read_dir(listing) else {
        return Vec::new();
    };

    entries
        .filter_map(Result::ok)
        .map(|entry| entry.file_name())
        .filter(|name| {
            name.to_str().is_some_and(|name| {
                (allow_hidden || !name.starts_with('.')) && matcher.is_match(name)
            })
        })
        .map(|name| dir.join(name))
        .collect()
}

/// Expand `pattern` into the existing paths it matches, sorted by their
/// byte representation.
///
/// A pattern without metacharacters expands to itself if it exists. Broken
/// symlinks never match.
#[must_use]
pub fn expand(pattern: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::new()];

    for component in pattern.components() {
        let raw: &OsStr = component.as_os_str();
        let Some(part) = raw.to_str().filter(|part| has_magic(part)) else {
            for candidate in &mut candidates {
                candidate.push(raw);
            }
            continue;
        };

        let matcher = Matcher::new(part);
        let allow_hidden = part.starts_with('.');
        candidates = candidates
            .iter()
            .flat_map(|dir| matching_children(dir, &matcher, allow_hidden))
            .collect();

        if candidates.is_empty() {
            break;
        }
    }

    candidates.retain(|path| !path.as_os_str().is_empty() && path.exists());
    candidates.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    candidates
}
