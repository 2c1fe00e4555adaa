//! `$`-placeholder substitution against a flat key/value document.
//!
//! Syntax:
//!
//! - `$$` is an escaped `$`
//! - `$name` and `${name}` are placeholders, `name` matching
//!   `[_A-Za-z][_A-Za-z0-9]*`
//!
//! Unknown names and any other `$` are left exactly as written, so a
//! template never fails to render.
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::SubstitutionError;

/// Substitution values keyed by placeholder name.
pub type Vars = BTreeMap<String, String>;

/// Load a substitution source document.
///
/// The document must be a YAML mapping. String values are used verbatim,
/// numbers by their textual form and booleans as `True`/`False`. Null, sequence and mapping
/// values (and non-string keys) are ignored, so their placeholders stay
/// untouched. An empty document yields no values.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a YAML mapping.
pub fn load_vars(path: &Path) -> Result<Vars, SubstitutionError> {
    let content = std::fs::read_to_string(path).map_err(|source| SubstitutionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Vars::new());
    }
    let mapping: Option<serde_yaml::Mapping> =
        serde_yaml::from_str(&content).map_err(|source| SubstitutionError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(mapping
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| {
            let key = key.as_str()?.to_string();
            let value = match value {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(true) => "True".to_string(),
                serde_yaml::Value::Bool(false) => "False".to_string(),
                _ => return None,
            };
            Some((key, value))
        })
        .collect())
}

/// Split a leading placeholder name off `s`.
fn split_identifier(s: &str) -> Option<(&str, &str)> {
    let first = s.chars().next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    let len = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    Some(s.split_at(len))
}

/// Replace every known placeholder in `template`.
#[must_use]
pub fn substitute(template: &str, vars: &Vars) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((head, after)) = rest.split_once('$') {
        out.push_str(head);

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
            continue;
        }

        if let Some(inner) = after.strip_prefix('{')
            && let Some((name, tail)) = split_identifier(inner)
            && let Some(tail) = tail.strip_prefix('}')
        {
            match vars.get(name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str("${");
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = tail;
            continue;
        }

        if let Some((name, tail)) = split_identifier(after) {
            match vars.get(name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('$');
                    out.push_str(name);
                }
            }
            rest = tail;
            continue;
        }

        out.push('$');
        rest = after;
    }

    out.push_str(rest);
    out
}
