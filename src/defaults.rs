//! Site-wide front-matter defaults. A default set pairs a scope (a path prefix
//! and an optional page type) with a mapping of values; pages that fall within
//! the scope inherit those values for any key they don't set themselves.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

/// Answers "what is the default value of `key` for the page at
/// `relative_path` of type `scope_type`?". Returns `None` when no default
/// applies.
pub trait DefaultsResolver: Send + Sync {
    fn resolve(&self, relative_path: &str, scope_type: &str, key: &str) -> Option<Value>;
}

/// The scope of a [`DefaultSet`]. Both fields are optional; an empty scope
/// applies to every page.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Scope {
    /// Path prefix, relative to the site source, under which the set applies.
    #[serde(default)]
    pub path: String,

    /// Page type the set is restricted to (e.g., `posts` or `categories`).
    #[serde(default, rename = "type")]
    pub scope_type: Option<String>,
}

/// One entry in the `defaults` list of the site configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DefaultSet {
    #[serde(default)]
    pub scope: Scope,

    #[serde(default)]
    pub values: Mapping,
}

/// The configured front-matter defaults of a site, in declaration order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FrontmatterDefaults {
    sets: Vec<DefaultSet>,
}

impl FrontmatterDefaults {
    pub fn new(sets: Vec<DefaultSet>) -> FrontmatterDefaults {
        FrontmatterDefaults { sets }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Finds the value for `key` among the sets whose scope matches. When
    /// several sets define the key, the most specific scope wins: a longer
    /// path beats a shorter one, and at equal length a typed scope beats an
    /// untyped one. Remaining ties go to the set declared last.
    ///
    /// Scope paths differ from Jekyll's on purpose: they match whole path
    /// segments rather than any string prefix (`tag` covers `tag/x.html` but
    /// not `tags/x.html`), and globs are not expanded.
    pub fn find(&self, relative_path: &str, scope_type: &str, key: &str) -> Option<&Value> {
        let key = Value::String(key.to_owned());
        let mut found: Option<(&Scope, &Value)> = None;
        for set in &self.sets {
            if !applies_path(&set.scope, relative_path) || !applies_type(&set.scope, scope_type) {
                continue;
            }
            if let Some(value) = set.values.get(&key) {
                let wins = match found {
                    None => true,
                    Some((old, _)) => has_precedence(old, &set.scope),
                };
                if wins {
                    found = Some((&set.scope, value));
                }
            }
        }
        found.map(|(_, value)| value)
    }
}

impl DefaultsResolver for FrontmatterDefaults {
    fn resolve(&self, relative_path: &str, scope_type: &str, key: &str) -> Option<Value> {
        self.find(relative_path, scope_type, key).cloned()
    }
}

fn scope_path(scope: &Scope) -> &str {
    let path = scope.path.trim_start_matches("./");
    path.trim_matches('/')
}

// A scope path applies to itself and to anything nested beneath it, but not
// to siblings that merely share a prefix (`tag` covers `tag/x.html`, not
// `tags/x.html`).
fn applies_path(scope: &Scope, relative_path: &str) -> bool {
    let scope_path = scope_path(scope);
    if scope_path.is_empty() {
        return true;
    }
    let relative_path = relative_path.trim_start_matches('/');
    match relative_path.strip_prefix(scope_path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn applies_type(scope: &Scope, scope_type: &str) -> bool {
    match &scope.scope_type {
        None => true,
        Some(t) => t == scope_type,
    }
}

fn has_precedence(old: &Scope, new: &Scope) -> bool {
    let (old_len, new_len) = (scope_path(old).len(), scope_path(new).len());
    if old_len != new_len {
        new_len >= old_len
    } else if new.scope_type.is_some() {
        true
    } else {
        old.scope_type.is_none()
    }
}
