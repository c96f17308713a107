//! `${NAME:default}` placeholder resolution.
//!
//! A string value may redirect to an environment variable:
//! - `${NAME}` - the variable's value, or null when unset/empty (the string
//!   accessor returns the placeholder text instead)
//! - `${NAME:default}` - the variable's value, or `default` (possibly empty)
//!
//! Only the first placeholder in a string is recognized and any text around
//! it is dropped. Strings without a placeholder are returned as-is by the raw
//! accessor and trimmed by the string accessor.

use crate::value::Value;
use regex_lite::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// First `${...}` occurrence, non-greedy.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(.*?)\}").expect("placeholder pattern compiles"));

/// Read-only view of an environment.
pub trait EnvLookup: Send + Sync {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// A parsed placeholder expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Environment variable name.
    pub name: &'a str,
    /// Text after the first `:`, if there was one.
    pub fallback: Option<&'a str>,
}

impl<'a> Placeholder<'a> {
    /// Find the first placeholder in `text`.
    pub fn parse(text: &'a str) -> Option<Self> {
        let body = PLACEHOLDER.captures(text)?.get(1)?.as_str();
        let (name, fallback) = match body.split_once(':') {
            Some((name, fallback)) => (name, Some(fallback)),
            None => (body, None),
        };
        Some(Self { name, fallback })
    }

    /// Evaluate against `env`. A set but empty variable counts as unset.
    pub fn evaluate(&self, env: &dyn EnvLookup) -> Option<String> {
        match env.lookup(self.name) {
            Some(value) if !value.is_empty() => Some(value),
            _ => self.fallback.map(str::to_string),
        }
    }
}

/// Outcome of resolving a single string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Not a placeholder; the original text.
    Literal(String),
    /// Placeholder that produced a value.
    Substituted(String),
    /// Placeholder with no variable value and no fallback.
    Unset { name: String },
}

/// Resolve one string without trimming.
pub fn resolve_str(text: &str, env: &dyn EnvLookup) -> Resolved {
    match Placeholder::parse(text) {
        Some(placeholder) => match placeholder.evaluate(env) {
            Some(value) => Resolved::Substituted(value),
            None => Resolved::Unset {
                name: placeholder.name.to_string(),
            },
        },
        None => Resolved::Literal(text.to_string()),
    }
}

/// Raw accessor semantics: non-strings pass through, literals are untouched,
/// unresolved placeholders become `None`.
pub fn resolve(value: Value, env: &dyn EnvLookup) -> Option<Value> {
    match value {
        Value::String(text) => match resolve_str(&text, env) {
            Resolved::Literal(_) => Some(Value::String(text)),
            Resolved::Substituted(value) => Some(Value::String(value)),
            Resolved::Unset { .. } => None,
        },
        other => Some(other),
    }
}

/// String accessor semantics: substituted values as-is, everything else trimmed.
///
/// A placeholder with no variable value and no fallback yields its own text.
pub fn resolve_trimmed(text: &str, env: &dyn EnvLookup) -> String {
    match resolve_str(text, env) {
        Resolved::Substituted(value) => value,
        Resolved::Literal(_) | Resolved::Unset { .. } => text.trim().to_string(),
    }
}

/// Resolve every string in a subtree. Unresolved placeholders become null.
pub fn resolve_deep(value: &Value, env: &dyn EnvLookup) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(key, value)| (key.clone(), resolve_deep(value, env)))
                .collect(),
        ),
        Value::Sequence(items) => {
            Value::Sequence(items.iter().map(|item| resolve_deep(item, env)).collect())
        }
        other => resolve(other.clone(), env).unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let p = Placeholder::parse("${SERVER_PORT::80}").unwrap();
        assert_eq!(p.name, "SERVER_PORT");
        assert_eq!(p.fallback, Some(":80"));

        let p = Placeholder::parse("${URL:http://localhost:8080}").unwrap();
        assert_eq!(p.name, "URL");
        assert_eq!(p.fallback, Some("http://localhost:8080"));
    }

    #[test]
    fn test_parse_without_colon_has_no_fallback() {
        let p = Placeholder::parse("${HOME}").unwrap();
        assert_eq!(p.name, "HOME");
        assert_eq!(p.fallback, None);
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        assert!(Placeholder::parse("plain").is_none());
        assert!(Placeholder::parse("$HOME").is_none());
        assert!(Placeholder::parse("${unterminated").is_none());
    }

    #[test]
    fn test_env_value_wins_over_fallback() {
        let env = env(&[("SERVICE_NAME", "billing")]);
        assert_eq!(
            resolve_str("${SERVICE_NAME:app}", &env),
            Resolved::Substituted("billing".into())
        );
    }

    #[test]
    fn test_unset_uses_fallback() {
        let env = env(&[]);
        assert_eq!(
            resolve_str("${SERVICE_NAME:app}", &env),
            Resolved::Substituted("app".into())
        );
    }

    #[test]
    fn test_empty_fallback_is_kept() {
        let env = env(&[]);
        assert_eq!(resolve_str("${TOKEN:}", &env), Resolved::Substituted(String::new()));
    }

    #[test]
    fn test_empty_env_value_counts_as_unset() {
        let env = env(&[("PROD", "")]);
        assert_eq!(
            resolve_str("${PROD:false}", &env),
            Resolved::Substituted("false".into())
        );
        assert_eq!(
            resolve_str("${PROD}", &env),
            Resolved::Unset {
                name: "PROD".into()
            }
        );
    }

    #[test]
    fn test_unset_without_fallback_resolves_to_none() {
        let env = env(&[]);
        assert_eq!(resolve(Value::from("${MISSING}"), &env), None);
    }

    #[test]
    fn test_unset_without_fallback_keeps_text_on_string_accessor() {
        let env = env(&[("EMPTY", "")]);
        assert_eq!(resolve_trimmed("${MISSING}", &env), "${MISSING}");
        assert_eq!(resolve_trimmed("  ${MISSING}  ", &env), "${MISSING}");
        assert_eq!(resolve_trimmed("${EMPTY}", &env), "${EMPTY}");
    }

    #[test]
    fn test_first_placeholder_wins_and_surroundings_drop() {
        let env = env(&[("A", "one"), ("B", "two")]);
        assert_eq!(
            resolve_str("http://${A}:${B}/path", &env),
            Resolved::Substituted("one".into())
        );
    }

    #[test]
    fn test_non_strings_pass_through() {
        let env = env(&[]);
        assert_eq!(resolve(Value::Integer(5), &env), Some(Value::Integer(5)));
        assert_eq!(resolve(Value::Null, &env), Some(Value::Null));
    }

    #[test]
    fn test_trimming_is_only_on_string_accessor() {
        let env = env(&[]);
        assert_eq!(
            resolve(Value::from("  padded  "), &env),
            Some(Value::from("  padded  "))
        );
        assert_eq!(resolve_trimmed("  padded  ", &env), "padded");
    }

    #[test]
    fn test_substituted_values_are_not_trimmed() {
        let env = env(&[("PADDED", " x ")]);
        assert_eq!(resolve_trimmed("${PADDED}", &env), " x ");
    }

    #[test]
    fn test_resolve_deep_walks_containers() {
        let env = env(&[("HOST", "db.internal")]);
        let mut inner = crate::value::Mapping::new();
        inner.insert("host".into(), Value::from("${HOST:localhost}"));
        inner.insert("password".into(), Value::from("${DB_PASSWORD}"));
        inner.insert(
            "replicas".into(),
            Value::Sequence(vec![Value::from("${REPLICA:r1}"), Value::Integer(2)]),
        );

        let resolved = resolve_deep(&Value::Mapping(inner), &env);
        let map = resolved.as_mapping().unwrap();
        assert_eq!(map["host"], Value::from("db.internal"));
        assert!(map["password"].is_null());
        assert_eq!(
            map["replicas"],
            Value::Sequence(vec![Value::from("r1"), Value::Integer(2)])
        );
    }
}
