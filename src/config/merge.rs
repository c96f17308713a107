//! Shallow merge of configuration documents.
//!
//! Later documents overwrite earlier ones key by key at the top level only.
//! A nested mapping in the overlay replaces the base mapping wholesale.

use crate::value::Mapping;

/// Merge `overlay` into `base`, with `overlay` taking precedence.
///
/// # Example
/// ```
/// use yamlenv::config::shallow_merge;
/// use yamlenv::value::{Mapping, Value};
///
/// let mut server = Mapping::new();
/// server.insert("host".into(), Value::from("localhost"));
/// server.insert("port".into(), Value::Integer(8080));
/// let mut base = Mapping::new();
/// base.insert("server".into(), Value::Mapping(server));
///
/// let mut patch = Mapping::new();
/// patch.insert("port".into(), Value::Integer(9000));
/// let mut overlay = Mapping::new();
/// overlay.insert("server".into(), Value::Mapping(patch));
///
/// shallow_merge(&mut base, overlay);
/// // `server.host` is gone: the whole `server` mapping was replaced.
/// let server = base["server"].as_mapping().unwrap();
/// assert!(server.get("host").is_none());
/// ```
pub fn shallow_merge(base: &mut Mapping, overlay: Mapping) {
    for (key, value) in overlay {
        base.insert(key, value);
    }
}

/// Merge multiple documents in order, with later documents taking precedence.
pub fn shallow_merge_all(documents: impl IntoIterator<Item = Mapping>) -> Mapping {
    documents.into_iter().fold(Mapping::new(), |mut acc, doc| {
        shallow_merge(&mut acc, doc);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn doc(yaml: &str) -> Mapping {
        crate::config::loader::parse_document("test", yaml.as_bytes()).unwrap()
    }

    #[test]
    fn test_merge_simple_objects() {
        let mut base = doc("a: 1\nb: 2\n");
        shallow_merge(&mut base, doc("b: 3\nc: 4\n"));
        assert_eq!(base, doc("a: 1\nb: 3\nc: 4\n"));
    }

    #[test]
    fn test_nested_objects_replaced_not_merged() {
        let mut base = doc("server:\n  host: localhost\n  port: 8080\ndebug: true\n");
        shallow_merge(&mut base, doc("server:\n  port: 9000\n"));
        assert_eq!(base, doc("server:\n  port: 9000\ndebug: true\n"));
    }

    #[test]
    fn test_null_overlay_replaces_base() {
        let mut base = doc("a: 1\n");
        shallow_merge(&mut base, doc("a: ~\n"));
        assert_eq!(base["a"], Value::Null);
    }

    #[test]
    fn test_merge_all() {
        let result = shallow_merge_all(vec![doc("a: 1\n"), doc("b: 2\n"), doc("a: 3\nc: 4\n")]);
        assert_eq!(result, doc("a: 3\nb: 2\nc: 4\n"));
    }

    #[test]
    fn test_overlay_replaces_primitive_with_object() {
        let mut base = doc("value: 42\n");
        shallow_merge(&mut base, doc("value:\n  nested: true\n"));
        assert_eq!(base, doc("value:\n  nested: true\n"));
    }
}
