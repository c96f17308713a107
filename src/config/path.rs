//! Dotted-path lookup into the configuration tree.

use crate::value::{Mapping, Value};

/// Look up `path` (e.g. `"server.port"`) starting at `root`.
///
/// Every segment but the last must name a mapping; a missing segment or a
/// non-mapping on the way yields `None`. The last segment returns whatever is
/// stored there, including a nested mapping.
pub fn lookup<'a>(root: &'a Mapping, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = current.as_mapping()?.get(segment)?;
    }
    Some(current)
}
