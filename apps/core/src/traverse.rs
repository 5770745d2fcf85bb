//! Breadth-first first-match search over loosely structured documents.

use std::borrow::Cow;
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use serde_json::Value;

/// A node that [`pick_deep`] can walk.
///
/// Containers (objects and arrays) report their children in declaration
/// order; scalars report `None` and are never descended into.
pub trait Traversable {
    type Id: Eq + Hash;

    /// Identity of the node itself, not of its contents. Two structurally
    /// equal nodes at different addresses must report different ids.
    fn node_id(&self) -> Self::Id;

    fn children(&self) -> Option<Vec<(Cow<'_, str>, &Self)>>;

    fn is_container(&self) -> bool {
        self.children().is_some()
    }
}

impl Traversable for Value {
    type Id = usize;

    fn node_id(&self) -> usize {
        std::ptr::from_ref(self) as usize
    }

    fn children(&self) -> Option<Vec<(Cow<'_, str>, &Self)>> {
        match self {
            Self::Object(map) => Some(
                map.iter()
                    .map(|(key, value)| (Cow::Borrowed(key.as_str()), value))
                    .collect(),
            ),
            Self::Array(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (Cow::Owned(index.to_string()), value))
                    .collect(),
            ),
            _ => None,
        }
    }

    fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }
}

/// Returns the value of the first `(key, value)` pair accepted by `matcher`.
///
/// Nodes are visited level by level, and within a node in key order. The
/// search stops at the first match. Every container is enqueued at most once,
/// so reference cycles terminate after each reachable node is seen.
pub fn pick_deep<'a, V, F>(root: &'a V, mut matcher: F) -> Option<&'a V>
where
    V: Traversable,
    F: FnMut(&str, &V) -> bool,
{
    let mut queue = VecDeque::from([root]);
    let mut seen = HashSet::from([root.node_id()]);

    while let Some(node) = queue.pop_front() {
        let Some(children) = node.children() else {
            continue;
        };

        for (key, value) in children {
            if matcher(&key, value) {
                return Some(value);
            }
            if value.is_container() && seen.insert(value.node_id()) {
                queue.push_back(value);
            }
        }
    }

    None
}
