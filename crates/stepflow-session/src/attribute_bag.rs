//! Namespaced attribute bag
//!
//! Attributes are addressed by paths such as `domain/key`. Each segment is a
//! node of a trie, so everything below a prefix can be dropped in one
//! operation. Reads hand out copies; there is no way to alias stored values.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use stepflow_core::FlowError;

#[derive(Debug, Clone, Default, PartialEq)]
struct Node {
    value: Option<Value>,
    children: BTreeMap<String, Node>,
}

impl Node {
    fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.values().all(Node::is_empty)
    }

    /// The stored value, or an object of the children for a namespace node
    fn to_value(&self) -> Option<Value> {
        if let Some(value) = &self.value {
            return Some(value.clone());
        }
        let map: Map<String, Value> = self
            .children
            .iter()
            .filter_map(|(segment, child)| child.to_value().map(|v| (segment.clone(), v)))
            .collect();
        if map.is_empty() {
            None
        } else {
            Some(Value::Object(map))
        }
    }

    fn count(&self) -> usize {
        usize::from(self.value.is_some()) + self.children.values().map(Node::count).sum::<usize>()
    }
}

/// Attribute bag keyed by separator-delimited paths
///
/// A leading separator and empty segments are ignored, so `/a//b` and `a/b`
/// address the same attribute. Setting a path replaces everything below it;
/// setting below a path that holds a value turns that path into a namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespacedAttributeBag {
    name: String,
    separator: char,
    root: Node,
}

impl NamespacedAttributeBag {
    /// Create an empty bag
    pub fn new(name: impl Into<String>, separator: char) -> Self {
        Self {
            name: name.into(),
            separator,
            root: Node::default(),
        }
    }

    /// Name the bag is registered under in a session
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path separator
    #[inline]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Join segments with the bag's separator
    pub fn path(&self, segments: &[&str]) -> String {
        segments.join(&self.separator.to_string())
    }

    fn segments<'a>(&self, path: &'a str) -> Vec<&'a str> {
        path.split(self.separator)
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    fn node(&self, path: &str) -> Option<&Node> {
        let segments = self.segments(path);
        if segments.is_empty() {
            return None;
        }
        segments
            .iter()
            .try_fold(&self.root, |node, segment| node.children.get(*segment))
    }

    /// Whether anything is stored at or below the path
    pub fn has(&self, path: &str) -> bool {
        self.node(path).map(|node| !node.is_empty()).unwrap_or(false)
    }

    /// Copy of the value at the path
    ///
    /// A namespace path yields an object of everything below it.
    pub fn get(&self, path: &str) -> Option<Value> {
        self.node(path).and_then(Node::to_value)
    }

    /// Store a value at the path
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), FlowError> {
        let segments = self.segments(path);
        let (last, parents) = segments.split_last().ok_or_else(|| {
            FlowError::Storage(format!("Empty attribute path in bag \"{}\"", self.name))
        })?;

        let mut node = &mut self.root;
        for segment in parents {
            node = node.children.entry((*segment).to_string()).or_default();
            node.value = None;
        }

        let leaf = node.children.entry((*last).to_string()).or_default();
        leaf.children.clear();
        leaf.value = Some(value);
        Ok(())
    }

    /// Remove the path and everything below it, returning what was there
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let segments = self.segments(path);
        let (last, parents) = segments.split_last()?;

        let mut node = &mut self.root;
        for segment in parents {
            node = node.children.get_mut(*segment)?;
        }
        node.children.remove(*last).and_then(|removed| removed.to_value())
    }

    /// Drop everything below a prefix; an empty prefix clears the bag
    ///
    /// Returns the number of values removed.
    pub fn clear_prefix(&mut self, prefix: &str) -> usize {
        if self.segments(prefix).is_empty() {
            let removed = self.root.count();
            self.root = Node::default();
            return removed;
        }

        let removed = self.node(prefix).map(Node::count).unwrap_or(0);
        self.remove(prefix);
        removed
    }

    /// Remove everything, returning the previous content
    pub fn clear(&mut self) -> Value {
        let all = self.all();
        self.root = Node::default();
        all
    }

    /// Copy of the whole bag as a nested object
    pub fn all(&self) -> Value {
        self.root
            .to_value()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.root.count()
    }

    /// Whether no value is stored
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}
