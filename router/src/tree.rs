use alloc::{boxed::Box, collections::BTreeMap, string::String};

use crate::url::{Segment, UrlStructure, WILDCARD};
use crate::InsertError;

/// Terminal payload of a trie node: the template a route was mounted with and its value.
#[derive(Clone, Debug)]
pub struct Leaf<T> {
    template: UrlStructure,
    value: T,
}

impl<T> Leaf<T> {
    /// The template the route was mounted with.
    pub fn template(&self) -> &UrlStructure {
        &self.template
    }

    /// The value stored with the route.
    pub fn value(&self) -> &T {
        &self.value
    }
}

/// A prefix tree keyed by path segment.
///
/// Every node may hold any number of static children, one dynamic child shared by all `{name}`
/// segments regardless of their name and one wildcard child. Lookup prefers them in that order.
#[derive(Clone, Debug)]
pub struct Node<T> {
    // The value stored at this node.
    leaf: Option<Leaf<T>>,

    // Children keyed by literal segment text.
    statics: BTreeMap<String, Node<T>>,

    // Child reached by any `{name}` segment.
    dynamic: Option<Box<Node<T>>>,

    // Child reached by a trailing `*` segment. It never has children of its own.
    wildcard: Option<Box<Node<T>>>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    pub fn new() -> Self {
        Self {
            leaf: None,
            statics: BTreeMap::new(),
            dynamic: None,
            wildcard: None,
        }
    }

    /// Returns `true` when no route has been inserted.
    pub fn is_empty(&self) -> bool {
        self.leaf.is_none() && self.statics.is_empty() && self.dynamic.is_none() && self.wildcard.is_none()
    }

    /// Leaf stored directly at this node.
    pub fn leaf(&self) -> Option<&Leaf<T>> {
        self.leaf.as_ref()
    }

    /// Insert a route template.
    ///
    /// The tree is left untouched when insertion fails.
    ///
    /// # Errors
    ///
    /// - [InsertError::InvalidWildcard] when a `*` segment is followed by other segments.
    /// - [InsertError::Conflict] when a route already ends at the same trie position, which happens
    ///   for identical templates and for templates differing only by the names of their dynamic
    ///   segments.
    pub fn insert(&mut self, template: UrlStructure, value: T) -> Result<(), InsertError> {
        let segments = template.segments();

        if let Some(idx) = segments.iter().position(|s| s == WILDCARD) {
            if idx != segments.len() - 1 {
                return Err(InsertError::InvalidWildcard { route: template.path() });
            }
        }

        if let Some(leaf) = self.find(segments).and_then(|node| node.leaf.as_ref()) {
            return Err(InsertError::Conflict {
                route: template.path(),
                with: leaf.template.path(),
            });
        }

        let mut node = self;
        for segment in template.segments() {
            node = node.child_or_insert(segment);
        }
        node.leaf = Some(Leaf { template, value });

        Ok(())
    }

    /// Find the leaf matching a concrete url.
    ///
    /// Static children are tried before the dynamic child which is tried before the wildcard child.
    /// A wildcard child consumes every remaining segment at once.
    ///
    /// As a special case a wildcard mounted directly under the root also matches the bare root path
    /// when no route is mounted at the root itself.
    pub fn at(&self, url: &UrlStructure) -> Option<&Leaf<T>> {
        self.at_with(url, true)
    }

    pub(crate) fn at_with(&self, url: &UrlStructure, root_catch_all: bool) -> Option<&Leaf<T>> {
        let segments = url.segments();

        if segments.is_empty() && self.leaf.is_none() && root_catch_all {
            return self.wildcard.as_ref().and_then(|node| node.leaf.as_ref());
        }

        self.walk(segments)
    }

    fn walk(&self, segments: &[String]) -> Option<&Leaf<T>> {
        let Some((segment, rest)) = segments.split_first() else {
            return self.leaf.as_ref();
        };

        self.statics
            .get(segment.as_str())
            .and_then(|node| node.walk(rest))
            .or_else(|| self.dynamic.as_ref().and_then(|node| node.walk(rest)))
            .or_else(|| self.wildcard.as_ref().and_then(|node| node.leaf.as_ref()))
    }

    // follow the exact discriminator path of template segments without applying match precedence.
    fn find(&self, segments: &[String]) -> Option<&Node<T>> {
        segments.iter().try_fold(self, |node, segment| match Segment::classify(segment) {
            Segment::Static(key) => node.statics.get(key),
            Segment::Dynamic(_) => node.dynamic.as_deref(),
            Segment::Wildcard => node.wildcard.as_deref(),
        })
    }

    fn child_or_insert(&mut self, segment: &str) -> &mut Node<T> {
        match Segment::classify(segment) {
            Segment::Static(key) => self.statics.entry(String::from(key)).or_default(),
            Segment::Dynamic(_) => &mut **self.dynamic.get_or_insert_with(Default::default),
            Segment::Wildcard => &mut **self.wildcard.get_or_insert_with(Default::default),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn url(s: &str) -> UrlStructure {
        UrlStructure::parse(s).unwrap()
    }

    #[test]
    fn root() {
        let mut tree = Node::new();
        tree.insert(url("/"), ()).unwrap();
        assert_eq!(tree.leaf().unwrap().template(), &url("/"));
        assert!(tree.statics.is_empty());
    }

    #[test]
    fn below_root() {
        let mut tree = Node::new();
        tree.insert(url("/about"), ()).unwrap();
        assert!(tree.leaf().is_none());

        let about = &tree.statics["about"];
        assert!(about.statics.is_empty());
        assert_eq!(about.leaf().unwrap().template(), &url("/about"));
    }

    #[test]
    fn dynamic_child() {
        let mut tree = Node::new();
        tree.insert(url("/about/{value}"), ()).unwrap();

        let about = &tree.statics["about"];
        assert!(about.statics.is_empty());
        let dynamic = about.dynamic.as_deref().unwrap();
        assert_eq!(dynamic.leaf().unwrap().template(), &url("/about/{value}"));
    }

    #[test]
    fn wildcard_child() {
        let mut tree = Node::new();
        tree.insert(url("*"), ()).unwrap();

        let wildcard = tree.wildcard.as_deref().unwrap();
        assert_eq!(wildcard.leaf().unwrap().template(), &url("*"));
        assert!(wildcard.statics.is_empty() && wildcard.wildcard.is_none());
    }

    #[test]
    fn rejected_insert_leaves_tree_untouched() {
        let mut tree = Node::new();
        assert!(tree.insert(url("/a/*/b"), ()).is_err());
        assert!(tree.is_empty());

        tree.insert(url("/a/{x}"), ()).unwrap();
        assert!(tree.insert(url("/a/{y}"), ()).is_err());
        assert!(tree.statics["a"].dynamic.as_deref().unwrap().statics.is_empty());
    }
}
