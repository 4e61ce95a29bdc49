use std::collections::BTreeMap;

/// Prefix tree node keyed by `K`, with an optional payload per node.
///
/// Children are kept in key order, so walking edges smallest-key-first
/// visits signatures in sorted order. The path of keys from the root to a
/// node spells a signature exactly when that node carries a payload;
/// attaching the payload is the caller's job via [`TrieNode::value_mut`].
#[derive(Debug)]
pub struct TrieNode<K: Ord, V> {
    value: Option<V>,
    next: BTreeMap<K, TrieNode<K, V>>,
}

impl<K: Ord, V> TrieNode<K, V> {
    pub fn new() -> Self {
        Self {
            value: None,
            next: BTreeMap::new(),
        }
    }

    /// Looks up the child reached over the `key` edge.
    pub fn child(&self, key: &K) -> Option<&TrieNode<K, V>> {
        self.next.get(key)
    }

    /// Walks `keys` from this node, creating empty nodes for any missing
    /// edges, and returns the node at the end of the path.
    pub fn descendant_or_create<I>(&mut self, keys: I) -> &mut TrieNode<K, V>
    where
        I: IntoIterator<Item = K>,
    {
        let mut node = self;
        for key in keys {
            node = node.next.entry(key).or_insert_with(TrieNode::new);
        }
        node
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> &mut Option<V> {
        &mut self.value
    }
}

impl<K: Ord, V> Default for TrieNode<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
