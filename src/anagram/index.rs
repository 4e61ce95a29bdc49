use thiserror::Error;

use super::trie::TrieNode;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A zero-length word would hang a payload on the trie root, letting a
    /// search accept a "word" that consumes no letters and never terminate.
    #[error("dictionary words must be non-empty")]
    EmptyWord,
}

/// All dictionary words sharing one sorted-letter signature, in insertion
/// order. Duplicate words are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordGroup {
    /// The ascending-sorted letters the member words are spelled from.
    pub signature: String,
    pub words: Vec<String>,
}

/// Accumulates dictionary words into the signature trie.
pub struct IndexBuilder {
    root: TrieNode<char, WordGroup>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
        }
    }

    /// Files `word` under its sorted-letter signature, creating the trie
    /// path and the word group on first sight of that signature.
    pub fn insert(&mut self, word: &str) -> Result<(), BuildError> {
        if word.is_empty() {
            return Err(BuildError::EmptyWord);
        }
        let mut signature: Vec<char> = word.chars().collect();
        signature.sort_unstable();

        let node = self.root.descendant_or_create(signature.iter().copied());
        let group = node.value_mut().get_or_insert_with(|| WordGroup {
            signature: signature.iter().collect(),
            words: Vec::new(),
        });
        group.words.push(word.to_string());
        Ok(())
    }

    pub fn build(self) -> AnagramIndex {
        AnagramIndex { root: self.root }
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The finished signature index. Built once, read-only afterwards.
pub struct AnagramIndex {
    root: TrieNode<char, WordGroup>,
}

impl AnagramIndex {
    pub fn from_words<I, S>(words: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = IndexBuilder::new();
        for word in words {
            builder.insert(word.as_ref())?;
        }
        Ok(builder.build())
    }

    pub(super) fn root(&self) -> &TrieNode<char, WordGroup> {
        &self.root
    }
}
