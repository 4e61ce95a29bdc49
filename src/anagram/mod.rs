pub mod engine;
pub mod index;
pub mod seq;
pub mod trie;

pub use self::engine::{Anagrams, SearchOptions, Solution};
pub use self::index::{AnagramIndex, BuildError, IndexBuilder, WordGroup};
