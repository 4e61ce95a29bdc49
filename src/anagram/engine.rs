use super::index::{AnagramIndex, WordGroup};
use super::seq::Seq;
use super::trie::TrieNode;

/// Knobs for a single search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Words shorter than this many letters are not used as decomposition
    /// units. Values below 1 are treated as 1.
    pub min_word_len: usize,
    /// Cap on the number of word groups per solution; `None` is unbounded.
    pub max_words: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_word_len: 1,
            max_words: None,
        }
    }
}

/// One decomposition of the query: word groups whose signatures, taken
/// together as a multiset, spell the query exactly. Groups appear in
/// non-decreasing signature order.
pub type Solution<'t> = Vec<&'t WordGroup>;

/// One partial exploration path.
///
/// The acceptance threshold and the running solution travel inside the
/// frame, so the sub-search for each further word of a solution is just
/// another frame on the same stack rather than a nested call.
struct Frame<'t> {
    /// Trie position reached by the letters matched so far.
    node: &'t TrieNode<char, WordGroup>,
    /// Query letters not yet routed, smallest on top.
    remaining: Seq<char>,
    /// Letters set aside for later words, largest on top.
    deferred: Seq<char>,
    /// Letters matched into the word under construction, largest on top.
    matched: Seq<char>,
    /// Signature of the last accepted word. The next word must compare
    /// >= to it, so each combination of groups survives in exactly one
    /// order and permutations of it never appear.
    prev_sig: Seq<char>,
    /// Word groups accepted so far on this path.
    solution: Seq<&'t WordGroup>,
}

/// Lazy enumerator over the solutions for one query. Work happens only
/// when [`Iterator::next`] is called; dropping it abandons the search.
pub struct Anagrams<'t> {
    root: &'t TrieNode<char, WordGroup>,
    min_word_len: usize,
    max_words: Option<usize>,
    stack: Vec<Frame<'t>>,
}

impl AnagramIndex {
    /// Enumerates every decomposition of `letters` into dictionary
    /// signatures, subject to `options`.
    pub fn solve<I>(&self, letters: I, options: &SearchOptions) -> Anagrams<'_>
    where
        I: IntoIterator<Item = char>,
    {
        let mut keys: Vec<char> = letters.into_iter().collect();
        keys.sort_unstable();
        // Pushed largest-first so the smallest key ends up on top.
        let remaining: Seq<char> = keys.into_iter().rev().collect();

        let mut stack = Vec::new();
        if !remaining.is_empty() {
            stack.push(Frame {
                node: self.root(),
                remaining,
                deferred: Seq::Empty,
                matched: Seq::Empty,
                prev_sig: Seq::Empty,
                solution: Seq::Empty,
            });
        }
        Anagrams {
            root: self.root(),
            min_word_len: options.min_word_len.max(1),
            max_words: options.max_words.map(|cap| cap.max(1)),
            stack,
        }
    }
}

impl<'t> Iterator for Anagrams<'t> {
    type Item = Solution<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let Some(key) = frame.remaining.head().copied() else {
                // Every key routed: the word under construction is complete.
                if let Some(solution) = self.finish_word(frame) {
                    return Some(solution);
                }
                continue;
            };
            let rest = frame.remaining.tail().clone();

            // A key may extend the current word only while it is strictly
            // above every key already deferred; with duplicate letters this
            // blocks the mirrored split that re-derives the same match.
            let consumable = frame.deferred.head().map_or(true, |&d| d < key);
            let child = if consumable { frame.node.child(&key) } else { None };

            if child.is_none() && frame.matched.is_empty() && frame.deferred.is_empty() {
                // `key` is the smallest letter of this sub-query, so any
                // word covering it would have to start with it. No root
                // edge means the sub-query has no decomposition at all.
                continue;
            }

            // Defer branch: `key` starts some later word instead.
            self.stack.push(Frame {
                node: frame.node,
                remaining: rest.clone(),
                deferred: frame.deferred.push(key),
                matched: frame.matched.clone(),
                prev_sig: frame.prev_sig.clone(),
                solution: frame.solution.clone(),
            });

            // Consume branch, pushed last so it is explored first.
            if let Some(child) = child {
                self.stack.push(Frame {
                    node: child,
                    remaining: rest,
                    deferred: frame.deferred,
                    matched: frame.matched.push(key),
                    prev_sig: frame.prev_sig,
                    solution: frame.solution,
                });
            }
        }
        None
    }
}

impl<'t> Anagrams<'t> {
    /// Closes out a frame whose remaining keys are exhausted. Returns a
    /// finished solution, or schedules the search for the next word when
    /// deferred letters are still unspoken for.
    fn finish_word(&mut self, frame: Frame<'t>) -> Option<Solution<'t>> {
        let group = frame.node.value()?;
        if frame.matched.len() < self.min_word_len {
            return None;
        }
        if frame.matched < frame.prev_sig {
            return None;
        }

        if frame.deferred.is_empty() {
            let mut words: Vec<&'t WordGroup> = frame.solution.iter().copied().collect();
            words.reverse();
            words.push(group);
            return Some(words);
        }

        let used = frame.solution.len() + 1;
        if self.max_words.map_or(true, |cap| used < cap) {
            self.stack.push(Frame {
                node: self.root,
                // Deferred keys sit largest-first; re-collecting reverses
                // them so the smallest is back on top.
                remaining: frame.deferred.iter().copied().collect(),
                deferred: Seq::Empty,
                matched: Seq::Empty,
                prev_sig: frame.matched,
                solution: frame.solution.push(group),
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::super::index::AnagramIndex;
    use super::super::seq::Seq;
    use super::{SearchOptions, Solution};

    fn opts(min_word_len: usize, max_words: Option<usize>) -> SearchOptions {
        SearchOptions {
            min_word_len,
            max_words,
        }
    }

    /// Renders each solution as its groups' member-word lists.
    fn collect(index: &AnagramIndex, letters: &str, options: &SearchOptions) -> Vec<Vec<Vec<String>>> {
        index
            .solve(letters.chars(), options)
            .map(|solution| solution.iter().map(|group| group.words.clone()).collect())
            .collect()
    }

    #[test]
    fn single_word_query_finds_the_whole_group() {
        let index = AnagramIndex::from_words(["eat", "tea", "ate", "tan"]).unwrap();
        let solutions = collect(&index, "eat", &opts(1, Some(1)));
        assert_eq!(solutions, vec![vec![vec!["eat".to_string(), "tea".into(), "ate".into()]]]);
    }

    #[test]
    fn leftover_letters_without_a_group_kill_the_branch() {
        // "a" + "tn" is not a decomposition because "tn" matches nothing.
        let index = AnagramIndex::from_words(["a", "tan"]).unwrap();
        let solutions = collect(&index, "tan", &opts(1, Some(2)));
        assert_eq!(solutions, vec![vec![vec!["tan".to_string()]]]);
    }

    #[test]
    fn min_word_len_excludes_short_words() {
        let index = AnagramIndex::from_words(["a", "tan"]).unwrap();
        let solutions = collect(&index, "tan", &opts(2, None));
        assert_eq!(solutions, vec![vec![vec!["tan".to_string()]]]);
    }

    #[test]
    fn splits_into_multiple_words() {
        let index = AnagramIndex::from_words(["a", "no", "on"]).unwrap();
        let solutions = collect(&index, "aon", &opts(1, None));
        assert_eq!(
            solutions,
            vec![vec![
                vec!["a".to_string()],
                vec!["no".to_string(), "on".into()],
            ]]
        );
    }

    #[test]
    fn duplicate_letters_do_not_duplicate_solutions() {
        let index = AnagramIndex::from_words(["ab"]).unwrap();
        let solutions = collect(&index, "baba", &opts(1, None));
        assert_eq!(
            solutions,
            vec![vec![vec!["ab".to_string()], vec!["ab".to_string()]]]
        );
    }

    #[test]
    fn permutations_of_one_combination_appear_once() {
        let index = AnagramIndex::from_words(["a", "b", "ab"]).unwrap();
        let mut solutions = collect(&index, "ab", &opts(1, None));
        solutions.sort();
        assert_eq!(
            solutions,
            vec![
                vec![vec!["a".to_string()], vec!["b".to_string()]],
                vec![vec!["ab".to_string()]],
            ]
        );
    }

    #[test]
    fn max_words_caps_solutions() {
        let index = AnagramIndex::from_words(["a", "b"]).unwrap();
        assert!(collect(&index, "ab", &opts(1, Some(1))).is_empty());
        assert_eq!(collect(&index, "ab", &opts(1, Some(2))).len(), 1);
    }

    #[test]
    fn degenerate_queries_yield_nothing() {
        let index = AnagramIndex::from_words(["tan"]).unwrap();
        assert!(collect(&index, "", &opts(1, None)).is_empty());

        let empty = AnagramIndex::from_words(Vec::<String>::new()).unwrap();
        assert!(collect(&empty, "tan", &opts(1, None)).is_empty());

        // Query letter absent from every signature.
        assert!(collect(&index, "tanz", &opts(1, None)).is_empty());
    }

    #[test]
    fn uncoverable_smallest_letter_means_no_solutions() {
        // No word starts with (or contains) 'a', so the search stops
        // without exploring decompositions of the larger letters.
        let index = AnagramIndex::from_words(["no", "on"]).unwrap();
        assert!(collect(&index, "ano", &opts(1, None)).is_empty());
    }

    #[test]
    fn pruning_spares_live_branches() {
        // The "an" branch dies ("o" alone matches nothing); the "a" branch
        // must still deliver the "no"/"on" split.
        let index = AnagramIndex::from_words(["a", "an", "no", "on"]).unwrap();
        let solutions = collect(&index, "ano", &opts(1, None));
        assert_eq!(
            solutions,
            vec![vec![
                vec!["a".to_string()],
                vec!["no".to_string(), "on".into()],
            ]]
        );
    }

    #[test]
    fn rebuilding_the_index_is_idempotent() {
        let words = ["eat", "tea", "a", "te", "at"];
        let first = AnagramIndex::from_words(words).unwrap();
        let second = AnagramIndex::from_words(words).unwrap();
        let options = opts(1, None);
        assert_eq!(
            collect(&first, "aet", &options),
            collect(&second, "aet", &options)
        );
    }

    #[test]
    fn enumeration_is_restartable() {
        let index = AnagramIndex::from_words(["a", "b", "ab"]).unwrap();
        let options = opts(1, None);
        let first: Vec<_> = collect(&index, "ab", &options);
        let second: Vec<_> = collect(&index, "ab", &options);
        assert_eq!(first, second);
    }

    /// Signature order as the engine compares it: keys pushed ascending,
    /// compared over the LIFO iteration.
    fn sig_seq(signature: &str) -> Seq<char> {
        signature.chars().collect()
    }

    fn signatures(solution: &Solution<'_>) -> Vec<String> {
        solution.iter().map(|group| group.signature.clone()).collect()
    }

    proptest! {
        #[test]
        fn solutions_cover_the_query_exactly(
            words in prop::collection::vec("[a-c]{1,3}", 1..8),
            letters in "[a-c]{0,6}",
        ) {
            let index = AnagramIndex::from_words(&words).unwrap();
            let mut want: Vec<char> = letters.chars().collect();
            want.sort_unstable();

            let mut seen = HashSet::new();
            for solution in index.solve(letters.chars(), &SearchOptions::default()) {
                let mut got: Vec<char> = solution
                    .iter()
                    .flat_map(|group| group.signature.chars())
                    .collect();
                got.sort_unstable();
                prop_assert_eq!(&got, &want);

                // No two solutions may be permutations of one another.
                let mut key = signatures(&solution);
                key.sort_unstable();
                prop_assert!(
                    seen.insert(key.join("+")),
                    "same group combination emitted twice"
                );

                // Groups arrive in non-decreasing signature order.
                for pair in solution.windows(2) {
                    prop_assert!(sig_seq(&pair[0].signature) <= sig_seq(&pair[1].signature));
                }
            }
        }

        #[test]
        fn solutions_respect_the_configured_bounds(
            words in prop::collection::vec("[a-c]{1,3}", 1..8),
            letters in "[a-c]{1,5}",
            min_word_len in 1usize..3,
            max_words in 1usize..3,
        ) {
            let index = AnagramIndex::from_words(&words).unwrap();
            let options = opts(min_word_len, Some(max_words));
            for solution in index.solve(letters.chars(), &options) {
                prop_assert!(solution.len() <= max_words);
                for group in &solution {
                    prop_assert!(group.signature.chars().count() >= min_word_len);
                }
            }
        }
    }
}
