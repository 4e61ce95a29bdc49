use std::cmp::Ordering;
use std::rc::Rc;

/// Immutable singly-linked sequence with shared tails.
///
/// `push` builds a new head over the existing list and never touches the
/// receiver, so search branches can extend a common prefix without copying
/// it. Iteration yields elements most-recently-pushed first.
#[derive(Debug, Clone)]
pub enum Seq<T> {
    Empty,
    Elem(T, Rc<Seq<T>>),
}

impl<T: Clone> Seq<T> {
    /// Returns a new sequence with `value` on top. O(1).
    pub fn push(&self, value: T) -> Seq<T> {
        Seq::Elem(value, Rc::new(self.clone()))
    }
}

impl<T> Seq<T> {
    pub fn head(&self) -> Option<&T> {
        match self {
            Seq::Empty => None,
            Seq::Elem(value, _) => Some(value),
        }
    }

    /// The sequence below the head. The tail of an empty sequence is itself.
    pub fn tail(&self) -> &Seq<T> {
        match self {
            Seq::Empty => self,
            Seq::Elem(_, rest) => rest,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Seq::Empty)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter { curr: self }
    }
}

impl<T> Default for Seq<T> {
    fn default() -> Self {
        Seq::Empty
    }
}

impl<T: Clone> std::iter::FromIterator<T> for Seq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().fold(Seq::Empty, |seq, value| seq.push(value))
    }
}

pub struct Iter<'a, T> {
    curr: &'a Seq<T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.curr {
            Seq::Empty => None,
            Seq::Elem(value, rest) => {
                self.curr = rest;
                Some(value)
            }
        }
    }
}

impl<T: PartialEq> PartialEq for Seq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Seq<T> {}

/// Lexicographic over the iteration order: the first differing element
/// decides, otherwise the shorter sequence precedes.
impl<T: Ord> Ord for Seq<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Ord> PartialOrd for Seq<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
