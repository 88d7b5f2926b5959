use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use crate::ast::AstNode;

/// A term pool pruned by extensional equivalence: at most one live term per
/// behavior signature. Terms join in admission order; when a class is seen
/// again with a strictly smaller term, the smaller one takes over the slot
/// so future compositions build on the simplest known representative.
pub struct ClassPool<S> {
    terms: Vec<Rc<AstNode>>,
    classes: HashMap<S, usize>,
}

impl<S: Eq + Hash> ClassPool<S> {
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
            classes: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, index: usize) -> &Rc<AstNode> {
        &self.terms[index]
    }

    /// Offer a term under its behavior signature. Returns true iff the
    /// behavior is new to the pool (the term joined it); a known behavior
    /// reports false even when the term replaces the stored representative.
    pub fn admit(&mut self, sig: S, term: Rc<AstNode>) -> bool {
        match self.classes.entry(sig) {
            Entry::Occupied(entry) => {
                let slot = *entry.get();
                if term.size() < self.terms[slot].size() {
                    self.terms[slot] = term;
                }
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(self.terms.len());
                self.terms.push(term);
                true
            }
        }
    }

    /// The representative of a behavior signature, if any term showed it.
    pub fn find<Q>(&self, sig: &Q) -> Option<&Rc<AstNode>>
    where
        S: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.classes.get(sig).map(|slot| &self.terms[*slot])
    }
}

impl<S: Eq + Hash> Default for ClassPool<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Rc<AstNode> {
        AstNode::term("x")
    }

    fn large() -> Rc<AstNode> {
        AstNode::op("Add", vec![AstNode::term("x"), AstNode::term("1")])
    }

    #[test]
    fn first_term_of_a_class_is_new() {
        let mut pool: ClassPool<Vec<i64>> = ClassPool::new();
        assert!(pool.admit(vec![1, 2], small()));
        assert!(!pool.admit(vec![1, 2], large()));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn smaller_term_takes_over_the_slot() {
        let mut pool: ClassPool<Vec<i64>> = ClassPool::new();
        assert!(pool.admit(vec![7], large()));
        assert!(!pool.admit(vec![7], small()));
        // still one live term, and it is the minimal one
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(0).size(), 1);
        assert_eq!(pool.find(&vec![7]).unwrap().size(), 1);
    }

    #[test]
    fn larger_term_never_displaces_the_representative() {
        let mut pool: ClassPool<Vec<i64>> = ClassPool::new();
        pool.admit(vec![7], small());
        pool.admit(vec![7], large());
        assert_eq!(pool.get(0).size(), 1);
    }

    #[test]
    fn find_by_borrowed_signature() {
        let mut pool: ClassPool<Vec<bool>> = ClassPool::new();
        pool.admit(vec![true, false], small());
        let sat: &[bool] = &[true, false];
        assert!(pool.find(sat).is_some());
        assert!(pool.find(&[false, false][..]).is_none());
    }
}
