use std::collections::VecDeque;
use std::rc::Rc;

use log::info;

use crate::ast::{AstNode, Program};
use crate::cfg::{Grammar, Production};

use super::{satisfies_all, Example, SynthResult, Synthesizer};

pub const DEFAULT_QUEUE_LIMIT: usize = 5_000_000;

/// Breadth-first expansion of partial derivation trees straight from the
/// grammar. No pruning, so complete trees surface strictly smallest-first;
/// the only bound is the queue capacity.
pub struct TopDownSynth {
    queue_limit: usize,
}

impl TopDownSynth {
    pub fn new() -> Self {
        Self {
            queue_limit: DEFAULT_QUEUE_LIMIT,
        }
    }

    pub fn with_queue_limit(mut self, limit: usize) -> Self {
        self.queue_limit = limit;
        self
    }
}

impl Default for TopDownSynth {
    fn default() -> Self {
        Self::new()
    }
}

impl Synthesizer for TopDownSynth {
    fn synthesize(&mut self, cfg: &Grammar, examples: &[Example]) -> SynthResult {
        let mut queue: VecDeque<Rc<AstNode>> = VecDeque::new();
        queue.push_back(Rc::new(AstNode::leaf(cfg.start().clone())));

        let mut dequeued = 0u64;
        while let Some(tree) = queue.pop_front() {
            dequeued += 1;
            // satisfaction is only ever checked on complete trees
            if tree.is_complete() && satisfies_all(&tree, examples) {
                info!("top-down: solved after {dequeued} trees");
                return SynthResult::Found(Program::new(tree));
            }
            queue.extend(expand(cfg, &tree));
            if queue.len() > self.queue_limit {
                info!("top-down: queue limit {} exceeded", self.queue_limit);
                return SynthResult::GaveUp;
            }
        }
        // a finite grammar can drain the queue outright
        SynthResult::GaveUp
    }
}

/// All single-step expansions of the first open category leaf (preorder).
/// Complete trees have none.
fn expand(cfg: &Grammar, tree: &Rc<AstNode>) -> Vec<Rc<AstNode>> {
    let Some(category) = first_open_category(tree) else {
        return Vec::new();
    };
    cfg.productions(&category)
        .iter()
        .map(|prod| {
            replace_first_open(tree, &instantiate(prod))
                .expect("an open leaf was just located in this tree")
        })
        .collect()
}

fn first_open_category(node: &AstNode) -> Option<String> {
    if node.symbol().is_non_terminal() {
        return Some(node.symbol().name().to_owned());
    }
    node.children().iter().find_map(|c| first_open_category(c))
}

/// A fresh subtree for one production: the operator over one leaf per
/// argument symbol.
fn instantiate(prod: &Production) -> Rc<AstNode> {
    let children = prod
        .args
        .iter()
        .map(|sym| Rc::new(AstNode::leaf(sym.clone())))
        .collect();
    Rc::new(AstNode::new(prod.operator.clone(), children))
}

/// Swap the first open leaf (preorder) for `replacement`, rebuilding only
/// the spine above it; untouched siblings stay shared with the input tree.
fn replace_first_open(node: &Rc<AstNode>, replacement: &Rc<AstNode>) -> Option<Rc<AstNode>> {
    if node.symbol().is_non_terminal() {
        return Some(replacement.clone());
    }
    for (idx, child) in node.children().iter().enumerate() {
        if let Some(rebuilt) = replace_first_open(child, replacement) {
            let mut children = node.children().to_vec();
            children[idx] = rebuilt;
            return Some(Rc::new(AstNode::new(node.symbol().clone(), children)));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::Symbol;

    #[test]
    fn expansion_replaces_only_the_first_open_leaf() {
        let cfg = Grammar::arith();
        let start = Rc::new(AstNode::leaf(cfg.start().clone()));
        let succs = expand(&cfg, &start);
        assert_eq!(succs.len(), 9);
        assert_eq!(succs[0].to_string(), "Ite(B, E, E)");
        assert_eq!(succs[3].to_string(), "x");

        // expanding Ite(B, E, E) rewrites the predicate slot first
        let ite_succs = expand(&cfg, &succs[0]);
        assert_eq!(ite_succs.len(), 5);
        assert_eq!(ite_succs[0].to_string(), "Ite(Lt(E, E), E, E)");
    }

    #[test]
    fn expansion_shares_untouched_subtrees() {
        let cfg = Grammar::arith();
        let open = AstNode::op(
            "Add",
            vec![
                Rc::new(AstNode::leaf(Symbol::non_terminal("E"))),
                AstNode::term("y"),
            ],
        );
        for succ in expand(&cfg, &open) {
            assert!(Rc::ptr_eq(succ.child(1), open.child(1)));
        }
    }

    #[test]
    fn complete_trees_expand_to_nothing() {
        let cfg = Grammar::arith();
        assert!(expand(&cfg, &AstNode::term("x")).is_empty());
    }
}
