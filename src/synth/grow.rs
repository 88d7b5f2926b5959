use std::rc::Rc;

use crate::ast::{AstNode, Val};
use crate::cfg::Grammar;
use crate::interp;

use super::classes::ClassPool;
use super::Example;

pub type ExprSig = Vec<Val>;
pub type PredSig = Vec<bool>;

/// A generator frontier: the pool prefix already fully combined. A
/// combination is skipped iff every index sits below the recorded sizes,
/// so each one is proposed at most once across a run and each round only
/// touches combinations involving terms admitted since the last round.
#[derive(Debug, Clone, Copy, Default)]
struct Frontier1(usize);

impl Frontier1 {
    fn covered(&self, i: usize) -> bool {
        i < self.0
    }

    fn cover(&mut self, len: usize) {
        self.0 = len;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Frontier2(usize, usize);

impl Frontier2 {
    fn covered(&self, i: usize, j: usize) -> bool {
        i < self.0 && j < self.1
    }

    fn cover(&mut self, a: usize, b: usize) {
        self.0 = a;
        self.1 = b;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Frontier3(usize, usize, usize);

impl Frontier3 {
    fn covered(&self, i: usize, j: usize, k: usize) -> bool {
        i < self.0 && j < self.1 && k < self.2
    }

    fn cover(&mut self, a: usize, b: usize, c: usize) {
        self.0 = a;
        self.1 = b;
        self.2 = c;
    }
}

/// The growth state shared by the pruned strategies: one equivalence-pruned
/// pool per sort plus a frontier per generator. Pool sizes are captured at
/// the start of each generator pass, so terms admitted mid-round are picked
/// up next round.
///
/// Every expression candidate is handed to the strategy callback together
/// with its per-example satisfaction bitmap and the predicate pool, before
/// admission; a `Some` return ends the round with that tree as the answer.
pub struct TermBank {
    examples: Vec<Example>,
    exprs: ClassPool<ExprSig>,
    preds: ClassPool<PredSig>,
    expr_pairs: Frontier2,
    expr_branches: Frontier3,
    pred_cmps: Frontier2,
    pred_negs: Frontier1,
    pred_conns: Frontier2,
}

impl TermBank {
    pub fn new(examples: Vec<Example>) -> Self {
        Self {
            examples,
            exprs: ClassPool::new(),
            preds: ClassPool::new(),
            expr_pairs: Frontier2::default(),
            expr_branches: Frontier3::default(),
            pred_cmps: Frontier2::default(),
            pred_negs: Frontier1::default(),
            pred_conns: Frontier2::default(),
        }
    }

    /// Admit the grammar's zero-arity expression leaves, running each
    /// through the candidate check first.
    pub fn seed<F>(&mut self, cfg: &Grammar, mut on_candidate: F) -> Option<Rc<AstNode>>
    where
        F: FnMut(&Rc<AstNode>, &[bool], &ClassPool<PredSig>) -> Option<Rc<AstNode>>,
    {
        let leaves: Vec<Rc<AstNode>> = cfg
            .productions(cfg.start().name())
            .iter()
            .filter(|prod| prod.args.is_empty())
            .map(|prod| Rc::new(AstNode::leaf(prod.operator.clone())))
            .collect();
        for leaf in leaves {
            if let Some(found) = self.offer_expr(leaf, &mut on_candidate) {
                return Some(found);
            }
        }
        None
    }

    /// One predicate growth pass: comparisons over new expression pairs,
    /// negations of new predicates, connectives over new predicate pairs.
    pub fn grow_preds(&mut self) {
        let expr_len = self.exprs.len();
        for i in 0..expr_len {
            for j in i..expr_len {
                if self.pred_cmps.covered(i, j) {
                    continue;
                }
                let left = self.exprs.get(i).clone();
                let right = self.exprs.get(j).clone();
                self.admit_pred(AstNode::op("Lt", vec![left.clone(), right.clone()]));
                self.admit_pred(AstNode::op("Lt", vec![right.clone(), left.clone()]));
                self.admit_pred(AstNode::op("Eq", vec![left, right]));
            }
        }
        self.pred_cmps.cover(expr_len, expr_len);

        // the negation and connective passes both stop at this size, so
        // predicates they admit wait until next round
        let pred_len = self.preds.len();
        for i in 0..pred_len {
            if self.pred_negs.covered(i) {
                continue;
            }
            let p = self.preds.get(i).clone();
            self.admit_pred(AstNode::op("Not", vec![p]));
        }
        self.pred_negs.cover(pred_len);

        for i in 0..pred_len {
            // start at i + 1: And(p, p) and Or(p, p) are just p
            for j in (i + 1)..pred_len {
                if self.pred_conns.covered(i, j) {
                    continue;
                }
                let left = self.preds.get(i).clone();
                let right = self.preds.get(j).clone();
                self.admit_pred(AstNode::op("And", vec![left.clone(), right.clone()]));
                self.admit_pred(AstNode::op("Or", vec![left, right]));
            }
        }
        self.pred_conns.cover(pred_len, pred_len);
    }

    /// One expression growth pass: sums and products over new pairs, then
    /// conditionals over new (predicate, expression, expression) triples.
    /// Returns the first candidate the callback accepts.
    pub fn grow_exprs<F>(&mut self, mut on_candidate: F) -> Option<Rc<AstNode>>
    where
        F: FnMut(&Rc<AstNode>, &[bool], &ClassPool<PredSig>) -> Option<Rc<AstNode>>,
    {
        let expr_len = self.exprs.len();
        let pred_len = self.preds.len();

        for i in 0..expr_len {
            for j in i..expr_len {
                if self.expr_pairs.covered(i, j) {
                    continue;
                }
                let left = self.exprs.get(i).clone();
                let right = self.exprs.get(j).clone();
                for op in ["Add", "Multiply"] {
                    let cand = AstNode::op(op, vec![left.clone(), right.clone()]);
                    if let Some(found) = self.offer_expr(cand, &mut on_candidate) {
                        return Some(found);
                    }
                }
            }
        }
        self.expr_pairs.cover(expr_len, expr_len);

        for i in 0..expr_len {
            // start at i + 1: Ite(p, e, e) is just e
            for j in (i + 1)..expr_len {
                for k in 0..pred_len {
                    if self.expr_branches.covered(i, j, k) {
                        continue;
                    }
                    let p = self.preds.get(k).clone();
                    let a = self.exprs.get(i).clone();
                    let b = self.exprs.get(j).clone();
                    let branches = [
                        AstNode::op("Ite", vec![p.clone(), a.clone(), b.clone()]),
                        AstNode::op("Ite", vec![p, b, a]),
                    ];
                    for cand in branches {
                        if let Some(found) = self.offer_expr(cand, &mut on_candidate) {
                            return Some(found);
                        }
                    }
                }
            }
        }
        self.expr_branches.cover(expr_len, expr_len, pred_len);

        None
    }

    fn offer_expr<F>(&mut self, cand: Rc<AstNode>, on_candidate: &mut F) -> Option<Rc<AstNode>>
    where
        F: FnMut(&Rc<AstNode>, &[bool], &ClassPool<PredSig>) -> Option<Rc<AstNode>>,
    {
        let sig: ExprSig = self
            .examples
            .iter()
            .map(|ex| interp::eval_expr(&cand, &ex.input))
            .collect();
        let sat: Vec<bool> = sig
            .iter()
            .zip(&self.examples)
            .map(|(out, ex)| *out == ex.output)
            .collect();
        if let Some(found) = on_candidate(&cand, &sat, &self.preds) {
            return Some(found);
        }
        self.exprs.admit(sig, cand);
        None
    }

    fn admit_pred(&mut self, cand: Rc<AstNode>) {
        let sig: PredSig = self
            .examples
            .iter()
            .map(|ex| interp::eval_pred(&cand, &ex.input))
            .collect();
        self.preds.admit(sig, cand);
    }
}
