use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::ast::{AstNode, Program, Val};
use crate::cfg::Grammar;

use super::classes::ClassPool;
use super::grow::{PredSig, TermBank};
use super::{Example, SynthResult, Synthesizer};

pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(120);

/// Divide-and-conquer synthesis: bottom-up growth plus a decomposition
/// check on every new expression. A candidate matching a strict majority
/// of the examples is paired with a predicate whose truth vector equals
/// its satisfaction bitmap; the leftover examples are synthesized
/// recursively and the pieces composed with `Ite`.
///
/// Each recursion step works on a strictly smaller example set, so the
/// chain depth is bounded by the example count. The wall-clock deadline is
/// shared down the recursion and checked once per round; `unbounded()`
/// removes it.
pub struct DivideConquerSynth {
    time_limit: Option<Duration>,
}

impl DivideConquerSynth {
    pub fn new() -> Self {
        Self {
            time_limit: Some(DEFAULT_TIME_LIMIT),
        }
    }

    pub fn unbounded() -> Self {
        Self { time_limit: None }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

impl Default for DivideConquerSynth {
    fn default() -> Self {
        Self::new()
    }
}

impl Synthesizer for DivideConquerSynth {
    fn synthesize(&mut self, cfg: &Grammar, examples: &[Example]) -> SynthResult {
        let deadline = self.time_limit.map(|limit| Instant::now() + limit);
        synth_rec(cfg, examples.to_vec(), deadline)
    }
}

fn synth_rec(cfg: &Grammar, examples: Vec<Example>, deadline: Option<Instant>) -> SynthResult {
    if infeasible(&examples) {
        info!("divide-and-conquer: example set is infeasible");
        return SynthResult::Infeasible;
    }

    let mut bank = TermBank::new(examples.clone());
    let mut check = |cand: &Rc<AstNode>, sat: &[bool], preds: &ClassPool<PredSig>| {
        if sat.iter().all(|hit| *hit) {
            return Some(cand.clone());
        }
        decompose(cfg, cand, sat, preds, &examples, deadline)
    };

    if let Some(found) = bank.seed(cfg, &mut check) {
        return SynthResult::Found(Program::new(found));
    }
    let mut round = 0u32;
    loop {
        round += 1;
        bank.grow_preds();
        if let Some(found) = bank.grow_exprs(&mut check) {
            info!("divide-and-conquer: solved in round {round}");
            return SynthResult::Found(Program::new(found));
        }
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                info!("divide-and-conquer: time limit reached after {round} rounds");
                return SynthResult::GaveUp;
            }
        }
    }
}

/// Try to split on a candidate that covers a strict majority of the
/// examples. A failed recursion discards the pairing for good: the
/// frontiers never propose this candidate again.
fn decompose(
    cfg: &Grammar,
    cand: &Rc<AstNode>,
    sat: &[bool],
    preds: &ClassPool<PredSig>,
    examples: &[Example],
    deadline: Option<Instant>,
) -> Option<Rc<AstNode>> {
    let hits = sat.iter().filter(|hit| **hit).count();
    if hits * 2 <= sat.len() {
        return None;
    }
    let pred = preds.find(sat)?.clone();
    let unsat: Vec<Example> = sat
        .iter()
        .zip(examples)
        .filter(|(hit, _)| !**hit)
        .map(|(_, ex)| ex.clone())
        .collect();
    debug!(
        "divide-and-conquer: {cand} covers {hits}/{}, recursing on {} examples",
        sat.len(),
        unsat.len()
    );
    match synth_rec(cfg, unsat, deadline) {
        SynthResult::Found(rest) => Some(AstNode::op(
            "Ite",
            vec![pred, cand.clone(), rest.into_root()],
        )),
        _ => None,
    }
}

/// Definite infeasibility checks, run before any growth. The second rule
/// is a necessary-condition fast path, not a decision procedure: sets it
/// misses surface later as a budget exhaustion, never as `Infeasible`.
fn infeasible(examples: &[Example]) -> bool {
    // identical inputs demanding different outputs
    let mut seen: HashMap<Vec<(&str, Val)>, Val> = HashMap::new();
    for ex in examples {
        let mut key: Vec<(&str, Val)> =
            ex.input.iter().map(|(name, v)| (name.as_str(), *v)).collect();
        key.sort_unstable();
        if *seen.entry(key).or_insert(ex.output) != ex.output {
            return true;
        }
    }

    // every reachable value is built from the inputs and positive literals
    // by Add/Multiply/Ite, so when the smallest of those is 0 or 1 no
    // program can land below it
    for ex in examples {
        let floor = ex.input.values().copied().chain([1]).min().unwrap_or(1);
        if (floor == 0 || floor == 1) && ex.output < floor {
            return true;
        }
    }
    false
}
