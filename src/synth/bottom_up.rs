use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::ast::{AstNode, Program};
use crate::cfg::Grammar;

use super::classes::ClassPool;
use super::grow::{PredSig, TermBank};
use super::{Example, SynthResult, Synthesizer};

pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(120);

/// Bottom-up enumeration over equivalence-pruned pools: grow predicates,
/// grow expressions, return the first expression matching every example.
/// Gives up once the wall-clock budget elapses; the deadline is only
/// checked between rounds.
pub struct BottomUpSynth {
    time_limit: Duration,
}

impl BottomUpSynth {
    pub fn new() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }
}

impl Default for BottomUpSynth {
    fn default() -> Self {
        Self::new()
    }
}

fn exact_match(
    cand: &Rc<AstNode>,
    sat: &[bool],
    _preds: &ClassPool<PredSig>,
) -> Option<Rc<AstNode>> {
    sat.iter().all(|hit| *hit).then(|| cand.clone())
}

impl Synthesizer for BottomUpSynth {
    fn synthesize(&mut self, cfg: &Grammar, examples: &[Example]) -> SynthResult {
        let deadline = Instant::now() + self.time_limit;
        let mut bank = TermBank::new(examples.to_vec());

        if let Some(found) = bank.seed(cfg, exact_match) {
            return SynthResult::Found(Program::new(found));
        }

        let mut round = 0u32;
        loop {
            round += 1;
            bank.grow_preds();
            if let Some(found) = bank.grow_exprs(exact_match) {
                info!("bottom-up: solved in round {round}");
                return SynthResult::Found(Program::new(found));
            }
            debug!("bottom-up: round {round} done, no match");
            if Instant::now() >= deadline {
                info!("bottom-up: time limit reached after {round} rounds");
                return SynthResult::GaveUp;
            }
        }
    }
}
