pub mod bottom_up;
pub mod classes;
pub mod divide_conquer;
mod grow;
pub mod top_down;

use std::collections::HashMap;

use crate::ast::{Program, Val};
use crate::cfg::Grammar;
use crate::interp::{self, Env};

pub use bottom_up::BottomUpSynth;
pub use divide_conquer::DivideConquerSynth;
pub use top_down::TopDownSynth;

/// One input/output record of the synthesis specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub input: Env,
    pub output: Val,
}

impl Example {
    pub fn new(input: Env, output: Val) -> Self {
        Self { input, output }
    }

    /// Shorthand for the fixed three-variable domain.
    pub fn xyz(x: Val, y: Val, z: Val, output: Val) -> Self {
        let input: Env = HashMap::from([
            ("x".to_owned(), x),
            ("y".to_owned(), y),
            ("z".to_owned(), z),
        ]);
        Self { input, output }
    }
}

/// What a synthesis call can end with. Search failure is a value, never a
/// panic: `Infeasible` means no program over the inputs can exist,
/// `GaveUp` means the search budget ran out without a verdict.
#[derive(Debug, Clone)]
pub enum SynthResult {
    Found(Program),
    Infeasible,
    GaveUp,
}

impl SynthResult {
    pub fn found(self) -> Option<Program> {
        match self {
            SynthResult::Found(program) => Some(program),
            _ => None,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, SynthResult::Infeasible)
    }

    pub fn is_gave_up(&self) -> bool {
        matches!(self, SynthResult::GaveUp)
    }
}

/// A synthesizer searches a grammar for a program reproducing every
/// example. Implementations own all of their search state per call, so
/// independent calls never interfere.
pub trait Synthesizer {
    fn synthesize(&mut self, cfg: &Grammar, examples: &[Example]) -> SynthResult;
}

pub(crate) fn satisfies_all(root: &crate::ast::AstNode, examples: &[Example]) -> bool {
    examples
        .iter()
        .all(|ex| interp::eval_expr(root, &ex.input) == ex.output)
}
