//! Inductive program synthesis from input/output examples, over a fixed
//! two-sorted grammar of integer arithmetic and conditionals on `x`, `y`,
//! `z`. Three interchangeable search strategies share one AST, interpreter
//! and equivalence-pruning machinery.

pub mod ast;
pub mod canon;
pub mod cfg;
pub mod interp;
pub mod parse;
pub mod synth;
