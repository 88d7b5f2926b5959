use std::collections::HashMap;

use crate::ast::{AstNode, Program, Val};

/// A variable binding for one evaluation: variable name to value.
pub type Env = HashMap<String, Val>;

/// Evaluate a complete program under a binding.
pub fn evaluate(program: &Program, env: &Env) -> Val {
    eval_expr(program.root(), env)
}

/// Evaluate an expression-sorted tree. Total and deterministic on
/// grammar-conformant complete trees; anything else is a bug in tree
/// construction and panics.
pub fn eval_expr(node: &AstNode, env: &Env) -> Val {
    if node.symbol().is_non_terminal() {
        panic!("evaluating an incomplete tree: open category `{}`", node.symbol());
    }
    let children = node.children();
    match (node.symbol().name(), children.len()) {
        ("Add", 2) => eval_expr(&children[0], env).wrapping_add(eval_expr(&children[1], env)),
        ("Multiply", 2) => eval_expr(&children[0], env).wrapping_mul(eval_expr(&children[1], env)),
        // only the taken branch is evaluated
        ("Ite", 3) => {
            if eval_pred(&children[0], env) {
                eval_expr(&children[1], env)
            } else {
                eval_expr(&children[2], env)
            }
        }
        (name, 0) => match name.parse::<Val>() {
            Ok(literal) => literal,
            Err(_) => env
                .get(name)
                .copied()
                .unwrap_or_else(|| panic!("unbound variable `{name}` in expression tree")),
        },
        (name, arity) => panic!("malformed expression node `{name}` with {arity} children"),
    }
}

/// Evaluate a predicate-sorted tree. Same totality contract as [`eval_expr`].
pub fn eval_pred(node: &AstNode, env: &Env) -> bool {
    if node.symbol().is_non_terminal() {
        panic!("evaluating an incomplete tree: open category `{}`", node.symbol());
    }
    let children = node.children();
    match (node.symbol().name(), children.len()) {
        ("Lt", 2) => eval_expr(&children[0], env) < eval_expr(&children[1], env),
        ("Eq", 2) => eval_expr(&children[0], env) == eval_expr(&children[1], env),
        ("And", 2) => eval_pred(&children[0], env) && eval_pred(&children[1], env),
        ("Or", 2) => eval_pred(&children[0], env) || eval_pred(&children[1], env),
        ("Not", 1) => !eval_pred(&children[0], env),
        (name, arity) => panic!("malformed predicate node `{name}` with {arity} children"),
    }
}
