//! Canonicalization of completed trees on top of an e-graph: `simplify`
//! extracts the smallest equivalent tree under a fixed rewrite set,
//! `equal` decides equivalence modulo those rewrites. Strictly weaker than
//! the behavior-signature equivalence the enumerators prune with, and
//! never required for soundness.

use std::rc::Rc;

use egg::{rewrite as rw, AstSize, Extractor, Id, Language, RecExpr, Rewrite, Runner};

use crate::ast::AstNode;

egg::define_language! {
    enum CanonLang {
        Num(i64),
        "Add" = Add([Id; 2]),
        "Multiply" = Multiply([Id; 2]),
        "Ite" = Ite([Id; 3]),
        "Lt" = Lt([Id; 2]),
        "Eq" = Eq([Id; 2]),
        "And" = And([Id; 2]),
        "Or" = Or([Id; 2]),
        "Not" = Not([Id; 1]),
        Symbol(egg::Symbol),
    }
}

fn rules() -> Vec<Rewrite<CanonLang, ()>> {
    vec![
        rw!("commute-add"; "(Add ?a ?b)" => "(Add ?b ?a)"),
        rw!("commute-mul"; "(Multiply ?a ?b)" => "(Multiply ?b ?a)"),
        rw!("add-0"; "(Add ?a 0)" => "?a"),
        rw!("mul-0"; "(Multiply ?a 0)" => "0"),
        rw!("mul-1"; "(Multiply ?a 1)" => "?a"),
    ]
}

fn to_rec(root: &AstNode) -> RecExpr<CanonLang> {
    debug_assert!(root.is_complete(), "canonicalization is defined on complete trees only");
    root.to_sexpr()
        .parse()
        .expect("complete trees render to parseable s-expressions")
}

fn from_rec(expr: &RecExpr<CanonLang>, at: usize) -> Rc<AstNode> {
    let node = &expr.as_ref()[at];
    let children: Vec<Rc<AstNode>> = node
        .children()
        .iter()
        .map(|id| from_rec(expr, usize::from(*id)))
        .collect();
    match node {
        CanonLang::Num(n) => AstNode::term(&n.to_string()),
        CanonLang::Symbol(s) => AstNode::term(s.as_str()),
        CanonLang::Add(_) => AstNode::op("Add", children),
        CanonLang::Multiply(_) => AstNode::op("Multiply", children),
        CanonLang::Ite(_) => AstNode::op("Ite", children),
        CanonLang::Lt(_) => AstNode::op("Lt", children),
        CanonLang::Eq(_) => AstNode::op("Eq", children),
        CanonLang::And(_) => AstNode::op("And", children),
        CanonLang::Or(_) => AstNode::op("Or", children),
        CanonLang::Not(_) => AstNode::op("Not", children),
    }
}

/// The smallest tree equivalent to `root` under the rewrite rules.
pub fn simplify(root: &Rc<AstNode>) -> Rc<AstNode> {
    let expr = to_rec(root);
    let runner = Runner::default().with_expr(&expr).run(&rules());
    let extractor = Extractor::new(&runner.egraph, AstSize);
    let (_, best) = extractor.find_best(runner.roots[0]);
    from_rec(&best, best.as_ref().len() - 1)
}

/// Whether two complete trees land in the same e-class after saturation.
pub fn equal(a: &Rc<AstNode>, b: &Rc<AstNode>) -> bool {
    let (expr_a, expr_b) = (to_rec(a), to_rec(b));
    let runner = Runner::default()
        .with_expr(&expr_a)
        .with_expr(&expr_b)
        .run(&rules());
    runner.egraph.find(runner.roots[0]) == runner.egraph.find(runner.roots[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplication_by_one_simplifies_away() {
        let tree = AstNode::op("Multiply", vec![AstNode::term("x"), AstNode::term("1")]);
        assert_eq!(simplify(&tree), AstNode::term("x"));
    }

    #[test]
    fn commuted_operands_compare_equal() {
        let xy = AstNode::op("Add", vec![AstNode::term("x"), AstNode::term("y")]);
        let yx = AstNode::op("Add", vec![AstNode::term("y"), AstNode::term("x")]);
        assert!(equal(&xy, &yx));
        assert!(!equal(&xy, &AstNode::term("x")));
    }

    #[test]
    fn conditionals_survive_a_round_trip() {
        let tree = AstNode::op(
            "Ite",
            vec![
                AstNode::op("Lt", vec![AstNode::term("x"), AstNode::term("y")]),
                AstNode::term("y"),
                AstNode::term("x"),
            ],
        );
        assert_eq!(simplify(&tree), tree);
    }
}
