use std::fmt;
use std::rc::Rc;

use crate::cfg::Symbol;

/// The value domain of the expression sort. Arithmetic wraps.
pub type Val = i64;

/// One node of an expression tree. Trees are immutable after construction
/// and children are shared, so "copying" a tree is an `Rc` clone and two
/// trees may alias subtrees freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AstNode {
    symbol: Symbol,
    children: Vec<Rc<AstNode>>,
}

impl AstNode {
    pub fn new(symbol: Symbol, children: Vec<Rc<AstNode>>) -> Self {
        Self { symbol, children }
    }

    pub fn leaf(symbol: Symbol) -> Self {
        Self::new(symbol, Vec::new())
    }

    /// A terminal leaf node, ready for sharing.
    pub fn term(name: &str) -> Rc<Self> {
        Rc::new(Self::leaf(Symbol::terminal(name)))
    }

    /// An operator application node, ready for sharing.
    pub fn op(name: &str, children: Vec<Rc<AstNode>>) -> Rc<Self> {
        Rc::new(Self::new(Symbol::terminal(name), children))
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn children(&self) -> &[Rc<AstNode>] {
        &self.children
    }

    pub fn child(&self, index: usize) -> &Rc<AstNode> {
        &self.children[index]
    }

    /// Total node count.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|c| c.size()).sum::<usize>()
    }

    /// A tree is complete when no category placeholder remains anywhere.
    pub fn is_complete(&self) -> bool {
        self.symbol.is_terminal() && self.children.iter().all(|c| c.is_complete())
    }

    /// The s-expression form the canonicalizer consumes: `(Op arg ...)`,
    /// bare name for leaves.
    pub fn to_sexpr(&self) -> String {
        if self.children.is_empty() {
            return self.symbol.name().to_owned();
        }
        let mut out = format!("({}", self.symbol.name());
        for child in &self.children {
            out.push(' ');
            out.push_str(&child.to_sexpr());
        }
        out.push(')');
        out
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)?;
        if !self.children.is_empty() {
            let mut sep = "";
            write!(f, "(")?;
            for child in &self.children {
                write!(f, "{sep}{child}")?;
                sep = ", ";
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// A synthesized program: a complete expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    root: Rc<AstNode>,
}

impl Program {
    pub fn new(root: Rc<AstNode>) -> Self {
        debug_assert!(root.is_complete(), "a program must be a complete tree");
        Self { root }
    }

    pub fn root(&self) -> &Rc<AstNode> {
        &self.root
    }

    pub fn into_root(self) -> Rc<AstNode> {
        self.root
    }

    pub fn size(&self) -> usize {
        self.root.size()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_xy() -> Rc<AstNode> {
        AstNode::op(
            "Ite",
            vec![
                AstNode::op("Lt", vec![AstNode::term("x"), AstNode::term("y")]),
                AstNode::term("y"),
                AstNode::term("x"),
            ],
        )
    }

    #[test]
    fn size_counts_every_node() {
        assert_eq!(AstNode::term("x").size(), 1);
        assert_eq!(max_xy().size(), 6);
    }

    #[test]
    fn completeness_spots_buried_placeholders() {
        let open = AstNode::op(
            "Add",
            vec![
                AstNode::term("x"),
                Rc::new(AstNode::leaf(Symbol::non_terminal("E"))),
            ],
        );
        assert!(!open.is_complete());
        assert!(max_xy().is_complete());
    }

    #[test]
    fn display_and_sexpr_renderings() {
        let tree = max_xy();
        assert_eq!(tree.to_string(), "Ite(Lt(x, y), y, x)");
        assert_eq!(tree.to_sexpr(), "(Ite (Lt x y) y x)");
    }

    #[test]
    fn structural_equality_is_exact() {
        let add_xy = AstNode::op("Add", vec![AstNode::term("x"), AstNode::term("y")]);
        let add_yx = AstNode::op("Add", vec![AstNode::term("y"), AstNode::term("x")]);
        assert_eq!(add_xy, add_xy.clone());
        assert_ne!(add_xy, add_yx);
    }
}
