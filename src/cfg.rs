use std::collections::HashMap;
use std::fmt;

/// A grammar symbol: either a concrete operator/literal/variable name,
/// or a category that still needs expansion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
}

impl Symbol {
    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol::Terminal(name.into())
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => name,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One way to expand a category: `lhs ::= operator(args...)`.
/// A leaf production has an empty argument list.
#[derive(Debug, Clone)]
pub struct Production {
    pub lhs: Symbol,
    pub operator: Symbol,
    pub args: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: Symbol, operator: Symbol, args: Vec<Symbol>) -> Self {
        Self { lhs, operator, args }
    }
}

/// A context-free grammar: a start category plus the ordered productions
/// of every category. Immutable once built.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: Symbol,
    rules: HashMap<String, Vec<Production>>,
}

impl Grammar {
    pub fn new(start: Symbol, productions: Vec<Production>) -> Self {
        let mut rules: HashMap<String, Vec<Production>> = HashMap::new();
        for prod in productions {
            rules.entry(prod.lhs.name().to_owned()).or_default().push(prod);
        }
        Self { start, rules }
    }

    pub fn start(&self) -> &Symbol {
        &self.start
    }

    /// The productions of a category, in declaration order. Unknown
    /// categories have none.
    pub fn productions(&self, category: &str) -> &[Production] {
        self.rules.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The fixed two-sorted arithmetic grammar:
    /// `E ::= Ite(B, E, E) | Add(E, E) | Multiply(E, E) | x | y | z | 1 | 2 | 3`
    /// `B ::= Lt(E, E) | Eq(E, E) | And(B, B) | Or(B, B) | Not(B)`
    pub fn arith() -> Self {
        let e = || Symbol::non_terminal("E");
        let b = || Symbol::non_terminal("B");
        let t = Symbol::terminal;

        let mut prods = vec![
            Production::new(e(), t("Ite"), vec![b(), e(), e()]),
            Production::new(e(), t("Add"), vec![e(), e()]),
            Production::new(e(), t("Multiply"), vec![e(), e()]),
        ];
        for leaf in ["x", "y", "z", "1", "2", "3"] {
            prods.push(Production::new(e(), t(leaf), vec![]));
        }
        prods.push(Production::new(b(), t("Lt"), vec![e(), e()]));
        prods.push(Production::new(b(), t("Eq"), vec![e(), e()]));
        prods.push(Production::new(b(), t("And"), vec![b(), b()]));
        prods.push(Production::new(b(), t("Or"), vec![b(), b()]));
        prods.push(Production::new(b(), t("Not"), vec![b()]));

        Grammar::new(e(), prods)
    }
}
