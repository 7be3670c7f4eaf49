use std::fmt;

use crate::diag::ParseError;

/// Result of parsing one source text.
///
/// `errors` is empty exactly when every token was consumed into a well-formed
/// statement; otherwise `statements` holds whatever parsed cleanly.
#[derive(Debug, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub errors: Vec<ParseError>,
}

// TODO: store function bodies behind Rc so evaluating a function literal does
// not clone the whole block.
#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    Let(String, Expr),
    Return(Expr),
    Expr(Expr),
}

/// A `{ … }` statement list, as used by `if` arms and function bodies.
#[derive(Debug, PartialEq, Clone)]
pub struct Block(pub Vec<Stmt>);

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Identifier(String),
    Int(i64),
    Bool(bool),
    Str(String),
    Prefix(PrefixOp, Box<Expr>),
    Infix(InfixOp, Box<Expr>, Box<Expr>),
    If(Box<Expr>, Block, Option<Block>),
    Function(Vec<String>, Block),
    Call(Box<Expr>, Vec<Expr>),
    Array(Vec<Expr>),
    Index(Box<Expr>, Box<Expr>),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOp {
    Not,
    Neg,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOp {
    Eq,
    NotEq,
    Less,
    Greater,
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Not => write!(f, "!"),
            PrefixOp::Neg => write!(f, "-"),
        }
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfixOp::Eq => write!(f, "=="),
            InfixOp::NotEq => write!(f, "!="),
            InfixOp::Less => write!(f, "<"),
            InfixOp::Greater => write!(f, ">"),
            InfixOp::Add => write!(f, "+"),
            InfixOp::Sub => write!(f, "-"),
            InfixOp::Mul => write!(f, "*"),
            InfixOp::Div => write!(f, "/"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let(name, value) => write!(f, "let {} = {};", name, value),
            Stmt::Return(value) => write!(f, "return {};", value),
            Stmt::Expr(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for stmt in &self.0 {
            write!(f, " {}", stmt)?;
        }
        write!(f, " }}")
    }
}

/// The classic fully-parenthesized form: `(a + (b * c))`, `(!(-a))`, ….
///
/// Reparsing the printed form yields the same tree: grouping parentheses have
/// no node of their own, string literals print quoted, and `if` conditions
/// print inside `( … )`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(name) => write!(f, "{}", name),
            Expr::Int(n) => write!(f, "{}", n),
            Expr::Bool(b) => write!(f, "{}", b),
            Expr::Str(s) => write!(f, "\"{}\"", s),
            Expr::Prefix(op, right) => write!(f, "({}{})", op, right),
            Expr::Infix(op, left, right) => write!(f, "({} {} {})", left, op, right),
            Expr::If(cond, then_block, else_block) => {
                write!(f, "if ({}) {}", cond, then_block)?;
                if let Some(alt) = else_block {
                    write!(f, "else {}", alt)?;
                }
                Ok(())
            }
            Expr::Function(params, body) => {
                write!(f, "fn({}) {}", params.join(", "), body)
            }
            Expr::Call(function, args) => {
                let args = args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
                write!(f, "{}({})", function, args.join(", "))
            }
            Expr::Array(elements) => {
                let elements = elements.iter().map(|e| e.to_string()).collect::<Vec<_>>();
                write!(f, "[{}]", elements.join(", "))
            }
            Expr::Index(array, index) => write!(f, "({}[{}])", array, index),
        }
    }
}
