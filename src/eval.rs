//! Tree-walk evaluator.

use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::ast::{Block, Expr, InfixOp, PrefixOp, Program, Stmt};
use crate::builtins::{self, Builtin};

#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Nil,
    Integer(i64),
    Bool(bool),
    Str(String),
    Array(Vec<Value>),
    Function(Function),
    Builtin(Builtin),
}

/// A user function together with the environment captured at its point of
/// definition.
#[derive(Clone)]
pub struct Function {
    params: Vec<String>,
    body: Block,
    env: Rc<Env>,
}

// The captured environment can refer back to the function itself, so Debug
// must not descend into it.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
            && self.body == other.body
            && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl Value {
    /// `false` and nil are falsy; everything else, including `0`, the empty
    /// string, and the empty array, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Array(elements) => {
                let elements = elements.iter().map(|e| e.to_string()).collect::<Vec<_>>();
                write!(f, "[{}]", elements.join(","))
            }
            Value::Function(func) => {
                write!(f, "fn({})\n{}", func.params.join(", "), func.body)
            }
            Value::Builtin(b) => write!(f, "builtin function {}", b.name()),
        }
    }
}

/// How evaluation of a node finished: with an ordinary value, or with a
/// `return` propagating outward.  Errors travel on the `Err` leg of the
/// surrounding `Result`.
#[derive(Debug, PartialEq)]
enum Flow {
    Value(Value),
    Return(Value),
}

#[derive(Debug, PartialEq)]
pub enum RuntimeError {
    UnknownIdentifier(String),
    UnknownPrefixOperator(PrefixOp, String),
    UnknownInfixOperator(InfixOp, String, String),
    DivByZero,
    BadNumberOfArguments,
    NotCallable(String),
    FunctionArgs(Box<RuntimeError>),
    BadIndexTarget(String),
    BadIndexType(String),
    BuiltinWrongArity(&'static str),
    BuiltinBadArgument(&'static str),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UnknownIdentifier(name) => {
                write!(f, "identifier not found: {}", name)
            }
            RuntimeError::UnknownPrefixOperator(op, right) => {
                write!(f, "unknown operator: {} for {}", op, right)
            }
            RuntimeError::UnknownInfixOperator(op, left, right) => {
                write!(
                    f,
                    "unknown operator: {} for left: {} and right: {}",
                    op, left, right
                )
            }
            RuntimeError::DivByZero => write!(f, "division by zero"),
            RuntimeError::BadNumberOfArguments => write!(f, "bad number of arguments"),
            RuntimeError::NotCallable(value) => write!(f, "{} is not a function", value),
            RuntimeError::FunctionArgs(e) => {
                write!(f, "error evaluating function args: {}", e)
            }
            RuntimeError::BadIndexTarget(value) => {
                write!(f, "unknow access operation for {}", value)
            }
            RuntimeError::BadIndexType(value) => {
                write!(f, "cannot access array using {}", value)
            }
            RuntimeError::BuiltinWrongArity(name) => {
                write!(f, "unexpected number of args for {}", name)
            }
            RuntimeError::BuiltinBadArgument(name) => {
                write!(f, "argument for {} not supported", name)
            }
        }
    }
}

impl Error for RuntimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RuntimeError::FunctionArgs(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

/// One frame of lexically-scoped bindings.
///
/// Frames are shared: a function value keeps its defining frame alive, and
/// several closures may hang off the same parent, so frames live behind `Rc`
/// and mutate through `RefCell`.
#[derive(Debug)]
pub struct Env {
    parent: Option<Rc<Env>>,
    bindings: RefCell<HashMap<String, Value>>,
}

impl Env {
    pub(crate) fn new() -> Rc<Env> {
        Rc::new(Env {
            parent: None,
            bindings: RefCell::new(HashMap::new()),
        })
    }

    fn with_parent(parent: Rc<Env>) -> Rc<Env> {
        Rc::new(Env {
            parent: Some(parent),
            bindings: RefCell::new(HashMap::new()),
        })
    }

    /// Look `name` up in this frame, then walk the parent chain.
    fn get(&self, name: &str) -> Option<Value> {
        match self.bindings.borrow().get(name) {
            Some(v) => Some(v.clone()),
            None => self.parent.as_ref().and_then(|p| p.get(name)),
        }
    }

    /// Bind `name` in this frame.  Never walks up; rebinding an existing name
    /// overwrites it.
    fn set(&self, name: &str, val: Value) {
        self.bindings.borrow_mut().insert(name.to_string(), val);
    }
}

/// Evaluate a whole program.  A `return` at program level yields its value
/// and stops; otherwise the result is the value of the last statement.
pub fn eval_program(program: &Program, env: &Rc<Env>) -> Result<Value, RuntimeError> {
    let mut result = Value::Nil;
    for stmt in &program.statements {
        match eval_stmt(stmt, env)? {
            Flow::Return(v) => return Ok(v),
            Flow::Value(v) => result = v,
        }
    }
    Ok(result)
}

/// Evaluate a block.  A propagating `Return` short-circuits the remaining
/// statements and escapes to the caller; this is how `return` inside nested
/// `if` arms exits the enclosing function.
fn eval_block(block: &Block, env: &Rc<Env>) -> Result<Flow, RuntimeError> {
    let mut result = Value::Nil;
    for stmt in &block.0 {
        match eval_stmt(stmt, env)? {
            ret @ Flow::Return(_) => return Ok(ret),
            Flow::Value(v) => result = v,
        }
    }
    Ok(Flow::Value(result))
}

fn eval_stmt(stmt: &Stmt, env: &Rc<Env>) -> Result<Flow, RuntimeError> {
    match stmt {
        Stmt::Let(name, value) => match eval_expr(value, env)? {
            Flow::Value(v) => {
                env.set(name, v);
                Ok(Flow::Value(Value::Nil))
            }
            ret => Ok(ret),
        },
        Stmt::Return(value) => match eval_expr(value, env)? {
            Flow::Value(v) => Ok(Flow::Return(v)),
            ret => Ok(ret),
        },
        Stmt::Expr(expr) => eval_expr(expr, env),
    }
}

fn eval_expr(expr: &Expr, env: &Rc<Env>) -> Result<Flow, RuntimeError> {
    match expr {
        Expr::Int(n) => Ok(Flow::Value(Value::Integer(*n))),
        Expr::Bool(b) => Ok(Flow::Value(Value::Bool(*b))),
        Expr::Str(s) => Ok(Flow::Value(Value::Str(s.clone()))),
        Expr::Identifier(name) => {
            if let Some(val) = env.get(name) {
                Ok(Flow::Value(val))
            } else if let Some(builtin) = builtins::lookup(name) {
                Ok(Flow::Value(Value::Builtin(builtin)))
            } else {
                Err(RuntimeError::UnknownIdentifier(name.clone()))
            }
        }
        Expr::Prefix(op, right) => {
            let operand = match eval_expr(right, env)? {
                Flow::Value(v) => v,
                ret => return Ok(ret),
            };
            Ok(Flow::Value(eval_prefix(*op, operand)?))
        }
        Expr::Infix(op, left, right) => {
            let lhs = match eval_expr(left, env)? {
                Flow::Value(v) => v,
                ret => return Ok(ret),
            };
            let rhs = match eval_expr(right, env)? {
                Flow::Value(v) => v,
                ret => return Ok(ret),
            };
            Ok(Flow::Value(eval_infix(*op, lhs, rhs)?))
        }
        Expr::If(condition, then_block, else_block) => {
            let cond = match eval_expr(condition, env)? {
                Flow::Value(v) => v,
                ret => return Ok(ret),
            };
            if cond.is_truthy() {
                eval_block(then_block, env)
            } else if let Some(alt) = else_block {
                eval_block(alt, env)
            } else {
                Ok(Flow::Value(Value::Nil))
            }
        }
        Expr::Function(params, body) => Ok(Flow::Value(Value::Function(Function {
            params: params.clone(),
            body: body.clone(),
            env: env.clone(),
        }))),
        Expr::Call(function, args) => {
            let callee = match eval_expr(function, env)? {
                Flow::Value(v) => v,
                ret => return Ok(ret),
            };
            let mut evaluated = Vec::with_capacity(args.len());
            for arg in args {
                match eval_expr(arg, env) {
                    Ok(Flow::Value(v)) => evaluated.push(v),
                    Ok(ret) => return Ok(ret),
                    Err(e) => return Err(RuntimeError::FunctionArgs(Box::new(e))),
                }
            }
            eval_call(callee, evaluated)
        }
        Expr::Array(elements) => {
            let mut evaluated = Vec::with_capacity(elements.len());
            for element in elements {
                match eval_expr(element, env)? {
                    Flow::Value(v) => evaluated.push(v),
                    ret => return Ok(ret),
                }
            }
            Ok(Flow::Value(Value::Array(evaluated)))
        }
        Expr::Index(array, index) => {
            let target = match eval_expr(array, env)? {
                Flow::Value(v) => v,
                ret => return Ok(ret),
            };
            let index = match eval_expr(index, env)? {
                Flow::Value(v) => v,
                ret => return Ok(ret),
            };
            Ok(Flow::Value(eval_index(target, index)?))
        }
    }
}

fn eval_prefix(op: PrefixOp, operand: Value) -> Result<Value, RuntimeError> {
    match op {
        PrefixOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        PrefixOp::Neg => match operand {
            Value::Integer(n) => Ok(Value::Integer(-n)),
            v => Err(RuntimeError::UnknownPrefixOperator(op, v.to_string())),
        },
    }
}

fn eval_infix(op: InfixOp, lhs: Value, rhs: Value) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(op, l, r),
        (Value::Str(l), Value::Str(r)) if op == InfixOp::Add => Ok(Value::Str(l + &r)),
        // Equality is structural and never fails; operands of different kinds
        // are simply never equal.
        (l, r) => match op {
            InfixOp::Eq => Ok(Value::Bool(l == r)),
            InfixOp::NotEq => Ok(Value::Bool(l != r)),
            _ => Err(RuntimeError::UnknownInfixOperator(
                op,
                l.to_string(),
                r.to_string(),
            )),
        },
    }
}

fn eval_integer_infix(op: InfixOp, l: i64, r: i64) -> Result<Value, RuntimeError> {
    match op {
        InfixOp::Add => Ok(Value::Integer(l + r)),
        InfixOp::Sub => Ok(Value::Integer(l - r)),
        InfixOp::Mul => Ok(Value::Integer(l * r)),
        InfixOp::Div => {
            if r == 0 {
                Err(RuntimeError::DivByZero)
            } else {
                Ok(Value::Integer(l / r))
            }
        }
        InfixOp::Less => Ok(Value::Bool(l < r)),
        InfixOp::Greater => Ok(Value::Bool(l > r)),
        InfixOp::Eq => Ok(Value::Bool(l == r)),
        InfixOp::NotEq => Ok(Value::Bool(l != r)),
    }
}

/// Apply a callee to already-evaluated arguments.
///
/// A user function runs its body in a fresh frame whose parent is the
/// function's captured environment, and a propagating `Return` is unwrapped
/// here: it never crosses a call boundary.
fn eval_call(callee: Value, args: Vec<Value>) -> Result<Flow, RuntimeError> {
    match callee {
        Value::Function(func) => {
            if args.len() != func.params.len() {
                return Err(RuntimeError::BadNumberOfArguments);
            }
            let frame = Env::with_parent(func.env.clone());
            for (param, arg) in func.params.iter().zip(args) {
                frame.set(param, arg);
            }
            match eval_block(&func.body, &frame)? {
                Flow::Return(v) | Flow::Value(v) => Ok(Flow::Value(v)),
            }
        }
        Value::Builtin(builtin) => Ok(Flow::Value(builtin.call(&args)?)),
        other => Err(RuntimeError::NotCallable(other.to_string())),
    }
}

fn eval_index(target: Value, index: Value) -> Result<Value, RuntimeError> {
    match target {
        Value::Array(elements) => match index {
            Value::Integer(i) => {
                if i < 0 || i as usize >= elements.len() {
                    Ok(Value::Nil)
                } else {
                    Ok(elements[i as usize].clone())
                }
            }
            other => Err(RuntimeError::BadIndexType(other.to_string())),
        },
        other => Err(RuntimeError::BadIndexTarget(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn eval_source(input: &str) -> Result<Value, RuntimeError> {
        let prg = Parser::new(input).parse_program();
        assert_eq!(prg.errors, vec![], "parse errors for {:?}", input);
        eval_program(&prg, &Env::new())
    }

    #[test]
    fn integer_arithmetic() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("5")?, Value::Integer(5));
        assert_eq!(eval_source("5 + 5 + 5 + 5 - 10")?, Value::Integer(10));
        assert_eq!(eval_source("2 * 2 * 2 * 2 * 2")?, Value::Integer(32));
        assert_eq!(eval_source("50 / 2 * 2 - 10")?, Value::Integer(40));
        assert_eq!(eval_source("3 * (3 * 3) + 10")?, Value::Integer(37));
        assert_eq!(eval_source("7 / 2")?, Value::Integer(3));
        Ok(())
    }

    #[test]
    fn unary_minus() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("-5")?, Value::Integer(-5));
        assert_eq!(eval_source("--5")?, Value::Integer(5));
        Ok(())
    }

    #[test]
    fn boolean_operators() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("1 < 2")?, Value::Bool(true));
        assert_eq!(eval_source("1 > 2")?, Value::Bool(false));
        assert_eq!(eval_source("1 == 1")?, Value::Bool(true));
        assert_eq!(eval_source("1 != 1")?, Value::Bool(false));
        assert_eq!(eval_source("(1 < 2) == true")?, Value::Bool(true));
        assert_eq!(eval_source("true != false")?, Value::Bool(true));
        Ok(())
    }

    #[test]
    fn bang_follows_truthiness() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("!true")?, Value::Bool(false));
        assert_eq!(eval_source("!5")?, Value::Bool(false));
        assert_eq!(eval_source("!!5")?, Value::Bool(true));
        assert_eq!(eval_source("!0")?, Value::Bool(false));
        Ok(())
    }

    #[test]
    fn zero_and_empty_values_are_truthy() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("if (0) { 1 } else { 2 }")?, Value::Integer(1));
        assert_eq!(
            eval_source("if (\"\") { 1 } else { 2 }")?,
            Value::Integer(1)
        );
        assert_eq!(eval_source("if ([]) { 1 } else { 2 }")?, Value::Integer(1));
        Ok(())
    }

    #[test]
    fn if_else_expressions() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_source("if (1 > 2) { 10 } else { 20 }")?,
            Value::Integer(20)
        );
        assert_eq!(
            eval_source("if (1 < 2) { 10 } else { 20 }")?,
            Value::Integer(10)
        );
        assert_eq!(eval_source("if (false) { 10 }")?, Value::Nil);
        Ok(())
    }

    #[test]
    fn return_stops_program() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("return 10; 9;")?, Value::Integer(10));
        assert_eq!(eval_source("9; return 2 * 5; 9;")?, Value::Integer(10));
        Ok(())
    }

    #[test]
    fn return_escapes_nested_blocks() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_source("if (10 > 1) { if (true) { return 10; } return 1; }")?,
            Value::Integer(10)
        );
        Ok(())
    }

    #[test]
    fn return_does_not_cross_call_boundary() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_source("let f = fn() { return 1; 2 }; f(); 3")?,
            Value::Integer(3)
        );
        Ok(())
    }

    #[test]
    fn let_binds_and_evaluates_to_nil() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("let a = 5;")?, Value::Nil);
        assert_eq!(eval_source("let a = 5; a;")?, Value::Integer(5));
        assert_eq!(eval_source("let a = 5 * 5; a;")?, Value::Integer(25));
        assert_eq!(eval_source("let a = 5; let b = a; b;")?, Value::Integer(5));
        Ok(())
    }

    #[test]
    fn let_rebinding_overwrites() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_source("let a = 1; let a = a + 1; a")?,
            Value::Integer(2)
        );
        Ok(())
    }

    #[test]
    fn function_application() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_source("let identity = fn(x) { x; }; identity(5);")?,
            Value::Integer(5)
        );
        assert_eq!(
            eval_source("let identity = fn(x) { return x; }; identity(5);")?,
            Value::Integer(5)
        );
        assert_eq!(
            eval_source("let double = fn(x) { x * 2; }; double(5);")?,
            Value::Integer(10)
        );
        assert_eq!(
            eval_source("let add = fn(x, y) { x + y; }; add(5, add(5, 5));")?,
            Value::Integer(15)
        );
        assert_eq!(eval_source("fn(x) { x; }(5)")?, Value::Integer(5));
        Ok(())
    }

    #[test]
    fn parameters_shadow_outer_bindings() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_source("let x = 5; let f = fn(x) { x }; f(10)")?,
            Value::Integer(10)
        );
        assert_eq!(
            eval_source("let x = 5; let f = fn(x) { x }; f(10); x")?,
            Value::Integer(5)
        );
        Ok(())
    }

    #[test]
    fn closures_capture_their_environment() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_source(
                "let newAdder = fn(x) { fn(y) { x + y; }; }; \
                 let addTwo = newAdder(2); \
                 addTwo(5);"
            )?,
            Value::Integer(7)
        );
        Ok(())
    }

    #[test]
    fn closures_share_a_parent_frame() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_source(
                "let make = fn(x) { [fn() { x }, fn(y) { x + y }] }; \
                 let pair = make(10); \
                 pair[0]() + pair[1](1)"
            )?,
            Value::Integer(21)
        );
        Ok(())
    }

    #[test]
    fn string_concatenation() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_source("\"foo\" + \"bar\"")?,
            Value::Str("foobar".to_string())
        );
        Ok(())
    }

    #[test]
    fn string_equality_is_structural() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("\"a\" == \"a\"")?, Value::Bool(true));
        assert_eq!(eval_source("\"a\" != \"b\"")?, Value::Bool(true));
        Ok(())
    }

    #[test]
    fn values_of_different_kinds_are_never_equal() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("1 == \"1\"")?, Value::Bool(false));
        assert_eq!(eval_source("true != 1")?, Value::Bool(true));
        Ok(())
    }

    #[test]
    fn array_literals_and_access() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_source("[1, 2 * 2, 3 + 3]")?,
            Value::Array(vec![
                Value::Integer(1),
                Value::Integer(4),
                Value::Integer(6)
            ])
        );
        assert_eq!(
            eval_source("[1, 2, 2 + 2, \"foo\", true][2]")?,
            Value::Integer(4)
        );
        assert_eq!(
            eval_source("let a = [1, 2, 3]; a[0] + a[1] + a[2]")?,
            Value::Integer(6)
        );
        Ok(())
    }

    #[test]
    fn array_access_out_of_bounds_is_nil() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("[1, 2, 3][3]")?, Value::Nil);
        assert_eq!(eval_source("[1, 2, 3][-1]")?, Value::Nil);
        Ok(())
    }

    #[test]
    fn identifier_not_found() {
        match eval_source("foobar") {
            Err(RuntimeError::UnknownIdentifier(name)) if name == "foobar" => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn unary_minus_on_bool() {
        match eval_source("-true") {
            Err(e @ RuntimeError::UnknownPrefixOperator(..)) => {
                assert_eq!(e.to_string(), "unknown operator: - for true");
            }
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn mixed_operand_arithmetic_fails() {
        match eval_source("5 + true") {
            Err(e @ RuntimeError::UnknownInfixOperator(..)) => {
                assert_eq!(
                    e.to_string(),
                    "unknown operator: + for left: 5 and right: true"
                );
            }
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn error_aborts_evaluation() {
        match eval_source("5 + true; 5;") {
            Err(RuntimeError::UnknownInfixOperator(..)) => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn division_by_zero() {
        match eval_source("5 / 0") {
            Err(RuntimeError::DivByZero) => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn calling_a_non_function() {
        match eval_source("let x = 5; x(1)") {
            Err(e @ RuntimeError::NotCallable(_)) => {
                assert_eq!(e.to_string(), "5 is not a function");
            }
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn argument_errors_are_wrapped() {
        match eval_source("len(foo)") {
            Err(e @ RuntimeError::FunctionArgs(_)) => {
                assert_eq!(
                    e.to_string(),
                    "error evaluating function args: identifier not found: foo"
                );
            }
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn call_with_bad_number_of_arguments() {
        match eval_source("fn(x) { x }(1, 2)") {
            Err(RuntimeError::BadNumberOfArguments) => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn access_on_non_array() {
        match eval_source("5[0]") {
            Err(e @ RuntimeError::BadIndexTarget(_)) => {
                assert_eq!(e.to_string(), "unknow access operation for 5");
            }
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn access_with_non_integer_index() {
        match eval_source("[1, 2][true]") {
            Err(e @ RuntimeError::BadIndexType(_)) => {
                assert_eq!(e.to_string(), "cannot access array using true");
            }
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn builtin_len() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("len(\"Hello\")")?, Value::Integer(5));
        assert_eq!(eval_source("len(\"\")")?, Value::Integer(0));
        Ok(())
    }

    #[test]
    fn builtin_len_rejects_other_types() {
        match eval_source("len(1)") {
            Err(e @ RuntimeError::BuiltinBadArgument(_)) => {
                assert_eq!(e.to_string(), "argument for len not supported");
            }
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn bindings_can_shadow_builtins() -> Result<(), RuntimeError> {
        assert_eq!(eval_source("let len = 1; len")?, Value::Integer(1));
        Ok(())
    }

    #[test]
    fn evaluation_is_deterministic() -> Result<(), RuntimeError> {
        let input = "let f = fn(x) { if (x > 3) { x } else { f(x + 1) } }; f(0)";
        assert_eq!(eval_source(input)?, eval_source(input)?);
        Ok(())
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Integer(-3).to_string(), "-3");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Str("hi".to_string()).to_string(), "\"hi\"");
        assert_eq!(
            Value::Array(vec![
                Value::Integer(1),
                Value::Str("two".to_string()),
                Value::Bool(true)
            ])
            .to_string(),
            "[1,\"two\",true]"
        );
    }

    #[test]
    fn function_display() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_source("fn(x, y) { x + y; }")?.to_string(),
            "fn(x, y)\n{ (x + y) }"
        );
        Ok(())
    }

    #[test]
    fn eval_prefix_directly() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_prefix(PrefixOp::Neg, Value::Integer(2))?,
            Value::Integer(-2)
        );
        assert_eq!(
            eval_prefix(PrefixOp::Not, Value::Nil)?,
            Value::Bool(true)
        );
        Ok(())
    }

    #[test]
    fn eval_infix_directly() -> Result<(), RuntimeError> {
        assert_eq!(
            eval_infix(InfixOp::Add, Value::Integer(1), Value::Integer(2))?,
            Value::Integer(3)
        );
        assert_eq!(
            eval_infix(InfixOp::Eq, Value::Nil, Value::Nil)?,
            Value::Bool(true)
        );
        Ok(())
    }
}
