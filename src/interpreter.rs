//! API to control the interpreter.

use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::eval::{self, Env};
use crate::parser::Parser;

pub use crate::diag::ParseError;
pub use crate::eval::{RuntimeError, Value};

/// Tree-walk interpreter with a persistent top-level environment.
///
/// # Example
///
/// Invoke the interpreter a first time to define a closure, then additional
/// times to call it; bindings persist across invocations:
///
/// ```
/// # use rmonkey::interpreter::{Interpreter, MonkeyError};
///
/// let mut interp = Interpreter::new();
///
/// interp.eval("let newAdder = fn(x) { fn(y) { x + y; }; };")?;
/// interp.eval("let addTwo = newAdder(2);")?;
///
/// let result = interp.eval("addTwo(5);")?;
/// assert_eq!(result.to_string(), "7");
/// # Ok::<(), MonkeyError>(())
/// ```
#[derive(Debug)]
pub struct Interpreter {
    globals: Rc<Env>,
}

/// Errors the interpreter can raise.
#[derive(Debug)]
pub enum MonkeyError {
    /// Errors collected during parsing.  Evaluation was not attempted.
    Parse(Vec<ParseError>),

    /// Error occurring during evaluation.
    Runtime(RuntimeError),
}

impl fmt::Display for MonkeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonkeyError::Parse(errors) => {
                let messages = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>();
                write!(f, "Parser errors: {}", messages.join("\n"))
            }
            MonkeyError::Runtime(e) => write!(f, "{}", e),
        }
    }
}

impl Error for MonkeyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MonkeyError::Parse(_) => None,
            MonkeyError::Runtime(e) => Some(e),
        }
    }
}

impl From<RuntimeError> for MonkeyError {
    fn from(e: RuntimeError) -> MonkeyError {
        MonkeyError::Runtime(e)
    }
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter {
            globals: Env::new(),
        }
    }

    /// Lex, parse, and evaluate `source` against the persistent top-level
    /// environment.  If the parser collected any errors the program is not
    /// evaluated.
    pub fn eval(&mut self, source: &str) -> Result<Value, MonkeyError> {
        let prg = Parser::new(source).parse_program();
        if !prg.errors.is_empty() {
            return Err(MonkeyError::Parse(prg.errors));
        }
        let value = eval::eval_program(&prg, &self.globals)?;
        Ok(value)
    }
}
