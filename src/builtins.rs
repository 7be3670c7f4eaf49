//! Host-provided functions.
//!
//! Builtins live in a fixed registry, not in the environment: identifier
//! lookup consults the registry only after the environment chain misses, so
//! user bindings can shadow a builtin.  A builtin receives its already
//! evaluated arguments and never sees the environment.

use std::fmt;

use crate::eval::{RuntimeError, Value};

#[derive(Clone, Copy)]
pub struct Builtin {
    name: &'static str,
    func: fn(&[Value]) -> Result<Value, RuntimeError>,
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, RuntimeError> {
        (self.func)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

const REGISTRY: [Builtin; 1] = [Builtin {
    name: "len",
    func: builtin_len,
}];

/// Return the builtin registered under `name`, if any.
pub fn lookup(name: &str) -> Option<Builtin> {
    REGISTRY.iter().find(|b| b.name == name).copied()
}

/// `len(s)`: length of a string in characters, not bytes.
fn builtin_len(args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::BuiltinWrongArity("len"));
    }
    match &args[0] {
        Value::Str(s) => Ok(Value::Integer(s.chars().count() as i64)),
        _ => Err(RuntimeError::BuiltinBadArgument("len")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_len() {
        let b = lookup("len").expect("len should be registered");
        assert_eq!(b.name(), "len");
    }

    #[test]
    fn lookup_misses_unknown_names() {
        assert!(lookup("first").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn len_counts_characters() -> Result<(), RuntimeError> {
        let b = lookup("len").unwrap();
        assert_eq!(b.call(&[Value::Str("Hello".to_string())])?, Value::Integer(5));
        assert_eq!(b.call(&[Value::Str("héllo".to_string())])?, Value::Integer(5));
        assert_eq!(b.call(&[Value::Str(String::new())])?, Value::Integer(0));
        Ok(())
    }

    #[test]
    fn len_rejects_wrong_arity() {
        let b = lookup("len").unwrap();
        match b.call(&[]) {
            Err(e @ RuntimeError::BuiltinWrongArity(_)) => {
                assert_eq!(e.to_string(), "unexpected number of args for len");
            }
            r => panic!("unexpected output: {:?}", r),
        }
        match b.call(&[Value::Str("a".to_string()), Value::Str("b".to_string())]) {
            Err(RuntimeError::BuiltinWrongArity(_)) => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn len_rejects_non_strings() {
        let b = lookup("len").unwrap();
        match b.call(&[Value::Integer(1)]) {
            Err(RuntimeError::BuiltinBadArgument(_)) => (),
            r => panic!("unexpected output: {:?}", r),
        }
        match b.call(&[Value::Array(vec![Value::Integer(1)])]) {
            Err(RuntimeError::BuiltinBadArgument(_)) => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }
}
