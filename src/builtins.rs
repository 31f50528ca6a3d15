//! The fixed table of host-implemented functions bound in the root
//! environment: `len`, `first`, `last`, `rest`, `push`. None have side
//! effects, so evaluation stays referentially transparent (spec §8).

use std::cell::RefCell;
use std::rc::Rc;

use crate::object::{new_error, BuiltinFn, Value};

pub fn lookup_builtin(name: &str) -> Option<BuiltinFn> {
    match name {
        "len" => Some(builtin_len),
        "first" => Some(builtin_first),
        "last" => Some(builtin_last),
        "rest" => Some(builtin_rest),
        "push" => Some(builtin_push),
        _ => None,
    }
}

fn wrong_arity(got: usize, want: usize) -> Value {
    new_error(format!("wrong number of arguments, got {got} want {want}"))
}

fn builtin_len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::String(s) => Value::Integer(s.len() as i64),
        Value::Array(elements) => Value::Integer(elements.borrow().len() as i64),
        other => new_error(format!(
            "argument to 'len' not supported, got {}",
            other.type_tag()
        )),
    }
}

fn builtin_first(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => elements.borrow().first().cloned().unwrap_or(Value::Null),
        other => new_error(format!(
            "argument to 'first' must be ARRAY, got {}",
            other.type_tag()
        )),
    }
}

fn builtin_last(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => elements.borrow().last().cloned().unwrap_or(Value::Null),
        other => new_error(format!(
            "argument to 'last' must be ARRAY, got {}",
            other.type_tag()
        )),
    }
}

fn builtin_rest(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => {
            let elements = elements.borrow();
            if elements.is_empty() {
                Value::Null
            } else {
                Value::Array(Rc::new(RefCell::new(elements[1..].to_vec())))
            }
        }
        other => new_error(format!(
            "argument to 'rest' must be ARRAY, got {}",
            other.type_tag()
        )),
    }
}

fn builtin_push(args: &[Value]) -> Value {
    if args.len() != 2 {
        return wrong_arity(args.len(), 2);
    }
    match &args[0] {
        Value::Array(elements) => {
            let mut new_elements = elements.borrow().clone();
            new_elements.push(args[1].clone());
            Value::Array(Rc::new(RefCell::new(new_elements)))
        }
        other => new_error(format!(
            "argument to 'push' must be ARRAY, got {}",
            other.type_tag()
        )),
    }
}
