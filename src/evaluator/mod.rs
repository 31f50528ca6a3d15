//! The tree-walking evaluator. `eval` dispatches on AST node variant and
//! value variant; `Error`/`ReturnValue` are first-class values checked
//! at every composition point rather than host exceptions.
mod quote_unquote;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{Expression, Program, Statement};
use crate::builtins::lookup_builtin;
use crate::environment::Environment;
use crate::object::{new_error, FunctionValue, HashValue, Value};

pub use quote_unquote::quote;

pub fn eval_program(program: &Program, env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = Value::Null;

    for statement in &program.statements {
        result = eval_statement(statement, env);

        match result {
            Value::ReturnValue(inner) => return (*inner).clone(),
            Value::Error(_) => return result,
            _ => {}
        }
    }

    result
}

fn eval_block_statement(statements: &[Statement], env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = Value::Null;

    for statement in statements {
        result = eval_statement(statement, env);

        if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &Rc<RefCell<Environment>>) -> Value {
    match statement {
        Statement::Expression(stmt) => eval_expression(&stmt.expression, env),
        Statement::Return(stmt) => {
            let value = eval_expression(&stmt.return_value, env);
            if value.is_error() {
                return value;
            }
            Value::ReturnValue(Rc::new(value))
        }
        Statement::Let(stmt) => {
            let value = eval_expression(&stmt.value, env);
            if value.is_error() {
                return value;
            }
            env.borrow_mut().set(stmt.name.value.clone(), value);
            Value::Null
        }
        Statement::Block(block) => eval_block_statement(&block.statements, env),
    }
}

pub fn eval_expression(expression: &Expression, env: &Rc<RefCell<Environment>>) -> Value {
    match expression {
        Expression::IntegerLiteral(lit) => Value::Integer(lit.value),
        Expression::BooleanLiteral(lit) => Value::Boolean(lit.value),
        Expression::StringLiteral(lit) => Value::String(Rc::new(lit.value.clone())),
        Expression::Identifier(ident) => eval_identifier(&ident.value, env),
        Expression::Prefix(expr) => {
            let right = eval_expression(&expr.right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(&expr.operator, &right)
        }
        Expression::Infix(expr) => {
            let left = eval_expression(&expr.left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(&expr.right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(&expr.operator, &left, &right)
        }
        Expression::If(expr) => {
            let condition = eval_expression(&expr.condition, env);
            if condition.is_error() {
                return condition;
            }
            if condition.is_truthy() {
                eval_block_statement(&expr.consequence.statements, env)
            } else if let Some(alt) = &expr.alternative {
                eval_block_statement(&alt.statements, env)
            } else {
                Value::Null
            }
        }
        Expression::FunctionLiteral(lit) => Value::Function(Rc::new(FunctionValue {
            parameters: lit.parameters.clone(),
            body: lit.body.clone(),
            env: env.clone(),
        })),
        Expression::Call(expr) => {
            if let Expression::Identifier(ident) = expr.function.as_ref() {
                if ident.value == "quote" {
                    return match expr.arguments.first() {
                        Some(arg) => quote(arg.clone(), env),
                        None => new_error("wrong number of arguments, got 0 want 1"),
                    };
                }
            }

            let function = eval_expression(&expr.function, env);
            if function.is_error() {
                return function;
            }

            let args = match eval_expressions(&expr.arguments, env) {
                Ok(args) => args,
                Err(err) => return err,
            };

            apply_function(&function, &args)
        }
        Expression::ArrayLiteral(lit) => match eval_expressions(&lit.elements, env) {
            Ok(elements) => Value::Array(Rc::new(RefCell::new(elements))),
            Err(err) => err,
        },
        Expression::HashLiteral(lit) => eval_hash_literal(lit, env),
        Expression::Index(expr) => {
            let left = eval_expression(&expr.left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(&expr.index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(&left, &index)
        }
    }
}

fn eval_expressions(
    exprs: &[Expression],
    env: &Rc<RefCell<Environment>>,
) -> Result<Vec<Value>, Value> {
    let mut result = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        result.push(value);
    }
    Ok(result)
}

fn eval_identifier(name: &str, env: &Rc<RefCell<Environment>>) -> Value {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(builtin) = lookup_builtin(name) {
        return Value::Builtin(builtin);
    }
    new_error(format!("identifier not found: {name}"))
}

fn eval_prefix_expression(operator: &str, right: &Value) -> Value {
    match operator {
        "!" => Value::Boolean(!right.is_truthy()),
        "-" => match right {
            Value::Integer(i) => Value::Integer(-i),
            other => new_error(format!("unknown operator: -{}", other.type_tag())),
        },
        _ => new_error(format!("unknown operator: {operator}{}", right.type_tag())),
    }
}

fn eval_infix_expression(operator: &str, left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::String(l), Value::String(r)) => eval_string_infix(operator, l, r),
        (Value::Boolean(l), Value::Boolean(r)) => match operator {
            "==" => Value::Boolean(l == r),
            "!=" => Value::Boolean(l != r),
            _ => new_error(format!(
                "unknown operator: {} {operator} {}",
                left.type_tag(),
                right.type_tag()
            )),
        },
        _ if left.type_tag() != right.type_tag() => new_error(format!(
            "type mismatch: {} {operator} {}",
            left.type_tag(),
            right.type_tag()
        )),
        _ => new_error(format!(
            "unknown operator: {} {operator} {}",
            left.type_tag(),
            right.type_tag()
        )),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left + right),
        "-" => Value::Integer(left - right),
        "*" => Value::Integer(left * right),
        "/" => {
            if right == 0 {
                new_error("division by zero")
            } else {
                Value::Integer(left / right)
            }
        }
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        _ => new_error(format!("unknown operator: INTEGER {operator} INTEGER")),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Value {
    match operator {
        "+" => Value::String(Rc::new(format!("{left}{right}"))),
        _ => new_error(format!("unknown operator: STRING {operator} STRING")),
    }
}

fn eval_hash_literal(
    lit: &crate::ast::HashLiteral,
    env: &Rc<RefCell<Environment>>,
) -> Value {
    let mut pairs = HashMap::new();

    for (key_expr, value_expr) in &lit.pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }

        let Some(hash_key) = key.hash_key() else {
            return new_error(format!("unusable as hash key: {}", key.type_tag()));
        };

        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }

        pairs.insert(hash_key, (key, value));
    }

    Value::Hash(Rc::new(HashValue {
        pairs: RefCell::new(pairs),
    }))
}

fn eval_index_expression(left: &Value, index: &Value) -> Value {
    match (left, index) {
        (Value::Array(elements), Value::Integer(idx)) => {
            let elements = elements.borrow();
            if *idx < 0 || *idx as usize >= elements.len() {
                Value::Null
            } else {
                elements[*idx as usize].clone()
            }
        }
        (Value::Hash(hash), key) => {
            let Some(hash_key) = key.hash_key() else {
                return new_error(format!("unusable as hash key: {}", key.type_tag()));
            };
            match hash.pairs.borrow().get(&hash_key) {
                Some((_, value)) => value.clone(),
                None => Value::Null,
            }
        }
        _ => new_error(format!(
            "index operator not supported: {}",
            left.type_tag()
        )),
    }
}

fn apply_function(function: &Value, args: &[Value]) -> Value {
    match function {
        Value::Function(func) => {
            let call_env = extend_function_env(func, args);
            let evaluated = eval_block_statement(&func.body.statements, &call_env);
            unwrap_return_value(evaluated)
        }
        Value::Builtin(builtin) => builtin(args),
        other => new_error(format!("not a function: {}", other.type_tag())),
    }
}

fn extend_function_env(func: &FunctionValue, args: &[Value]) -> Rc<RefCell<Environment>> {
    let env = Environment::new_enclosed(func.env.clone());

    for (param, arg) in func.parameters.iter().zip(args.iter()) {
        env.borrow_mut().set(param.value.clone(), arg.clone());
    }

    env
}

fn unwrap_return_value(value: Value) -> Value {
    match value {
        Value::ReturnValue(inner) => (*inner).clone(),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn eval(input: &str) -> Value {
        let lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "{:?}", parser.errors());
        let env = Environment::new();
        eval_program(&program, &env)
    }

    #[test]
    fn integer_expressions() {
        let cases = [
            ("5", 5),
            ("10", 10),
            ("-5", -5),
            ("-10", -10),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("5 * 2 + 10", 20),
            ("5 + 2 * 10", 25),
            ("20 + 2 * -10", 0),
            ("50 / 2 * 2 + 10", 60),
            ("2 * (5 + 10)", 30),
            ("3 * 3 * 3 + 10", 37),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
        ];
        for (input, expected) in cases {
            let Value::Integer(i) = eval(input) else {
                panic!("expected integer for {input}")
            };
            assert_eq!(i, expected, "input: {input}");
        }
    }

    #[test]
    fn boolean_expressions() {
        let cases = [
            ("true", true),
            ("false", false),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("true == true", true),
            ("true != false", true),
            ("(1 < 2) == true", true),
        ];
        for (input, expected) in cases {
            let Value::Boolean(b) = eval(input) else {
                panic!("expected boolean for {input}")
            };
            assert_eq!(b, expected, "input: {input}");
        }
    }

    #[test]
    fn bang_operator() {
        let cases = [
            ("!true", false),
            ("!false", true),
            ("!5", false),
            ("!!true", true),
            ("!!5", true),
        ];
        for (input, expected) in cases {
            let Value::Boolean(b) = eval(input) else {
                panic!("expected boolean for {input}")
            };
            assert_eq!(b, expected, "input: {input}");
        }
    }

    #[test]
    fn if_else_truthiness_matches_spec() {
        assert_eq!(eval("if (1) { 10 }").inspect(), "10");
        assert_eq!(eval("if (true) { 10 }").inspect(), "10");
        assert_eq!(eval("if (false) { 10 }").inspect(), "null");
        assert_eq!(eval("if (1 < 2) { 10 }").inspect(), "10");
        assert_eq!(eval("if (1 > 2) { 10 }").inspect(), "null");
        assert_eq!(eval("if (1 > 2) { 10 } else { 20 }").inspect(), "20");
    }

    #[test]
    fn return_statements() {
        let cases = [
            ("return 10;", "10"),
            ("return 10; 9;", "10"),
            ("return 2 * 5; 9;", "10"),
            ("9; return 2 * 5; 9;", "10"),
            (
                "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
                "10",
            ),
            (
                "let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);",
                "20",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(eval(input).inspect(), expected, "input: {input}");
        }
    }

    #[test]
    fn error_handling() {
        let cases = [
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { true + false; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            ("foobar", "identifier not found: foobar"),
            (
                r#""Hello" - "World""#,
                "unknown operator: STRING - STRING",
            ),
            (
                r#"{"name": "Monkey"}[fn(x) { x }];"#,
                "unusable as hash key: FUNCTION",
            ),
        ];
        for (input, expected) in cases {
            let Value::Error(message) = eval(input) else {
                panic!("expected error for {input}, got {:?}", eval(input).inspect())
            };
            assert_eq!(message.as_str(), expected, "input: {input}");
        }
    }

    #[test]
    fn let_statements() {
        let cases = [
            ("let a = 5; a;", 5),
            ("let a = 5 * 5; a;", 25),
            ("let a = 5; let b = a; b;", 5),
            ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
        ];
        for (input, expected) in cases {
            let Value::Integer(i) = eval(input) else {
                panic!("expected integer for {input}")
            };
            assert_eq!(i, expected, "input: {input}");
        }
    }

    #[test]
    fn function_application_and_closures() {
        assert_eq!(eval("let identity = fn(x) { x; }; identity(5);").inspect(), "5");
        assert_eq!(
            eval("let identity = fn(x) { return x; }; identity(5);").inspect(),
            "5"
        );
        assert_eq!(eval("let double = fn(x) { x * 2; }; double(5);").inspect(), "10");
        assert_eq!(eval("let add = fn(x, y) { x + y; }; add(5, 5);").inspect(), "10");
        assert_eq!(
            eval("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));").inspect(),
            "20"
        );
        assert_eq!(eval("fn(x) { x; }(5)").inspect(), "5");
        assert_eq!(
            eval(
                "let newAdder = fn(x) { fn(y) { x + y }; }; \
                 let addTwo = newAdder(2); addTwo(2);"
            )
            .inspect(),
            "4"
        );
    }

    #[test]
    fn call_with_excess_args_ignores_extras() {
        assert_eq!(eval("let f = fn(x) { x; }; f(1, 2, 3);").inspect(), "1");
    }

    #[test]
    fn call_with_missing_args_errors_on_use() {
        let result = eval("let f = fn(x, y) { x + y; }; f(1);");
        let Value::Error(message) = result else {
            panic!("expected error")
        };
        assert_eq!(message.as_str(), "identifier not found: y");
    }

    #[test]
    fn string_literals_and_concatenation() {
        assert_eq!(eval(r#""Hello World!""#).inspect(), "Hello World!");
        assert_eq!(
            eval(r#"let greeting = "Hello" + " " + "World!"; greeting"#).inspect(),
            "Hello World!"
        );
    }

    #[test]
    fn array_literals_and_indexing() {
        assert_eq!(
            eval("[1, 2 * 2, 3 + 3]").inspect(),
            "[1, 4, 6]"
        );
        assert_eq!(eval("[1, 2, 3][0]").inspect(), "1");
        assert_eq!(eval("[1, 2, 3][2]").inspect(), "3");
        assert_eq!(eval("[1, 2, 3][3]").inspect(), "null");
        assert_eq!(eval("[1, 2, 3][-1]").inspect(), "null");
    }

    #[test]
    fn hash_literals_and_indexing() {
        let input = r#"let two = "two";
{
    "one": 10 - 9,
    two: 1 + 1,
    "thr" + "ee": 6 / 2,
    4: 4,
    true: 5,
    false: 6
}"#;
        let result = eval(input);
        let Value::Hash(hash) = result else {
            panic!("expected hash")
        };
        assert_eq!(hash.pairs.borrow().len(), 6);

        assert_eq!(
            eval(r#"{"one": 10 - 9, "two": 1 + 1, 4: 4, true: 5, false: 6}[true]"#).inspect(),
            "5"
        );
        assert_eq!(eval(r#"{"foo": 5}["bar"]"#).inspect(), "null");
    }

}
