//! `quote`/`unquote`: a pre-evaluation AST rewrite recognized by the
//! call evaluator. `quote(expr)` does not evaluate `expr`; instead it
//! walks `expr` replacing every `unquote(...)` call with the AST form of
//! that call's (evaluated) argument, then wraps the rewritten tree as a
//! `Quote` value.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{
    ArrayLiteral, BlockStatement, BooleanLiteral, CallExpression, Expression, ExpressionStatement,
    HashLiteral, Identifier, IfExpression, IndexExpression, InfixExpression, IntegerLiteral,
    LetStatement, PrefixExpression, ReturnStatement, Statement,
};
use crate::environment::Environment;
use crate::object::Value;
use crate::token::{Token, TokenKind};

use super::eval_expression;

pub fn quote(expr: Expression, env: &Rc<RefCell<Environment>>) -> Value {
    let rewritten = eval_unquote_calls(expr, env);
    Value::Quote(Rc::new(rewritten))
}

fn eval_unquote_calls(node: Expression, env: &Rc<RefCell<Environment>>) -> Expression {
    match node {
        Expression::Call(call) if is_unquote_call(&call) => {
            match call.arguments.into_iter().next() {
                Some(arg) => {
                    let value = eval_expression(&arg, env);
                    convert_value_to_expression(&value)
                }
                None => Expression::Identifier(Identifier::new(
                    Token::new(TokenKind::Ident, "unquote"),
                    "unquote",
                )),
            }
        }
        Expression::Prefix(expr) => Expression::Prefix(PrefixExpression {
            token: expr.token,
            operator: expr.operator,
            right: Box::new(eval_unquote_calls(*expr.right, env)),
        }),
        Expression::Infix(expr) => Expression::Infix(InfixExpression {
            token: expr.token,
            left: Box::new(eval_unquote_calls(*expr.left, env)),
            operator: expr.operator,
            right: Box::new(eval_unquote_calls(*expr.right, env)),
        }),
        Expression::Index(expr) => Expression::Index(IndexExpression {
            token: expr.token,
            left: Box::new(eval_unquote_calls(*expr.left, env)),
            index: Box::new(eval_unquote_calls(*expr.index, env)),
        }),
        Expression::If(expr) => Expression::If(IfExpression {
            token: expr.token,
            condition: Box::new(eval_unquote_calls(*expr.condition, env)),
            consequence: modify_block(expr.consequence, env),
            alternative: expr.alternative.map(|block| modify_block(block, env)),
        }),
        Expression::ArrayLiteral(lit) => Expression::ArrayLiteral(ArrayLiteral {
            token: lit.token,
            elements: lit
                .elements
                .into_iter()
                .map(|e| eval_unquote_calls(e, env))
                .collect(),
        }),
        Expression::HashLiteral(lit) => Expression::HashLiteral(HashLiteral {
            token: lit.token,
            pairs: lit
                .pairs
                .into_iter()
                .map(|(k, v)| (eval_unquote_calls(k, env), eval_unquote_calls(v, env)))
                .collect(),
        }),
        Expression::Call(call) => Expression::Call(CallExpression {
            token: call.token,
            function: Box::new(eval_unquote_calls(*call.function, env)),
            arguments: call
                .arguments
                .into_iter()
                .map(|a| eval_unquote_calls(a, env))
                .collect(),
        }),
        other => other,
    }
}

fn modify_block(block: BlockStatement, env: &Rc<RefCell<Environment>>) -> BlockStatement {
    BlockStatement {
        statements: block
            .statements
            .into_iter()
            .map(|stmt| modify_statement(stmt, env))
            .collect(),
    }
}

fn modify_statement(statement: Statement, env: &Rc<RefCell<Environment>>) -> Statement {
    match statement {
        Statement::Expression(stmt) => Statement::Expression(ExpressionStatement {
            token: stmt.token,
            expression: eval_unquote_calls(stmt.expression, env),
        }),
        Statement::Return(stmt) => Statement::Return(ReturnStatement {
            token: stmt.token,
            return_value: eval_unquote_calls(stmt.return_value, env),
        }),
        Statement::Let(stmt) => Statement::Let(LetStatement {
            token: stmt.token,
            name: stmt.name,
            value: eval_unquote_calls(stmt.value, env),
        }),
        Statement::Block(block) => Statement::Block(modify_block(block, env)),
    }
}

fn is_unquote_call(call: &CallExpression) -> bool {
    matches!(call.function.as_ref(), Expression::Identifier(ident) if ident.value == "unquote")
}

/// Convert an evaluated value back into the AST node that represents it,
/// for splicing into the quoted tree in place of an `unquote(...)` call.
fn convert_value_to_expression(value: &Value) -> Expression {
    match value {
        Value::Integer(i) => Expression::IntegerLiteral(IntegerLiteral {
            token: Token::new(TokenKind::Int, i.to_string()),
            value: *i,
        }),
        Value::Boolean(b) => {
            let token = if *b {
                Token::new(TokenKind::True, "true")
            } else {
                Token::new(TokenKind::False, "false")
            };
            Expression::BooleanLiteral(BooleanLiteral { token, value: *b })
        }
        Value::Quote(node) => (**node).clone(),
        other => Expression::Identifier(Identifier::new(
            Token::new(TokenKind::Illegal, ""),
            format!("<unquotable: {}>", other.type_tag()),
        )),
    }
}
