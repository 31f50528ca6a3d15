//! AST node definitions.
//!
//! This module contains every AST node the parser produces: two disjoint
//! node families (statements and expressions) plus the canonical
//! string-rendering operation tests and the `quote` builtin rely on.

use crate::token::Token;

/// AST root — an ordered sequence of top-level statements, the parser's
/// output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn string(&self) -> String {
        self.statements.iter().map(Statement::string).collect()
    }
}

// =============================================================================
// STATEMENTS
// =============================================================================

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
}

impl Statement {
    pub fn string(&self) -> String {
        match self {
            Statement::Let(node) => node.string(),
            Statement::Return(node) => node.string(),
            Statement::Expression(node) => node.string(),
            Statement::Block(node) => node.string(),
        }
    }
}

/// `let <name> = <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

impl LetStatement {
    pub fn string(&self) -> String {
        format!(
            "{} {} = {};",
            self.token.literal,
            self.name.string(),
            self.value.string()
        )
    }
}

/// `return <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub return_value: Expression,
}

impl ReturnStatement {
    pub fn string(&self) -> String {
        format!("{} {};", self.token.literal, self.return_value.string())
    }
}

/// A bare expression used as a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

impl ExpressionStatement {
    pub fn string(&self) -> String {
        self.expression.string()
    }
}

/// `{ <statements> }` — the body of a function, `if`, or `else` branch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn string(&self) -> String {
        self.statements.iter().map(Statement::string).collect()
    }
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    BooleanLiteral(BooleanLiteral),
    StringLiteral(StringLiteral),
    ArrayLiteral(ArrayLiteral),
    HashLiteral(HashLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    FunctionLiteral(FunctionLiteral),
    Call(CallExpression),
    Index(IndexExpression),
}

impl Expression {
    pub fn string(&self) -> String {
        match self {
            Expression::Identifier(node) => node.string(),
            Expression::IntegerLiteral(node) => node.string(),
            Expression::BooleanLiteral(node) => node.string(),
            Expression::StringLiteral(node) => node.string(),
            Expression::ArrayLiteral(node) => node.string(),
            Expression::HashLiteral(node) => node.string(),
            Expression::Prefix(node) => node.string(),
            Expression::Infix(node) => node.string(),
            Expression::If(node) => node.string(),
            Expression::FunctionLiteral(node) => node.string(),
            Expression::Call(node) => node.string(),
            Expression::Index(node) => node.string(),
        }
    }
}

/// A bare name, e.g. `x` in `let x = 5;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn new(token: Token, value: impl Into<String>) -> Self {
        Self {
            token,
            value: value.into(),
        }
    }

    pub fn string(&self) -> String {
        self.value.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl IntegerLiteral {
    pub fn string(&self) -> String {
        self.token.literal.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl BooleanLiteral {
    pub fn string(&self) -> String {
        self.token.literal.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

impl StringLiteral {
    pub fn string(&self) -> String {
        self.token.literal.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

impl ArrayLiteral {
    pub fn string(&self) -> String {
        let elements: Vec<String> = self.elements.iter().map(Expression::string).collect();
        format!("[{}]", elements.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashLiteral {
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
}

impl HashLiteral {
    pub fn string(&self) -> String {
        let pairs: Vec<String> = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}:{}", k.string(), v.string()))
            .collect();
        format!("{{{}}}", pairs.join(", "))
    }
}

/// `<operator><right>`, e.g. `-5`, `!true`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

impl PrefixExpression {
    pub fn string(&self) -> String {
        format!("({}{})", self.operator, self.right.string())
    }
}

/// `<left> <operator> <right>`, e.g. `5 + 5`.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
}

impl InfixExpression {
    pub fn string(&self) -> String {
        format!(
            "({} {} {})",
            self.left.string(),
            self.operator,
            self.right.string()
        )
    }
}

/// `if (<condition>) <consequence> else <alternative>`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

impl IfExpression {
    pub fn string(&self) -> String {
        let mut out = format!(
            "if{} {}",
            self.condition.string(),
            self.consequence.string()
        );
        if let Some(alt) = &self.alternative {
            out.push_str(&format!("else {}", alt.string()));
        }
        out
    }
}

/// `fn(<parameters>) <body>`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

impl FunctionLiteral {
    pub fn string(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(Identifier::string).collect();
        format!(
            "{}({}) {}",
            self.token.literal,
            params.join(", "),
            self.body.string()
        )
    }
}

/// `<function>(<arguments>)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl CallExpression {
    pub fn string(&self) -> String {
        let args: Vec<String> = self.arguments.iter().map(Expression::string).collect();
        format!("{}({})", self.function.string(), args.join(", "))
    }
}

/// `<left>[<index>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

impl IndexExpression {
    pub fn string(&self) -> String {
        format!("({}[{}])", self.left.string(), self.index.string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn program_string_concatenates_statements() {
        let program = Program::new(vec![Statement::Let(LetStatement {
            token: Token::new(TokenKind::Let, "let"),
            name: Identifier::new(Token::new(TokenKind::Ident, "myVar"), "myVar"),
            value: Expression::Identifier(Identifier::new(
                Token::new(TokenKind::Ident, "anotherVar"),
                "anotherVar",
            )),
        })]);

        assert_eq!(program.string(), "let myVar = anotherVar;");
    }
}
