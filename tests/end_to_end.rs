//! End-to-end scenarios straight from the language's scenario list:
//! source text in, evaluated `inspect()` form out.

use monkey_lang::environment::Environment;
use monkey_lang::evaluator::eval_program;
use monkey_lang::lexer::Lexer;
use monkey_lang::parser::Parser;

fn run(input: &str) -> String {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
    let env = Environment::new();
    eval_program(&program, &env).inspect()
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(run("(5 + 10 * 2 + 15 / 3) * 2 + -10"), "50");
}

#[test]
fn early_return_from_nested_blocks() {
    assert_eq!(
        run("let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);"),
        "20"
    );
}

#[test]
fn closures_capture_their_defining_environment() {
    assert_eq!(
        run("let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(2);"),
        "4"
    );
}

#[test]
fn errors_propagate_through_nested_if_blocks() {
    assert_eq!(
        run("if (10 > 1) { if (10 > 1) { return true + false; } return 1; }"),
        "ERROR: unknown operator: BOOLEAN + BOOLEAN"
    );
}

#[test]
fn builtins_len_first_rest() {
    assert_eq!(run(r#"len("hello world")"#), "11");
    assert_eq!(run("first([27])"), "27");
    assert_eq!(run("rest([1,2,3])"), "[2, 3]");
}

#[test]
fn quote_rewrites_unquote_calls_before_wrapping() {
    assert_eq!(run("quote(8 + unquote(4 + 4))"), "QUOTE((8 + 8))");
}

#[test]
fn hash_literal_lookup_by_boolean_key() {
    assert_eq!(
        run(r#"{"one": 10-9, "two": 1+1, 4: 4, true: 5, false: 6}[true]"#),
        "5"
    );
}

#[test]
fn fibonacci_via_recursive_function_literal() {
    let input = r#"
let fib = fn(n) {
    if (n < 2) {
        n
    } else {
        fib(n - 1) + fib(n - 2)
    }
};
fib(10);
"#;
    assert_eq!(run(input), "55");
}

#[test]
fn map_and_reduce_over_arrays_via_recursion_and_push() {
    let input = r#"
let map = fn(arr, f) {
    let iter = fn(arr, accumulated) {
        if (len(arr) == 0) {
            accumulated
        } else {
            iter(rest(arr), push(accumulated, f(first(arr))))
        }
    };
    iter(arr, [])
};
let double = fn(x) { x * 2 };
map([1, 2, 3, 4], double);
"#;
    assert_eq!(run(input), "[2, 4, 6, 8]");
}

#[test]
fn let_bindings_cannot_be_mutated_only_shadowed_in_inner_scope() {
    let input = r#"
let x = 5;
let printer = fn() {
    let x = 10;
    x;
};
printer();
"#;
    assert_eq!(run(input), "10");
    assert_eq!(run("let x = 5; x;"), "5");
}
