//! Read-eval-print loop. Reads lines from an input stream; for each
//! line, lexes, parses, evaluates against a persistent environment, and
//! writes the result's `inspect()` form. Parser errors are printed with
//! a banner and abort evaluation of that line (spec §6).

use std::io::{BufRead, Write};

use crate::environment::Environment;
use crate::evaluator::eval_program;
use crate::lexer::Lexer;
use crate::parser::Parser;

const PROMPT: &str = ">> ";

const MONKEY_FACE: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

pub fn start(
    mut input: impl BufRead,
    mut output: impl Write,
    trace: bool,
) -> std::io::Result<()> {
    let env = Environment::new();
    let mut line = String::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let lexer = Lexer::new(&line);
        let mut parser = Parser::new(lexer).with_trace(trace);
        let program = parser.parse_program();

        if !parser.errors().is_empty() {
            print_parser_errors(&mut output, parser.errors())?;
            continue;
        }

        let result = eval_program(&program, &env);
        writeln!(output, "{}", result.inspect())?;
    }
}

fn print_parser_errors(output: &mut impl Write, errors: &[String]) -> std::io::Result<()> {
    writeln!(output, "{MONKEY_FACE}")?;
    writeln!(output, "Woops! We ran into some monkey business here!")?;
    writeln!(output, " parser errors:")?;
    for error in errors {
        writeln!(output, "\t{error}")?;
    }
    Ok(())
}
