use clap::{Parser as ClapParser, Subcommand};
use differentiator::{Error, Expression, context_from_pairs, parse, parse_assignment};
use std::process::ExitCode;

#[derive(ClapParser)]
#[command(version, about)]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate an expression with the given variable values.
    Eval {
        /// The expression to evaluate
        #[arg(allow_hyphen_values = true)]
        expression: String,
        /// Variable values, as <name>=<value>
        assignments: Vec<String>,
    },
    /// Differentiate an expression with respect to a variable.
    Diff {
        /// The expression to differentiate
        #[arg(allow_hyphen_values = true)]
        expression: String,
        #[arg(value_parser = ["by"], hide_possible_values = true)]
        by: String,
        /// The variable to differentiate with respect to
        variable: String,
    },
}

fn eval(expression: &str, assignments: &[String]) -> Result<String, Error> {
    let tree: Expression<f64> = parse(expression)?;
    let pairs = assignments
        .iter()
        .map(|token| parse_assignment::<f64>(token))
        .collect::<Result<Vec<_>, _>>()?;
    let value = tree.eval(&context_from_pairs(pairs))?;
    Ok(value.to_string())
}

fn diff(expression: &str, variable: &str) -> Result<String, Error> {
    let tree: Expression<f64> = parse(expression)?;
    Ok(tree.diff(variable))
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    let result = match &args.command {
        Command::Eval {
            expression,
            assignments,
        } => eval(expression, assignments),
        Command::Diff {
            expression,
            variable,
            ..
        } => diff(expression, variable),
    };
    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
