//! PlayScript tree-walking interpreter.
//!
//! Executes a resolved [`Program`] directly from the AST. Name resolution
//! must have run first: variables and calls are looked up through the
//! declaration links the semantic pass wrote, never by name.
//!
//! Runtime faults (arithmetic traps, operand type mismatches, runaway
//! recursion) abort the run with an [`EvalError`]; output printed before
//! the fault is kept.

mod env;
mod error;
mod interpreter;
mod value;

pub use env::Environment;
pub use error::{EvalError, EvalResult};
pub use interpreter::{Evaluated, Interpreter, InterpreterConfig, DEFAULT_MAX_CALL_DEPTH};
pub use value::Value;

use play_types::ast::Program;

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Value of the last top-level statement, or the fault that stopped the run.
    pub result: EvalResult<Value>,
    /// Lines printed by `println`, in order.
    pub output: Vec<String>,
}

/// Interpret `program` with a fresh environment.
pub fn evaluate(program: &Program, config: InterpreterConfig) -> Evaluation {
    let mut interpreter = Interpreter::new(config);
    let result = interpreter.run(program);
    let output = interpreter.take_output();
    match &result {
        Ok(value) => log::debug!("evaluated to {value}, {} output line(s)", output.len()),
        Err(err) => log::debug!("evaluation stopped: {err}"),
    }
    Evaluation { result, output }
}
