//! PlayScript pipeline: runs a source file through every stage.
//!
//! ```text
//! Source → Tokenizer → Parser → Enter → RefResolver → Interpreter → output + value
//! ```
//!
//! Front-end problems are collected, not fatal: the program is still
//! interpreted (unless configured otherwise) with error statements skipped
//! and unresolved references evaluating to `undefined`.
//!
//! ```
//! let outcome = play_pipeline::run("let x = 2; println(x * 3);");
//! assert_eq!(outcome.output, ["6"]);
//! ```

pub mod config;

pub use config::{ConfigError, RunConfig};

use play_eval::{evaluate, EvalError, Value};
use play_lexer::tokenize;
use play_parser::Parser;
use play_semantic::analyze;
use play_types::{Diagnostics, SourceFile};

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Lexical, syntactic and reference diagnostics, in that order.
    pub diagnostics: Diagnostics,
    /// Lines printed by `println`.
    pub output: Vec<String>,
    /// Value of the last top-level statement. `None` when interpretation
    /// failed or was skipped.
    pub value: Option<Value>,
    pub error: Option<EvalError>,
}

impl RunOutcome {
    /// `true` when no stage reported a problem.
    pub fn is_clean(&self) -> bool {
        !self.diagnostics.has_errors() && self.error.is_none()
    }
}

/// Run `source` with the default configuration.
pub fn run(source: &str) -> RunOutcome {
    Pipeline::default().run(&RunConfig::default().file_name, source)
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: RunConfig,
}

impl Pipeline {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run `source` as the file `name`.
    pub fn run(&self, name: &str, source: &str) -> RunOutcome {
        let source_file = SourceFile::new(name, source);

        let mut diagnostics = Diagnostics::with_limit(self.config.max_diagnostics);
        let lexed = tokenize(&source_file);
        diagnostics.extend(lexed.diagnostics);

        let parsed = Parser::new(lexed.tokens, &source_file)
            .with_diagnostics(diagnostics)
            .parse();
        let program = parsed.program;
        let mut diagnostics = parsed.diagnostics;

        let analysis = analyze(&program, &source_file);
        diagnostics.extend(analysis.diagnostics);

        if diagnostics.has_errors() && !self.config.interpret_with_errors {
            log::debug!(
                "{name}: {} front-end errors, interpretation skipped",
                diagnostics.total_errors
            );
            return RunOutcome {
                diagnostics,
                output: Vec::new(),
                value: None,
                error: None,
            };
        }

        let evaluation = evaluate(&program, self.config.interpreter());
        let (value, error) = match evaluation.result {
            Ok(value) => (Some(value), None),
            Err(err) => (None, Some(err)),
        };
        log::debug!(
            "{name}: {} diagnostics, {} output lines, failed: {}",
            diagnostics.total_errors,
            evaluation.output.len(),
            error.is_some()
        );
        RunOutcome {
            diagnostics,
            output: evaluation.output,
            value,
            error,
        }
    }
}
