//! Tree-walking interpreter over a resolved PlayScript AST.
//!
//! The interpreter is a [`Visitor`] whose result is either a runtime value
//! or a left-value wrapper around the `Variable` node that was evaluated.
//! Consumers that need the value (operators, call arguments, initializers,
//! `println`) dereference it in the current environment.

use std::collections::HashMap;

use play_semantic::PRINTLN;
use play_types::ast::*;
use play_types::visit::{walk_function_decl, Visitor};
use play_types::Literal;

use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::value::Value;

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Result of evaluating one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluated<'ast> {
    Value(Value),
    /// A variable reference, not yet read.
    LeftValue(&'ast Variable),
}

pub struct Interpreter<'ast> {
    config: InterpreterConfig,
    env: Environment,
    functions: HashMap<DeclId, Callee<'ast>>,
    output: Vec<String>,
    call_depth: usize,
}

impl<'ast> Interpreter<'ast> {
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            config,
            env: Environment::new(),
            functions: HashMap::new(),
            output: Vec::new(),
            call_depth: 0,
        }
    }

    /// Execute a program; returns the value of its last top-level statement.
    pub fn run(&mut self, program: &'ast Program) -> EvalResult<Value> {
        self.functions = FunctionIndex::collect(program);
        let result = self.visit_program(program, ())?;
        Ok(self.deref(result))
    }

    /// Lines printed by `println` so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Read a left value from the environment. Unbound and unresolved
    /// variables read as `Undefined`.
    fn deref(&self, evaluated: Evaluated<'ast>) -> Value {
        match evaluated {
            Evaluated::Value(value) => value,
            Evaluated::LeftValue(variable) => variable
                .decl()
                .and_then(|decl| self.env.get(decl))
                .cloned()
                .unwrap_or(Value::Undefined),
        }
    }

    fn eval(&mut self, expr: &'ast Expr) -> EvalResult<Value> {
        let evaluated = self.visit_expr(expr, ())?;
        Ok(self.deref(evaluated))
    }

    /// Run statements in order, stopping at the first error.
    fn exec_stmts(&mut self, stmts: &'ast [Stmt]) -> EvalResult<Evaluated<'ast>> {
        let mut last = Evaluated::Value(Value::Undefined);
        for stmt in stmts {
            last = self.visit_stmt(stmt, ())?;
        }
        Ok(last)
    }

    // ── Calls ─────────────────────────────────────────────────────────────────

    fn println(&mut self, args: &'ast [Expr]) -> EvalResult<Value> {
        let line = match args.first() {
            Some(arg) => self.eval(arg)?.to_string(),
            None => String::new(),
        };
        self.output.push(line);
        Ok(Value::Integer(0))
    }

    fn call_function(&mut self, callee: Callee<'ast>, args: &'ast [Expr]) -> EvalResult<Value> {
        if self.call_depth >= self.config.max_call_depth {
            return Err(EvalError::StackOverflow {
                limit: self.config.max_call_depth,
            });
        }
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg)?);
        }

        self.env.push_frame(callee.decl.id, callee.enclosing);
        self.call_depth += 1;
        let result = self.invoke(callee.decl, values);
        self.call_depth -= 1;
        self.env.pop_frame();
        result
    }

    /// Bind arguments and run the body in the current (fresh) frame.
    fn invoke(&mut self, function: &'ast FunctionDecl, args: Vec<Value>) -> EvalResult<Value> {
        let mut args = args.into_iter();
        for param in function.params() {
            match args.next() {
                Some(value) => self.env.define(param.id, value),
                None => {
                    if let Some(default) = &param.init {
                        let value = self.eval(default)?;
                        self.env.define(param.id, value);
                    }
                }
            }
        }
        let result = self.visit_block(&function.body, ())?;
        Ok(self.deref(result))
    }

    // ── Operators ─────────────────────────────────────────────────────────────

    fn eval_assignment(&mut self, binary: &'ast Binary) -> EvalResult<Value> {
        let target = match self.visit_expr(&binary.left, ())? {
            Evaluated::LeftValue(variable) => variable,
            Evaluated::Value(value) => {
                return Err(EvalError::InvalidAssignment(format!(
                    "cannot assign to a {} value",
                    value.type_name()
                )))
            }
        };

        let value = match binary.op.compound_base() {
            Some(base) => {
                let current = self.deref(Evaluated::LeftValue(target));
                let rhs = self.eval(&binary.right)?;
                self.eval_binary(base, current, rhs)?
            }
            None => self.eval(&binary.right)?,
        };

        // An unresolved target has nowhere to store; the value still flows.
        if let Some(decl) = target.decl() {
            self.env.assign(decl, value.clone());
        }
        Ok(value)
    }

    fn eval_bool(&mut self, expr: &'ast Expr, op: BinaryOp) -> EvalResult<bool> {
        match self.eval(expr)? {
            Value::Boolean(b) => Ok(b),
            other => Err(EvalError::TypeMismatch(format!(
                "'{op}' expects boolean operands, got {}",
                other.type_name()
            ))),
        }
    }

    fn eval_binary(&self, op: BinaryOp, lv: Value, rv: Value) -> EvalResult<Value> {
        match op {
            BinaryOp::Add => match (&lv, &rv) {
                (Value::String(_), _) | (_, Value::String(_)) => {
                    Ok(Value::String(format!("{lv}{rv}")))
                }
                _ => self.eval_arith(op, &lv, &rv),
            },
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
                self.eval_arith(op, &lv, &rv)
            }
            BinaryOp::Eq => Ok(Value::Boolean(lv.loosely_equals(&rv))),
            BinaryOp::NotEq => Ok(Value::Boolean(!lv.loosely_equals(&rv))),
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEq | BinaryOp::GreaterEq => {
                self.eval_comparison(op, &lv, &rv)
            }
            BinaryOp::And | BinaryOp::Or => match (&lv, &rv) {
                (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(if op == BinaryOp::And {
                    *a && *b
                } else {
                    *a || *b
                })),
                _ => Err(self.mismatch(op, &lv, &rv)),
            },
            _ => Err(EvalError::InvalidAssignment(format!(
                "'{op}' cannot be applied to values"
            ))),
        }
    }

    fn eval_arith(&self, op: BinaryOp, lv: &Value, rv: &Value) -> EvalResult<Value> {
        if let (Value::Integer(a), Value::Integer(b)) = (lv, rv) {
            let (a, b) = (*a, *b);
            if b == 0 && matches!(op, BinaryOp::Div | BinaryOp::Rem) {
                return Err(EvalError::ArithmeticTrap(zero_divisor(op).into()));
            }
            let result = match op {
                BinaryOp::Add => a.checked_add(b),
                BinaryOp::Sub => a.checked_sub(b),
                BinaryOp::Mul => a.checked_mul(b),
                BinaryOp::Div => a.checked_div(b),
                _ => a.checked_rem(b),
            };
            return result.map(Value::Integer).ok_or_else(|| {
                EvalError::ArithmeticTrap(format!("integer overflow in {a} {op} {b}"))
            });
        }

        let (Some(a), Some(b)) = (lv.as_f64(), rv.as_f64()) else {
            return Err(self.mismatch(op, lv, rv));
        };
        if b == 0.0 && matches!(op, BinaryOp::Div | BinaryOp::Rem) {
            return Err(EvalError::ArithmeticTrap(zero_divisor(op).into()));
        }
        let result = match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            _ => a % b,
        };
        if !result.is_finite() {
            return Err(EvalError::ArithmeticTrap(format!(
                "{a} {op} {b} produced a non-finite result"
            )));
        }
        Ok(Value::Decimal(result))
    }

    fn eval_comparison(&self, op: BinaryOp, lv: &Value, rv: &Value) -> EvalResult<Value> {
        let ordering = match (lv, rv) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => match (lv.as_f64(), rv.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => return Err(self.mismatch(op, lv, rv)),
            },
        };
        // NaN compares false in every direction
        let Some(ordering) = ordering else {
            return Ok(Value::Boolean(false));
        };
        let result = match op {
            BinaryOp::Less => ordering.is_lt(),
            BinaryOp::Greater => ordering.is_gt(),
            BinaryOp::LessEq => ordering.is_le(),
            _ => ordering.is_ge(),
        };
        Ok(Value::Boolean(result))
    }

    fn mismatch(&self, op: BinaryOp, lv: &Value, rv: &Value) -> EvalError {
        EvalError::TypeMismatch(format!(
            "cannot apply '{op}' to {} and {}",
            lv.type_name(),
            rv.type_name()
        ))
    }
}

fn zero_divisor(op: BinaryOp) -> &'static str {
    if op == BinaryOp::Rem {
        "remainder by zero"
    } else {
        "division by zero"
    }
}

impl<'ast> Visitor<'ast> for Interpreter<'ast> {
    type Output = EvalResult<Evaluated<'ast>>;
    type Extra = ();

    fn empty(&mut self) -> Self::Output {
        Ok(Evaluated::Value(Value::Undefined))
    }

    fn visit_program(&mut self, program: &'ast Program, _: ()) -> Self::Output {
        self.exec_stmts(&program.stmts)
    }

    fn visit_block(&mut self, block: &'ast Block, _: ()) -> Self::Output {
        self.exec_stmts(&block.stmts)
    }

    /// Declaring a function has no effect at run time.
    fn visit_function_decl(&mut self, _decl: &'ast FunctionDecl, _: ()) -> Self::Output {
        self.empty()
    }

    fn visit_variable_decl(&mut self, decl: &'ast VariableDecl, _: ()) -> Self::Output {
        let Some(init) = &decl.init else {
            return self.empty();
        };
        let value = self.eval(init)?;
        self.env.define(decl.id, value.clone());
        Ok(Evaluated::Value(value))
    }

    fn visit_expr_stmt(&mut self, stmt: &'ast ExprStmt, _: ()) -> Self::Output {
        self.eval(&stmt.expr).map(Evaluated::Value)
    }

    fn visit_literal(&mut self, literal: &'ast Literal, _expr: &'ast Expr, _: ()) -> Self::Output {
        Ok(Evaluated::Value(Value::from_literal(literal)))
    }

    fn visit_variable(&mut self, variable: &'ast Variable, _expr: &'ast Expr, _: ()) -> Self::Output {
        Ok(Evaluated::LeftValue(variable))
    }

    fn visit_function_call(
        &mut self,
        call: &'ast FunctionCall,
        _expr: &'ast Expr,
        _: (),
    ) -> Self::Output {
        let value = match call.decl() {
            Some(decl) => match self.functions.get(&decl).copied() {
                Some(callee) => self.call_function(callee, &call.args)?,
                None => Value::Undefined,
            },
            None if call.name.name == PRINTLN => self.println(&call.args)?,
            // Unresolved: reported during resolution, a no-op here.
            None => Value::Undefined,
        };
        Ok(Evaluated::Value(value))
    }

    fn visit_binary(&mut self, binary: &'ast Binary, _expr: &'ast Expr, _: ()) -> Self::Output {
        let op = binary.op;
        let value = match op {
            _ if op.is_assignment() => self.eval_assignment(binary)?,
            BinaryOp::And => {
                let result = self.eval_bool(&binary.left, op)? && self.eval_bool(&binary.right, op)?;
                Value::Boolean(result)
            }
            BinaryOp::Or => {
                let result = self.eval_bool(&binary.left, op)? || self.eval_bool(&binary.right, op)?;
                Value::Boolean(result)
            }
            _ => {
                let lv = self.eval(&binary.left)?;
                let rv = self.eval(&binary.right)?;
                self.eval_binary(op, lv, rv)?
            }
        };
        Ok(Evaluated::Value(value))
    }
}

/// A callable function and the function it is declared in.
#[derive(Debug, Clone, Copy)]
struct Callee<'ast> {
    decl: &'ast FunctionDecl,
    enclosing: Option<DeclId>,
}

/// Maps every function declaration, nested ones included, by its id.
struct FunctionIndex<'ast> {
    functions: HashMap<DeclId, Callee<'ast>>,
}

impl<'ast> FunctionIndex<'ast> {
    fn collect(program: &'ast Program) -> HashMap<DeclId, Callee<'ast>> {
        let mut index = FunctionIndex {
            functions: HashMap::new(),
        };
        index.visit_program(program, None);
        index.functions
    }
}

impl<'ast> Visitor<'ast> for FunctionIndex<'ast> {
    type Output = ();
    /// The function whose body is being walked.
    type Extra = Option<DeclId>;

    fn empty(&mut self) {}

    fn visit_function_decl(&mut self, decl: &'ast FunctionDecl, enclosing: Option<DeclId>) {
        self.functions.insert(decl.id, Callee { decl, enclosing });
        walk_function_decl(self, decl, Some(decl.id));
    }
}
