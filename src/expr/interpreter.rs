//! Tree-walking evaluator over [`Expr`] (spec §4.4, §9 design note: no external
//! expression-engine crate — a compiled AST plus a direct recursive evaluator).
use super::ast::{BinaryOp, Expr, UnaryOp};
use super::env::Environment;
use super::value::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unbound variable: {0}")]
    UnboundVariable(String),
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },
    #[error("result did not evaluate to a string")]
    NonStringResult,
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Float(_) => "float",
        Value::Bool(_) => "bool",
        Value::Str(_) => "string",
    }
}

pub fn eval(expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
    match expr {
        Expr::Number(n) => Ok(Value::Float(*n)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Var(name) => env
            .get(name)
            .map(Value::Float)
            .ok_or_else(|| EvalError::UnboundVariable(name.clone())),
        Expr::Unary { op, expr } => {
            let v = eval(expr, env)?;
            match op {
                UnaryOp::Neg => {
                    let f = as_f64(&v)?;
                    Ok(Value::Float(-f))
                }
            }
        }
        Expr::Binary { op, lhs, rhs } => {
            let l = eval(lhs, env)?;
            let r = eval(rhs, env)?;
            eval_binary(*op, l, r)
        }
        Expr::Ternary {
            cond,
            then_branch,
            else_branch,
        } => {
            let c = eval(cond, env)?;
            let b = as_bool(&c)?;
            if b {
                eval(then_branch, env)
            } else {
                eval(else_branch, env)
            }
        }
    }
}

fn as_f64(v: &Value) -> Result<f64, EvalError> {
    v.as_f64().ok_or_else(|| EvalError::TypeMismatch {
        expected: "float",
        found: type_name(v),
    })
}

fn as_bool(v: &Value) -> Result<bool, EvalError> {
    v.as_bool().ok_or_else(|| EvalError::TypeMismatch {
        expected: "bool",
        found: type_name(v),
    })
}

fn eval_binary(op: BinaryOp, l: Value, r: Value) -> Result<Value, EvalError> {
    use BinaryOp::*;
    match op {
        Add | Sub | Mul | Div => {
            let a = as_f64(&l)?;
            let b = as_f64(&r)?;
            let result = match op {
                Add => a + b,
                Sub => a - b,
                Mul => a * b,
                Div => a / b,
                _ => unreachable!(),
            };
            Ok(Value::Float(result))
        }
        Lt | Le | Gt | Ge => {
            let a = as_f64(&l)?;
            let b = as_f64(&r)?;
            let result = match op {
                Lt => a < b,
                Le => a <= b,
                Gt => a > b,
                Ge => a >= b,
                _ => unreachable!(),
            };
            Ok(Value::Bool(result))
        }
        Eq => Ok(Value::Bool(l == r)),
        Ne => Ok(Value::Bool(l != r)),
    }
}

/// Parses and evaluates `src` against `env`, requiring the final value to be a string
/// (the decoded strategy's output is always an order string, spec §4.4).
pub fn eval_to_string(src: &str, env: &Environment) -> Result<String, EvalError> {
    let expr = super::parser::parse(src).map_err(EvalError::Parse)?;
    let value = eval(&expr, env)?;
    match value {
        Value::Str(s) => Ok(s),
        _ => Err(EvalError::NonStringResult),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_arithmetic() {
        let expr = super::super::parser::parse("1 + 2 * 3").unwrap();
        assert_eq!(eval(&expr, &Environment::new()), Ok(Value::Float(7.0)));
    }

    #[test]
    fn ternary_selects_branch_by_condition() {
        let mut env = Environment::new();
        env.bind("$RSI", 80.0);
        let out = eval_to_string(r#"$RSI > 70 ? "SELL" : "HOLD""#, &env).unwrap();
        assert_eq!(out, "SELL");

        env.bind("$RSI", 10.0);
        let out = eval_to_string(r#"$RSI > 70 ? "SELL" : "HOLD""#, &env).unwrap();
        assert_eq!(out, "HOLD");
    }

    #[test]
    fn unbound_variable_is_an_error() {
        let expr = super::super::parser::parse("$MISSING + 1").unwrap();
        assert_eq!(
            eval(&expr, &Environment::new()),
            Err(EvalError::UnboundVariable("$MISSING".to_string()))
        );
    }

    #[test]
    fn non_string_result_is_rejected() {
        let env = Environment::new();
        assert_eq!(
            eval_to_string("1 + 1", &env),
            Err(EvalError::NonStringResult)
        );
    }
}
