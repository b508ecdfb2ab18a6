//! A small ternary/arithmetic/comparison expression language (spec §4.4): the
//! decoded yield of a genome's derivation tree is source text in this language,
//! compiled once and evaluated once per simulated round.
pub mod ast;
pub mod env;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod value;

pub use env::Environment;
pub use interpreter::{eval, eval_to_string, EvalError};

/// A parsed, reusable program. Decoding a genome happens once per individual per
/// generation; compiling here up front avoids re-lexing/re-parsing on every round of
/// every simulated market (spec §4.4, §5 performance note).
#[derive(Debug, Clone)]
pub struct Program {
    expr: ast::Expr,
}

impl Program {
    pub fn compile(src: &str) -> Result<Self, EvalError> {
        let expr = parser::parse(src).map_err(EvalError::Parse)?;
        Ok(Self { expr })
    }

    pub fn eval(&self, env: &Environment) -> Result<value::Value, EvalError> {
        interpreter::eval(&self.expr, env)
    }

    pub fn eval_to_string(&self, env: &Environment) -> Result<String, EvalError> {
        match self.eval(env)? {
            value::Value::Str(s) => Ok(s),
            _ => Err(EvalError::NonStringResult),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_program_is_reusable_across_environments() {
        let program = Program::compile(r#"$RSI > 70 ? "SELL" : "HOLD""#).unwrap();

        let mut env = Environment::new();
        env.bind("$RSI", 90.0);
        assert_eq!(program.eval_to_string(&env).unwrap(), "SELL");

        env.bind("$RSI", 5.0);
        assert_eq!(program.eval_to_string(&env).unwrap(), "HOLD");
    }
}
