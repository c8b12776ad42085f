//! crates/cellwire-eval/src/test_support.rs
//! -----------------------------------------
//! Lightweight scripted evaluator for unit/prop tests.
//!
//! The engine treats cell code as opaque text, so exercising it needs *some*
//! host. `ScriptEvaluator` is that host: a tiny line interpreter covering
//! assignments, a few directives, and flat `+`/`-`/`*` expressions. It is a
//! test fixture, not a language; anything a real deployment runs lives on
//! the far side of the [`Evaluator`] trait.
//!
//! Script shape, one statement per line (whole-line `#` comments only):
//! - `x = 1` binds a name
//! - `print y` appends to the captured text
//! - `fail something broke` forces an error outcome, keeping bindings so far
//! - `media image/png aGVsbG8=` forces a rich-media payload
//! - `markup <b>hi</b>` forces a markup payload
//! - a trailing bare expression (`y * 2`) becomes the plain payload

use cellwire_common::{Environment, Value};

use crate::traits::{Evaluator, ExecOutcome, ExecResult, Payload};

/// Stateless apart from bookkeeping: `calls` and `log` exist so tests can
/// assert the at-most-once evaluation guarantee per request.
#[derive(Debug, Default)]
pub struct ScriptEvaluator {
    pub calls: usize,
    pub log: Vec<String>,
}

impl ScriptEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times a given source text was evaluated.
    pub fn evaluations_of(&self, source: &str) -> usize {
        self.log.iter().filter(|s| s.as_str() == source).count()
    }
}

impl Evaluator for ScriptEvaluator {
    fn evaluate(&mut self, source: &str, env: &Environment) -> ExecOutcome {
        self.calls += 1;
        self.log.push(source.to_string());

        let mut env = env.clone();
        let mut text = String::new();
        let mut payload = Payload::None;

        let lines: Vec<&str> = source
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();

        for (i, line) in lines.iter().enumerate() {
            let last = i + 1 == lines.len();

            if *line == "fail" || line.starts_with("fail ") {
                let message = line["fail".len()..].trim();
                let message = if message.is_empty() { "forced failure" } else { message };
                return ExecOutcome {
                    env,
                    result: ExecResult::failed(text, message),
                };
            }

            if let Some(rest) = line.strip_prefix("print ") {
                match eval_expr(rest, &env) {
                    Ok(value) => {
                        text.push_str(&value.to_string());
                        text.push('\n');
                    }
                    Err(message) => {
                        return ExecOutcome {
                            env,
                            result: ExecResult::failed(text, message),
                        };
                    }
                }
                continue;
            }

            if let Some(rest) = line.strip_prefix("media ") {
                let (mime, base64) = rest.split_once(' ').unwrap_or((rest, ""));
                payload = Payload::RichMedia {
                    mime: mime.to_string(),
                    base64: base64.trim().to_string(),
                };
                continue;
            }

            if let Some(rest) = line.strip_prefix("markup ") {
                payload = Payload::Markup {
                    markup: rest.to_string(),
                    plain: rest.to_string(),
                };
                continue;
            }

            if let Some((name, expr)) = split_assignment(line) {
                match eval_expr(expr, &env) {
                    Ok(value) => {
                        env.insert(name, value);
                    }
                    Err(message) => {
                        return ExecOutcome {
                            env,
                            result: ExecResult::failed(text, message),
                        };
                    }
                }
                continue;
            }

            // Bare expression: only the trailing one produces a payload,
            // matching a notebook cell's last-expression rule.
            match eval_expr(line, &env) {
                Ok(value) => {
                    if last {
                        payload = Payload::Plain(value);
                    }
                }
                Err(message) => {
                    return ExecOutcome {
                        env,
                        result: ExecResult::failed(text, message),
                    };
                }
            }
        }

        ExecOutcome {
            env,
            result: ExecResult::ok(text, payload),
        }
    }
}

fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let (lhs, rhs) = line.split_once('=')?;
    let name = lhs.trim();
    if is_identifier(name) && !rhs.starts_with('=') {
        Some((name, rhs.trim()))
    } else {
        None
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/* ─────────────── expression mini-interpreter ─────────────── */

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Atom(String),
    Str(String),
    Op(char),
}

fn tokenize(expr: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut s = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => s.push(ch),
                    None => return Err(format!("unterminated string literal in '{expr}'")),
                }
            }
            tokens.push(Token::Str(s));
        } else if c == '+' || c == '*' {
            chars.next();
            tokens.push(Token::Op(c));
        } else if c == '-' {
            chars.next();
            // Leading minus (start of expression or after an operator) binds
            // to the literal that follows.
            if matches!(tokens.last(), None | Some(Token::Op(_))) {
                let mut atom = String::from("-");
                atom.push_str(&read_atom(&mut chars));
                tokens.push(Token::Atom(atom));
            } else {
                tokens.push(Token::Op('-'));
            }
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            tokens.push(Token::Atom(read_atom(&mut chars)));
        } else {
            return Err(format!("unexpected character '{c}' in '{expr}'"));
        }
    }

    Ok(tokens)
}

fn read_atom(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut atom = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            atom.push(c);
            chars.next();
        } else {
            break;
        }
    }
    atom
}

fn eval_expr(expr: &str, env: &Environment) -> Result<Value, String> {
    let tokens = tokenize(expr)?;
    let mut iter = tokens.into_iter();

    let first = iter
        .next()
        .ok_or_else(|| format!("empty expression in '{expr}'"))?;
    let mut acc = atom_value(first, env)?;

    while let Some(token) = iter.next() {
        let Token::Op(op) = token else {
            return Err(format!("expected operator in '{expr}'"));
        };
        let rhs = iter
            .next()
            .ok_or_else(|| format!("dangling operator '{op}' in '{expr}'"))?;
        let rhs = atom_value(rhs, env)?;
        acc = apply(acc, op, rhs)?;
    }

    Ok(acc)
}

fn atom_value(token: Token, env: &Environment) -> Result<Value, String> {
    match token {
        Token::Str(s) => Ok(Value::Text(s)),
        Token::Op(c) => Err(format!("unexpected operator '{c}'")),
        Token::Atom(a) => {
            if a == "true" {
                return Ok(Value::Boolean(true));
            }
            if a == "false" {
                return Ok(Value::Boolean(false));
            }
            if let Ok(i) = a.parse::<i64>() {
                return Ok(Value::Int(i));
            }
            if let Ok(n) = a.parse::<f64>() {
                return Ok(Value::Number(n));
            }
            env.get(&a)
                .cloned()
                .ok_or_else(|| format!("name '{a}' is not defined"))
        }
    }
}

fn apply(lhs: Value, op: char, rhs: Value) -> Result<Value, String> {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(match op {
            '+' => a + b,
            '-' => a - b,
            '*' => a * b,
            _ => return Err(format!("unsupported operator '{op}'")),
        })),
        (Value::Text(a), Value::Text(b)) if op == '+' => Ok(Value::Text(format!("{a}{b}"))),
        _ => {
            let (a, b) = match (lhs.as_number(), rhs.as_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return Err(format!("cannot apply '{op}' to {lhs:?} and {rhs:?}")),
            };
            Ok(Value::Number(match op {
                '+' => a + b,
                '-' => a - b,
                '*' => a * b,
                _ => return Err(format!("unsupported operator '{op}'")),
            }))
        }
    }
}
