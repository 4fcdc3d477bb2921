//! Integer arithmetic for command modifiers
//!
//! Supports `+ - * /`, unary signs and parentheses. Division rounds toward
//! negative infinity. Used for fragments such as `+1-2` in `PCT3+1-2`.

use thiserror::Error;

/// Errors from evaluating a modifier expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{0}' at {1}")]
    UnexpectedChar(char, usize),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,
}

/// Evaluate an arithmetic expression
pub fn eval(expr: &str) -> Result<i32, ArithError> {
    if expr.is_empty() {
        return Err(ArithError::Empty);
    }

    let mut parser = Parser {
        bytes: expr.as_bytes(),
        pos: 0,
    };
    let value = parser.expr()?;

    match parser.peek() {
        None => Ok(value),
        Some(c) => Err(ArithError::UnexpectedChar(c as char, parser.pos)),
    }
}

/// Evaluate an optional modifier fragment; absent or malformed input is 0
pub fn eval_or_zero(expr: Option<&str>) -> i32 {
    match expr {
        None | Some("") => 0,
        Some(text) => eval(text).unwrap_or_else(|e| {
            tracing::debug!(expr = text, error = %e, "modifier treated as 0");
            0
        }),
    }
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<i32, ArithError> {
        let mut value = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.bump();
            let rhs = self.term()?;
            value = if op == b'+' {
                value.checked_add(rhs)
            } else {
                value.checked_sub(rhs)
            }
            .ok_or(ArithError::Overflow)?;
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<i32, ArithError> {
        let mut value = self.unary()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.bump();
            let rhs = self.unary()?;
            value = if op == b'*' {
                value.checked_mul(rhs).ok_or(ArithError::Overflow)?
            } else {
                if rhs == 0 {
                    return Err(ArithError::DivisionByZero);
                }
                value
                    .checked_div_euclid(rhs)
                    .map(|q| floor_adjust(q, value, rhs))
                    .ok_or(ArithError::Overflow)?
            };
        }
        Ok(value)
    }

    // unary := ('+' | '-') unary | number | '(' expr ')'
    fn unary(&mut self) -> Result<i32, ArithError> {
        match self.peek() {
            Some(b'+') => {
                self.bump();
                self.unary()
            }
            Some(b'-') => {
                self.bump();
                self.unary()?.checked_neg().ok_or(ArithError::Overflow)
            }
            Some(b'(') => {
                self.bump();
                let value = self.expr()?;
                match self.peek() {
                    Some(b')') => {
                        self.bump();
                        Ok(value)
                    }
                    Some(c) => Err(ArithError::UnexpectedChar(c as char, self.pos)),
                    None => Err(ArithError::UnexpectedEnd),
                }
            }
            Some(c) if c.is_ascii_digit() => self.number(),
            Some(c) => Err(ArithError::UnexpectedChar(c as char, self.pos)),
            None => Err(ArithError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<i32, ArithError> {
        let mut value: i32 = 0;
        while let Some(c @ b'0'..=b'9') = self.peek() {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((c - b'0') as i32))
                .ok_or(ArithError::Overflow)?;
            self.bump();
        }
        Ok(value)
    }
}

/// `div_euclid` rounds toward negative infinity only for positive divisors;
/// shift the quotient so a negative divisor floors as well.
fn floor_adjust(q: i32, lhs: i32, rhs: i32) -> i32 {
    if rhs < 0 && lhs.rem_euclid(rhs) != 0 {
        q - 1
    } else {
        q
    }
}
