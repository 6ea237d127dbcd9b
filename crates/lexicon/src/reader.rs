//! Reader for lexicon entries written as Lisp text.
//!
//! Turns parenthesized text into the nested-list value form consumed by
//! [`crate::lisp`]:
//!
//! ```text
//! (KICK-V1 (CAT V) (SEM-STRUC (KICK (AGENT (VALUE ^$VAR1)))))
//!   => ["KICK-V1", ["CAT", "V"], ["SEM-STRUC", ["KICK", ["AGENT", ["VALUE", "^$VAR1"]]]]]
//! ```
//!
//! Every atom is read as a string, verbatim. `"..."` reads a string atom that
//! may contain spaces and parentheses (`\"` and `\\` are escapes), and `;`
//! comments out the rest of the line.

use crate::error::{LexiconError, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Atom(String),
}

/// Token with its byte offset in the source
type Spanned = (usize, Token);

fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '(' => tokens.push((offset, Token::Open)),
            ')' => tokens.push((offset, Token::Close)),
            ';' => {
                while let Some((_, c)) = chars.next() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '"' => {
                let mut atom = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some((_, escaped)) => atom.push(escaped),
                            None => break,
                        },
                        other => atom.push(other),
                    }
                }
                if !closed {
                    return Err(LexiconError::read(offset, "unterminated string"));
                }
                tokens.push((offset, Token::Atom(atom)));
            }
            c if c.is_whitespace() => {}
            _ => {
                let mut atom = String::from(ch);
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '(' | ')' | '"' | ';') {
                        break;
                    }
                    atom.push(c);
                    chars.next();
                }
                tokens.push((offset, Token::Atom(atom)));
            }
        }
    }

    Ok(tokens)
}

/// A token-stream reader.
struct Reader {
    tokens: Vec<Spanned>,
    pos: usize,
    len: usize,
}

impl Reader {
    fn new(tokens: Vec<Spanned>, len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            len,
        }
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn read_expr(&mut self) -> Result<Value> {
        let Some((offset, token)) = self.tokens.get(self.pos).cloned() else {
            return Err(LexiconError::read(self.len, "unexpected end of input"));
        };
        self.pos += 1;

        match token {
            Token::Atom(atom) => Ok(Value::String(atom)),
            Token::Close => Err(LexiconError::read(offset, "unexpected ')'")),
            Token::Open => {
                let mut items = Vec::new();
                loop {
                    match self.peek() {
                        None => return Err(LexiconError::read(offset, "unterminated list")),
                        Some((_, Token::Close)) => {
                            self.pos += 1;
                            return Ok(Value::Array(items));
                        }
                        Some(_) => items.push(self.read_expr()?),
                    }
                }
            }
        }
    }
}

/// Read exactly one expression from `input`.
pub fn read(input: &str) -> Result<Value> {
    let mut reader = Reader::new(tokenize(input)?, input.len());
    let expr = reader.read_expr()?;
    if let Some((offset, _)) = reader.peek() {
        return Err(LexiconError::read(*offset, "trailing input after expression"));
    }
    Ok(expr)
}

/// Read every top-level expression from `input`, in order.
pub fn read_all(input: &str) -> Result<Vec<Value>> {
    let mut reader = Reader::new(tokenize(input)?, input.len());
    let mut exprs = Vec::new();
    while !reader.at_end() {
        exprs.push(reader.read_expr()?);
    }
    Ok(exprs)
}
