use oliver_core::{Boolean, Expr, OliverError, OpCode, Span, Value};

use crate::lexer::{tokenize, SpannedToken, Token};

/// Parse source text into the initial expression value handed to the
/// evaluator: one top-level expression holding every form in order.
pub fn read(input: &str) -> Result<Value, OliverError> {
    let tokens = tokenize(input)?;
    let mut reader = Reader { tokens, pos: 0 };
    let mut forms = Vec::new();

    while reader.peek().is_some() {
        if let Some(form) = reader.read_form()? {
            forms.push(form);
        }
    }

    Ok(Value::Expression(Expr::from_iter(forms)))
}

struct Reader {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Reader {
    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Read one form. Commas and `{...}` groups produce no value, so the
    /// result is optional.
    fn read_form(&mut self) -> Result<Option<Value>, OliverError> {
        let Some(tok) = self.advance() else {
            return Ok(None);
        };
        let span = tok.span;

        match tok.token {
            Token::Word(word) => Ok(read_word(&word)),
            Token::Str(text) | Token::Regex(text) | Token::Format(text) => {
                Ok(Some(Value::string(&text)))
            }
            Token::Num(text) => Ok(Some(Value::Number(oliver_core::Number::parse(&text)))),

            Token::LParen => {
                let items = self.read_group(&Token::RParen, "expression", span)?;
                Ok(Some(Value::Expression(Expr::from_iter(items))))
            }
            Token::LBracket => {
                let items = self.read_group(&Token::RBracket, "list", span)?;
                Ok(Some(Value::list(items)))
            }
            Token::LBrace => {
                // Objects are recognised but carry no value yet; the group
                // is parsed for balance and dropped.
                self.read_group(&Token::RBrace, "object", span)?;
                Ok(None)
            }
            Token::ScopeOpen => {
                let mut items = self.read_group(&Token::ScopeClose, "scope", span)?;
                items.insert(0, Value::op_call(OpCode::BeginScope));
                items.push(Value::op_call(OpCode::EndScope));
                Ok(Some(Value::Scope(Expr::from_iter(items))))
            }

            Token::RParen => Err(OliverError::reader("unmatched `)`", span)),
            Token::RBracket => Err(OliverError::reader("unmatched `]`", span)),
            Token::RBrace => Err(OliverError::reader("unmatched `}`", span)),
            Token::ScopeClose => Err(OliverError::reader("unmatched `;`", span)),

            Token::Comma => Ok(None),
        }
    }

    /// Read forms up to the matching closer.
    fn read_group(
        &mut self,
        close: &Token,
        kind: &str,
        open: Span,
    ) -> Result<Vec<Value>, OliverError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(OliverError::reader(format!("unterminated {kind}"), open));
                }
                Some(tok) if &tok.token == close => {
                    self.advance();
                    return Ok(items);
                }
                Some(_) => {
                    if let Some(form) = self.read_form()? {
                        items.push(form);
                    }
                }
            }
        }
    }
}

/// Classify a bare word: operator, boolean literal, the nothing value, or a
/// symbol. An uppercase `ELSE` spelling is the truthy literal, distinct
/// from the lowercase `else` operator.
fn read_word(word: &str) -> Option<Value> {
    if let Some(op) = OpCode::from_token(word) {
        return Some(Value::op_call(op));
    }
    if let Some(b) = Boolean::from_word(word) {
        return Some(Value::Boolean(b));
    }
    if word.eq_ignore_ascii_case("else") {
        return Some(Value::boolean(true));
    }
    if word.eq_ignore_ascii_case("nothing") || word.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(Value::symbol(word))
}
