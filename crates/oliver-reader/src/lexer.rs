use std::fmt;

use oliver_core::{OliverError, Span};

/// A lexical token. Words carry operator spellings, literal keywords, and
/// symbols alike; telling those apart is the reader's job.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    ScopeOpen,
    ScopeClose,
    Comma,
    Word(String),
    Str(String),
    Num(String),
    Regex(String),
    Format(String),
}

#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

/// Split source text into tokens. Words break on whitespace and on the
/// structural characters; quote characters open the string, number, regex,
/// and format literal forms; `#` opens comments.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, OliverError> {
    let mut lexer = Lexer {
        chars: input.chars().collect(),
        pos: 0,
        line: 1,
        col: 1,
    };
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut word_span = Span::point(1, 1);

    while let Some(ch) = lexer.peek() {
        let span = lexer.span();

        if !is_delimiter(ch) && !ch.is_whitespace() {
            // A leading `-` on a word reads as negation; a leading `+` is
            // dropped. Arrow operators keep their dashes.
            if word == "-" && ch != '-' && ch != '>' {
                tokens.push(SpannedToken {
                    token: Token::Word("neg".to_string()),
                    span: word_span,
                });
                word.clear();
            } else if word == "+" {
                word.clear();
            }
            if word.is_empty() {
                word_span = span;
            }
            word.push(ch);
            lexer.advance();
            continue;
        }

        if !word.is_empty() {
            // The -/+ rule applies before any non-whitespace character, so
            // `-(x)` reads as negation of the expression.
            if !ch.is_whitespace() && word == "-" {
                word = "neg".to_string();
            }
            if !ch.is_whitespace() && word == "+" {
                word.clear();
            } else {
                tokens.push(SpannedToken {
                    token: Token::Word(std::mem::take(&mut word)),
                    span: word_span,
                });
            }
        }

        if ch.is_whitespace() {
            lexer.advance();
            continue;
        }

        match ch {
            '(' => lexer.push_simple(&mut tokens, Token::LParen),
            ')' => lexer.push_simple(&mut tokens, Token::RParen),
            '[' => lexer.push_simple(&mut tokens, Token::LBracket),
            ']' => lexer.push_simple(&mut tokens, Token::RBracket),
            '{' => lexer.push_simple(&mut tokens, Token::LBrace),
            '}' => lexer.push_simple(&mut tokens, Token::RBrace),
            ',' => lexer.push_simple(&mut tokens, Token::Comma),
            '.' => lexer.push_simple(&mut tokens, Token::Word(".".to_string())),
            ':' => {
                lexer.advance();
                if lexer.peek() == Some('=') {
                    lexer.advance();
                    tokens.push(SpannedToken {
                        token: Token::Word(":=".to_string()),
                        span,
                    });
                } else {
                    tokens.push(SpannedToken {
                        token: Token::ScopeOpen,
                        span,
                    });
                }
            }
            ';' => lexer.push_simple(&mut tokens, Token::ScopeClose),
            '"' => {
                lexer.advance();
                let text = lexer.read_string(span)?;
                tokens.push(SpannedToken {
                    token: Token::Str(text),
                    span,
                });
            }
            '\'' => {
                lexer.advance();
                let text = lexer.read_until('\'', "number", span)?;
                tokens.push(SpannedToken {
                    token: Token::Num(text),
                    span,
                });
            }
            '\\' => {
                lexer.advance();
                let text = lexer.read_regex();
                tokens.push(SpannedToken {
                    token: Token::Regex(text),
                    span,
                });
            }
            '`' => {
                lexer.advance();
                let text = lexer.read_until('`', "format", span)?;
                tokens.push(SpannedToken {
                    token: Token::Format(text),
                    span,
                });
            }
            '#' => {
                lexer.advance();
                if lexer.peek() == Some('#') {
                    lexer.advance();
                    lexer.skip_block_comment();
                } else {
                    lexer.skip_line();
                }
            }
            // Every delimiter is handled above.
            _ => {
                lexer.advance();
            }
        }
    }

    if !word.is_empty() {
        tokens.push(SpannedToken {
            token: Token::Word(word),
            span: word_span,
        });
    }

    Ok(tokens)
}

fn is_delimiter(ch: char) -> bool {
    matches!(
        ch,
        '(' | ')' | '[' | ']' | '{' | '}' | ':' | ';' | ',' | '.' | '"' | '\'' | '\\' | '`' | '#'
    )
}

impl Lexer {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn push_simple(&mut self, tokens: &mut Vec<SpannedToken>, token: Token) {
        let span = self.span();
        self.advance();
        tokens.push(SpannedToken { token, span });
    }

    /// Read a string body up to the closing quote, decoding the C-style
    /// escapes. A backslash before any other character stays literal.
    fn read_string(&mut self, open: Span) -> Result<String, OliverError> {
        let mut out = String::new();
        loop {
            let Some(ch) = self.advance() else {
                return Err(OliverError::reader("unterminated string", open));
            };
            match ch {
                '"' => return Ok(out),
                '\\' => match self.peek() {
                    Some(esc) if is_string_escape(esc) => {
                        self.advance();
                        out.push(decode_escape(esc));
                    }
                    _ => out.push('\\'),
                },
                _ => out.push(ch),
            }
        }
    }

    /// Read a raw literal body up to the closing character (number and
    /// format forms carry no escapes).
    fn read_until(&mut self, close: char, kind: &str, open: Span) -> Result<String, OliverError> {
        let mut out = String::new();
        loop {
            let Some(ch) = self.advance() else {
                return Err(OliverError::reader(format!("unterminated {kind}"), open));
            };
            if ch == close {
                return Ok(out);
            }
            out.push(ch);
        }
    }

    /// Read a regex body. A backslash escapes the closing delimiter and the
    /// string escape set; any other backslash terminates the literal.
    fn read_regex(&mut self) -> String {
        let mut out = String::new();
        while let Some(ch) = self.advance() {
            if ch == '\\' {
                match self.peek() {
                    Some(esc) if is_string_escape(esc) => {
                        self.advance();
                        if esc == '\\' {
                            out.push('\\');
                        } else {
                            out.push(esc);
                        }
                    }
                    _ => break,
                }
            } else {
                out.push(ch);
            }
        }
        out
    }

    fn skip_line(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip to the matching `##`. An unterminated block swallows the rest
    /// of the input.
    fn skip_block_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '#' && self.peek() == Some('#') {
                self.advance();
                break;
            }
        }
    }
}

fn is_string_escape(ch: char) -> bool {
    matches!(ch, '\'' | '"' | '\\' | 'a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v')
}

fn decode_escape(ch: char) -> char {
    match ch {
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0B}',
        other => other,
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::ScopeOpen => write!(f, ":"),
            Token::ScopeClose => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Word(w) => write!(f, "{w}"),
            Token::Str(s) => write!(f, "\"{s}\""),
            Token::Num(n) => write!(f, "'{n}'"),
            Token::Regex(r) => write!(f, "\\{r}\\"),
            Token::Format(t) => write!(f, "`{t}`"),
        }
    }
}
