use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// Error raised when statement text does not lex or parse.
///
/// Carries the offending fragment so callers can report what was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError(pub String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error: {}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// A lexical token of the statement language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal; ints and floats are distinguished by a decimal point.
    Number(String),
    /// A single-quoted string literal, quotes stripped.
    String(String),
    /// An identifier (field, database, or collection name).
    Ident(String),
    Keyword(Keyword),
    Period,
    Comma,
    Semicolon,
    OpenParen,
    CloseParen,
    Asterisk,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::String(s) => write!(f, "'{s}'"),
            Token::Ident(i) => write!(f, "{i}"),
            Token::Keyword(k) => write!(f, "{k}"),
            Token::Period => f.write_str("."),
            Token::Comma => f.write_str(","),
            Token::Semicolon => f.write_str(";"),
            Token::OpenParen => f.write_str("("),
            Token::CloseParen => f.write_str(")"),
            Token::Asterisk => f.write_str("*"),
            Token::Equal => f.write_str("="),
            Token::NotEqual => f.write_str("!="),
            Token::GreaterThan => f.write_str(">"),
            Token::GreaterThanOrEqual => f.write_str(">="),
            Token::LessThan => f.write_str("<"),
            Token::LessThanOrEqual => f.write_str("<="),
        }
    }
}

/// Reserved words, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    And,
    Asc,
    By,
    Create,
    Database,
    Delete,
    Desc,
    Drop,
    False,
    From,
    Insert,
    Into,
    Or,
    Order,
    Select,
    Set,
    Table,
    True,
    Update,
    Values,
    Where,
}

impl Keyword {
    fn from_ident(ident: &str) -> Option<Keyword> {
        Some(match ident.to_uppercase().as_str() {
            "AND" => Keyword::And,
            "ASC" => Keyword::Asc,
            "BY" => Keyword::By,
            "CREATE" => Keyword::Create,
            "DATABASE" => Keyword::Database,
            "DELETE" => Keyword::Delete,
            "DESC" => Keyword::Desc,
            "DROP" => Keyword::Drop,
            "FALSE" => Keyword::False,
            "FROM" => Keyword::From,
            "INSERT" => Keyword::Insert,
            "INTO" => Keyword::Into,
            "OR" => Keyword::Or,
            "ORDER" => Keyword::Order,
            "SELECT" => Keyword::Select,
            "SET" => Keyword::Set,
            "TABLE" => Keyword::Table,
            "TRUE" => Keyword::True,
            "UPDATE" => Keyword::Update,
            "VALUES" => Keyword::Values,
            "WHERE" => Keyword::Where,
            _ => return None,
        })
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Keyword::And => "AND",
            Keyword::Asc => "ASC",
            Keyword::By => "BY",
            Keyword::Create => "CREATE",
            Keyword::Database => "DATABASE",
            Keyword::Delete => "DELETE",
            Keyword::Desc => "DESC",
            Keyword::Drop => "DROP",
            Keyword::False => "FALSE",
            Keyword::From => "FROM",
            Keyword::Insert => "INSERT",
            Keyword::Into => "INTO",
            Keyword::Or => "OR",
            Keyword::Order => "ORDER",
            Keyword::Select => "SELECT",
            Keyword::Set => "SET",
            Keyword::Table => "TABLE",
            Keyword::True => "TRUE",
            Keyword::Update => "UPDATE",
            Keyword::Values => "VALUES",
            Keyword::Where => "WHERE",
        })
    }
}

/// A streaming lexer over statement text.
///
/// Yields tokens until the input is exhausted; an unterminated string or an
/// unexpected character yields an error and ends the stream.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            chars: input.chars().peekable(),
        }
    }

    /// Consume the next char if it satisfies the predicate.
    fn next_if(&mut self, predicate: impl Fn(char) -> bool) -> Option<char> {
        self.chars.next_if(|&c| predicate(c))
    }

    fn skip_whitespace(&mut self) {
        while self.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn scan_ident_or_keyword(&mut self) -> Token {
        let mut ident = String::new();
        while let Some(c) = self.next_if(|c| c.is_alphanumeric() || c == '_') {
            ident.push(c);
        }
        match Keyword::from_ident(&ident) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Ident(ident),
        }
    }

    /// Scan a numeric literal. A single decimal point makes it a float;
    /// a leading `-` has already been consumed by the caller.
    fn scan_number(&mut self, negative: bool) -> Token {
        let mut number = String::new();
        if negative {
            number.push('-');
        }
        while let Some(c) = self.next_if(|c| c.is_ascii_digit()) {
            number.push(c);
        }
        if self.next_if(|c| c == '.').is_some() {
            number.push('.');
            while let Some(c) = self.next_if(|c| c.is_ascii_digit()) {
                number.push(c);
            }
        }
        Token::Number(number)
    }

    fn scan_string(&mut self) -> Result<Token, ParseError> {
        // opening quote already consumed
        let mut s = String::new();
        loop {
            match self.chars.next() {
                Some('\'') => return Ok(Token::String(s)),
                Some(c) => s.push(c),
                None => return Err(ParseError(format!("unterminated string '{s}"))),
            }
        }
    }

    fn scan_token(&mut self) -> Option<Result<Token, ParseError>> {
        self.skip_whitespace();
        let c = *self.chars.peek()?;
        let token = match c {
            '\'' => {
                self.chars.next();
                return Some(self.scan_string());
            }
            c if c.is_ascii_digit() => self.scan_number(false),
            c if c.is_alphabetic() || c == '_' => self.scan_ident_or_keyword(),
            _ => {
                self.chars.next();
                match c {
                    '.' => Token::Period,
                    ',' => Token::Comma,
                    ';' => Token::Semicolon,
                    '(' => Token::OpenParen,
                    ')' => Token::CloseParen,
                    '*' => Token::Asterisk,
                    '=' => Token::Equal,
                    '-' if self.chars.peek().is_some_and(|c| c.is_ascii_digit()) => {
                        self.scan_number(true)
                    }
                    '!' => match self.next_if(|c| c == '=') {
                        Some(_) => Token::NotEqual,
                        None => return Some(Err(ParseError("unexpected character !".into()))),
                    },
                    '>' => match self.next_if(|c| c == '=') {
                        Some(_) => Token::GreaterThanOrEqual,
                        None => Token::GreaterThan,
                    },
                    '<' => match self.next_if(|c| c == '=') {
                        Some(_) => Token::LessThanOrEqual,
                        None => Token::LessThan,
                    },
                    c => return Some(Err(ParseError(format!("unexpected character {c}")))),
                }
            }
        };
        Some(Ok(token))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan_token()
    }
}
