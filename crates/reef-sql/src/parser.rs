use std::iter::Peekable;

use crate::expression::{Comparison, Expression};
use crate::lexer::{Keyword, Lexer, ParseError, Token};
use crate::statement::{CollectionRef, Projection, Sort, SortDirection, Statement};
use crate::value::Value;

/// Parse a single statement. The entire input must be consumed, ending with
/// an optional semicolon.
pub fn parse(input: &str) -> Result<Statement, ParseError> {
    Parser::new(input).parse()
}

/// A recursive-descent parser over the lexer's token stream.
///
/// Parsing only checks that the syntax is well-formed; whether the
/// referenced database, collection, or fields exist is decided at
/// execution time.
pub struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Parser<'a> {
        Parser {
            lexer: Lexer::new(input).peekable(),
        }
    }

    pub fn parse(mut self) -> Result<Statement, ParseError> {
        let statement = self.parse_statement()?;
        self.next_is(Token::Semicolon);
        if let Some(token) = self.lexer.next().transpose()? {
            return Err(ParseError(format!("unexpected token {token}")));
        }
        Ok(statement)
    }

    // ── Token helpers ───────────────────────────────────────────

    /// Fetches the next token, or errors if none is left.
    fn next(&mut self) -> Result<Token, ParseError> {
        self.lexer
            .next()
            .transpose()?
            .ok_or_else(|| ParseError("unexpected end of input".into()))
    }

    fn peek(&mut self) -> Result<Option<&Token>, ParseError> {
        self.lexer
            .peek()
            .map(|result| result.as_ref().map_err(|e| e.clone()))
            .transpose()
    }

    /// Consumes the next token if it equals `token`, returning whether it did.
    fn next_is(&mut self, token: Token) -> bool {
        match self.peek() {
            Ok(Some(t)) if *t == token => {
                let _ = self.next();
                true
            }
            _ => false,
        }
    }

    /// Consumes the next token, erroring if it isn't `token`.
    fn expect(&mut self, token: Token) -> Result<(), ParseError> {
        let next = self.next()?;
        if next != token {
            return Err(ParseError(format!("expected {token}, found {next}")));
        }
        Ok(())
    }

    fn next_ident(&mut self) -> Result<String, ParseError> {
        match self.next()? {
            Token::Ident(ident) => Ok(ident),
            token => Err(ParseError(format!("expected identifier, found {token}"))),
        }
    }

    // ── Statements ──────────────────────────────────────────────

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.next()? {
            Token::Keyword(Keyword::Create) => self.parse_create(),
            Token::Keyword(Keyword::Drop) => self.parse_drop(),
            Token::Keyword(Keyword::Insert) => self.parse_insert(),
            Token::Keyword(Keyword::Select) => self.parse_select(),
            Token::Keyword(Keyword::Update) => self.parse_update(),
            Token::Keyword(Keyword::Delete) => self.parse_delete(),
            token => Err(ParseError(format!("unexpected token {token}"))),
        }
    }

    /// `CREATE DATABASE name` or `CREATE TABLE db.coll(col, ...)`.
    fn parse_create(&mut self) -> Result<Statement, ParseError> {
        match self.next()? {
            Token::Keyword(Keyword::Database) => Ok(Statement::CreateDatabase {
                name: self.next_ident()?,
            }),
            Token::Keyword(Keyword::Table) => {
                let target = self.parse_collection_ref()?;
                let mut columns = Vec::new();
                if self.next_is(Token::OpenParen) {
                    while !self.next_is(Token::CloseParen) {
                        columns.push(self.next_ident()?);
                        if !self.next_is(Token::Comma) {
                            self.expect(Token::CloseParen)?;
                            break;
                        }
                    }
                }
                Ok(Statement::CreateTable { target, columns })
            }
            token => Err(ParseError(format!(
                "expected DATABASE or TABLE, found {token}"
            ))),
        }
    }

    /// `DROP DATABASE name` or `DROP TABLE db.coll`.
    fn parse_drop(&mut self) -> Result<Statement, ParseError> {
        match self.next()? {
            Token::Keyword(Keyword::Database) => Ok(Statement::DropDatabase {
                name: self.next_ident()?,
            }),
            Token::Keyword(Keyword::Table) => Ok(Statement::DropTable {
                target: self.parse_collection_ref()?,
            }),
            token => Err(ParseError(format!(
                "expected DATABASE or TABLE, found {token}"
            ))),
        }
    }

    /// `INSERT INTO db.coll (col, ...) VALUES (lit, ...), ...`.
    fn parse_insert(&mut self) -> Result<Statement, ParseError> {
        self.expect(Token::Keyword(Keyword::Into))?;
        let target = self.parse_collection_ref()?;

        self.expect(Token::OpenParen)?;
        let mut columns = Vec::new();
        loop {
            columns.push(self.next_ident()?);
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        self.expect(Token::CloseParen)?;

        self.expect(Token::Keyword(Keyword::Values))?;
        let mut rows = Vec::new();
        loop {
            self.expect(Token::OpenParen)?;
            let mut row = Vec::new();
            loop {
                row.push(self.parse_literal()?);
                if !self.next_is(Token::Comma) {
                    break;
                }
            }
            self.expect(Token::CloseParen)?;
            rows.push(row);
            if !self.next_is(Token::Comma) {
                break;
            }
        }

        Ok(Statement::Insert {
            target,
            columns,
            rows,
        })
    }

    /// `SELECT <projection> FROM db.coll [WHERE ...] [ORDER BY field ASC|DESC]`.
    fn parse_select(&mut self) -> Result<Statement, ParseError> {
        let projection = self.parse_projection()?;
        self.expect(Token::Keyword(Keyword::From))?;
        let target = self.parse_collection_ref()?;
        let predicate = self.parse_where_clause()?;
        let order = self.parse_order_by_clause()?;
        Ok(Statement::Select {
            target,
            projection,
            predicate,
            order,
        })
    }

    /// `UPDATE db.coll SET field = lit, ... [WHERE ...]`.
    fn parse_update(&mut self) -> Result<Statement, ParseError> {
        let target = self.parse_collection_ref()?;
        self.expect(Token::Keyword(Keyword::Set))?;
        let mut assignments = Vec::new();
        loop {
            let field = self.next_ident()?;
            self.expect(Token::Equal)?;
            let value = self.parse_literal()?;
            if assignments.iter().any(|(f, _)| *f == field) {
                return Err(ParseError(format!("field {field} set multiple times")));
            }
            assignments.push((field, value));
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        Ok(Statement::Update {
            target,
            assignments,
            predicate: self.parse_where_clause()?,
        })
    }

    /// `DELETE FROM db.coll [WHERE ...]`.
    fn parse_delete(&mut self) -> Result<Statement, ParseError> {
        self.expect(Token::Keyword(Keyword::From))?;
        let target = self.parse_collection_ref()?;
        Ok(Statement::Delete {
            target,
            predicate: self.parse_where_clause()?,
        })
    }

    // ── Clauses ─────────────────────────────────────────────────

    fn parse_collection_ref(&mut self) -> Result<CollectionRef, ParseError> {
        let database = self.next_ident()?;
        self.expect(Token::Period)?;
        let collection = self.next_ident()?;
        Ok(CollectionRef {
            database,
            collection,
        })
    }

    /// `*`, `COUNT(*)`, or a column list.
    ///
    /// COUNT is not a reserved word — it is the aggregate only when a paren
    /// follows, so `SELECT count FROM …` still projects a column named count.
    fn parse_projection(&mut self) -> Result<Projection, ParseError> {
        if self.next_is(Token::Asterisk) {
            return Ok(Projection::All);
        }
        let first = self.next_ident()?;
        if first.eq_ignore_ascii_case("COUNT") && self.next_is(Token::OpenParen) {
            self.expect(Token::Asterisk)?;
            self.expect(Token::CloseParen)?;
            return Ok(Projection::Count);
        }
        let mut columns = vec![first];
        while self.next_is(Token::Comma) {
            columns.push(self.next_ident()?);
        }
        Ok(Projection::Columns(columns))
    }

    /// A WHERE clause, if present. Absence means "match all".
    fn parse_where_clause(&mut self) -> Result<Option<Expression>, ParseError> {
        if !self.next_is(Token::Keyword(Keyword::Where)) {
            return Ok(None);
        }
        Ok(Some(self.parse_predicate()?))
    }

    /// A chain of comparisons joined by AND/OR, associating left-to-right
    /// with no precedence between the two combinators.
    fn parse_predicate(&mut self) -> Result<Expression, ParseError> {
        let mut expr = self.parse_comparison()?;
        loop {
            let combine: fn(Box<Expression>, Box<Expression>) -> Expression =
                if self.next_is(Token::Keyword(Keyword::And)) {
                    Expression::And
                } else if self.next_is(Token::Keyword(Keyword::Or)) {
                    Expression::Or
                } else {
                    return Ok(expr);
                };
            let rhs = self.parse_comparison()?;
            expr = combine(Box::new(expr), Box::new(rhs));
        }
    }

    /// `field OP literal`.
    fn parse_comparison(&mut self) -> Result<Expression, ParseError> {
        let field = self.next_ident()?;
        let op = match self.next()? {
            Token::Equal => Comparison::Eq,
            Token::NotEqual => Comparison::Ne,
            Token::GreaterThan => Comparison::Gt,
            Token::GreaterThanOrEqual => Comparison::Gte,
            Token::LessThan => Comparison::Lt,
            Token::LessThanOrEqual => Comparison::Lte,
            token => {
                return Err(ParseError(format!(
                    "expected comparison operator, found {token}"
                )));
            }
        };
        let value = self.parse_literal()?;
        Ok(Expression::Compare(field, op, value))
    }

    /// `ORDER BY field [ASC|DESC]`, if present. Direction defaults to ASC.
    fn parse_order_by_clause(&mut self) -> Result<Option<Sort>, ParseError> {
        if !self.next_is(Token::Keyword(Keyword::Order)) {
            return Ok(None);
        }
        self.expect(Token::Keyword(Keyword::By))?;
        let field = self.next_ident()?;
        let direction = if self.next_is(Token::Keyword(Keyword::Desc)) {
            SortDirection::Desc
        } else {
            self.next_is(Token::Keyword(Keyword::Asc));
            SortDirection::Asc
        };
        Ok(Some(Sort { field, direction }))
    }

    /// A literal token: quoted string, number (int or float, decided by the
    /// decimal point), or TRUE/FALSE.
    fn parse_literal(&mut self) -> Result<Value, ParseError> {
        match self.next()? {
            Token::String(s) => Ok(Value::String(s)),
            Token::Number(n) if n.contains('.') => n
                .parse::<f64>()
                .map(Value::Float64)
                .map_err(|_| ParseError(format!("invalid number {n}"))),
            Token::Number(n) => n
                .parse::<i64>()
                .map(Value::Int64)
                .map_err(|_| ParseError(format!("invalid number {n}"))),
            Token::Keyword(Keyword::True) => Ok(Value::Bool(true)),
            Token::Keyword(Keyword::False) => Ok(Value::Bool(false)),
            token => Err(ParseError(format!("expected literal, found {token}"))),
        }
    }
}
