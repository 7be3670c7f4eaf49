//! Pratt (operator-precedence) parser.

use crate::ast::{Block, Expr, InfixOp, PrefixOp, Program, Stmt};
use crate::diag::ParseError;
use crate::scanner::Scanner;
use crate::token::Token;

/// Binding power of infix operators, low to high.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

fn precedence_of(token: &Token) -> Precedence {
    match token {
        Token::EqualEqual | Token::BangEqual => Precedence::Equals,
        Token::Less | Token::Greater => Precedence::LessGreater,
        Token::Plus | Token::Minus => Precedence::Sum,
        Token::Star | Token::Slash => Precedence::Product,
        Token::LeftParen | Token::LeftBracket => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

fn binary_op(token: &Token) -> Option<InfixOp> {
    match token {
        Token::EqualEqual => Some(InfixOp::Eq),
        Token::BangEqual => Some(InfixOp::NotEq),
        Token::Less => Some(InfixOp::Less),
        Token::Greater => Some(InfixOp::Greater),
        Token::Plus => Some(InfixOp::Add),
        Token::Minus => Some(InfixOp::Sub),
        Token::Star => Some(InfixOp::Mul),
        Token::Slash => Some(InfixOp::Div),
        _ => None,
    }
}

#[derive(Debug)]
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    current_token: Token,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Parser<'a> {
        Parser {
            scanner: Scanner::new(input),
            current_token: Token::Eof, // we haven't scanned anything yet
        }
    }

    /// Parse the whole input.  Parsing is error-accumulating: a failed
    /// statement is recorded in `Program.errors` and parsing resumes at the
    /// next statement boundary, so a `Program` is always returned.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];
        let mut errors = vec![];
        self.advance();
        loop {
            if self.current_token == Token::Eof {
                break;
            }
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    errors.push(e);
                    self.synchronize();
                }
            }
        }
        Program { statements, errors }
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current_token {
            Token::Let => self.parse_let_statement(),
            Token::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse `let <identifier> = <expr>` with an optional trailing `;`.
    /// Current token is Token::Let.
    fn parse_let_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let name = self.identifier()?;
        self.consume(Token::Equal)?;
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Ok(Stmt::Let(name, value))
    }

    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Ok(Stmt::Return(value))
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Ok(Stmt::Expr(expr))
    }

    /// The Pratt loop: a prefix rule produces the left operand, then infix
    /// rules fold it while the current token binds tighter than `precedence`.
    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        let mut left = self.parse_prefix()?;
        loop {
            let current_precedence = precedence_of(&self.current_token);
            if self.current_token == Token::Semicolon || precedence >= current_precedence {
                break;
            }
            left = match self.current_token {
                Token::LeftParen => self.parse_call(left)?,
                Token::LeftBracket => self.parse_index(left)?,
                _ => {
                    let op = match binary_op(&self.current_token) {
                        Some(op) => op,
                        None => break,
                    };
                    self.advance();
                    // Right operand at the operator's own precedence: since
                    // the loop requires a strictly higher precedence to keep
                    // folding, equal-precedence operators are left-associative.
                    let right = self.parse_expression(current_precedence)?;
                    Expr::Infix(op, Box::new(left), Box::new(right))
                }
            };
        }
        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        // TODO: can we avoid cloning tokens?
        match self.current_token.clone() {
            Token::Identifier(name) => {
                self.advance();
                Ok(Expr::Identifier(name))
            }
            Token::Int(digits) => {
                let n = digits
                    .parse::<i64>()
                    .map_err(|_| ParseError::BadIntLiteral(digits.clone()))?;
                self.advance();
                Ok(Expr::Int(n))
            }
            Token::Str(s) => {
                self.advance();
                Ok(Expr::Str(s))
            }
            Token::True => {
                self.advance();
                Ok(Expr::Bool(true))
            }
            Token::False => {
                self.advance();
                Ok(Expr::Bool(false))
            }
            Token::Bang => {
                self.advance();
                let right = self.parse_expression(Precedence::Prefix)?;
                Ok(Expr::Prefix(PrefixOp::Not, Box::new(right)))
            }
            Token::Minus => {
                self.advance();
                let right = self.parse_expression(Precedence::Prefix)?;
                Ok(Expr::Prefix(PrefixOp::Neg, Box::new(right)))
            }
            Token::LeftParen => {
                self.advance();
                let expr = self.parse_expression(Precedence::Lowest)?;
                if self.current_token == Token::RightParen {
                    self.advance();
                    Ok(expr)
                } else {
                    Err(ParseError::UnmatchedGroupParen)
                }
            }
            Token::If => self.parse_if(),
            Token::Fn => self.parse_function(),
            Token::LeftBracket => self.parse_array(),
            token => Err(ParseError::NoPrefixParseFn(token.to_string())),
        }
    }

    /// Parse `if (<cond>) { … }` with an optional `else { … }`.
    /// Current token is Token::If.
    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        self.advance();
        self.consume(Token::LeftParen)?;
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.consume(Token::RightParen)?;
        let then_block = self.block()?;
        let else_block = if self.current_token == Token::Else {
            self.advance();
            Some(self.block()?)
        } else {
            None
        };
        Ok(Expr::If(Box::new(condition), then_block, else_block))
    }

    fn parse_function(&mut self) -> Result<Expr, ParseError> {
        self.advance();
        self.consume(Token::LeftParen)?;
        let mut params = vec![];
        if self.current_token != Token::RightParen {
            loop {
                params.push(self.identifier()?);
                if self.current_token != Token::Comma {
                    break;
                }
                self.advance();
            }
        }
        self.consume(Token::RightParen)?;
        let body = self.block()?;
        Ok(Expr::Function(params, body))
    }

    fn parse_array(&mut self) -> Result<Expr, ParseError> {
        self.advance();
        let mut elements = vec![];
        if self.current_token != Token::RightBracket {
            loop {
                elements.push(self.parse_expression(Precedence::Lowest)?);
                if self.current_token != Token::Comma {
                    break;
                }
                self.advance();
            }
        }
        self.consume(Token::RightBracket)?;
        Ok(Expr::Array(elements))
    }

    /// Parse a call argument list.  Current token is Token::LeftParen.
    fn parse_call(&mut self, function: Expr) -> Result<Expr, ParseError> {
        self.advance();
        let mut args = vec![];
        if self.current_token != Token::RightParen {
            loop {
                if self.current_token == Token::Eof {
                    return Err(ParseError::MalformedCall);
                }
                args.push(self.parse_expression(Precedence::Lowest)?);
                if self.current_token != Token::Comma {
                    break;
                }
                self.advance();
            }
        }
        if self.current_token == Token::RightParen {
            self.advance();
            Ok(Expr::Call(Box::new(function), args))
        } else {
            Err(ParseError::MalformedCall)
        }
    }

    /// Parse `[<expr>]` after an array-valued expression.
    fn parse_index(&mut self, array: Expr) -> Result<Expr, ParseError> {
        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.consume(Token::RightBracket)?;
        Ok(Expr::Index(Box::new(array), Box::new(index)))
    }

    /// Parse a `{ … }` statement list.  Current token is the opening curly.
    fn block(&mut self) -> Result<Block, ParseError> {
        self.consume(Token::LeftCurly)?;
        let mut stmts = vec![];
        loop {
            match self.current_token {
                Token::RightCurly => {
                    self.advance();
                    break;
                }
                Token::Eof => {
                    return Err(ParseError::UnexpectedToken(
                        self.current_token.to_string(),
                        Token::RightCurly.to_string(),
                    ));
                }
                _ => stmts.push(self.parse_statement()?),
            }
        }
        Ok(Block(stmts))
    }

    fn identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Identifier(name) = self.current_token.clone() {
            self.advance();
            Ok(name)
        } else {
            Err(ParseError::ExpectedIdentifier)
        }
    }

    fn skip_semicolon(&mut self) {
        if self.current_token == Token::Semicolon {
            self.advance();
        }
    }

    /// Skip to just after the next `;`, or to the next statement-starter
    /// keyword or end of input, so that one malformed statement does not
    /// cascade into errors for the rest of the program.
    fn synchronize(&mut self) {
        loop {
            match self.current_token {
                Token::Eof | Token::Let | Token::Return => break,
                Token::Semicolon => {
                    self.advance();
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn advance(&mut self) -> &Token {
        self.current_token = self.scanner.get_token();
        &self.current_token
    }

    fn consume(&mut self, expected: Token) -> Result<(), ParseError> {
        if self.current_token == expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken(
                self.current_token.to_string(),
                expected.to_string(),
            ))
        }
    }
}
