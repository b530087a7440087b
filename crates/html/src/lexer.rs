//! Markup lexer
//!
//! Converts template text into a flat stream of tokens. This is not an HTML5
//! tokenizer: it recognizes tags, double-quoted attributes and content for a
//! hand-authored markup subset, and never fails. Malformed input stays in the
//! current state until the input ends, and the buffered text is flushed as a
//! final token.

use crate::token::{Token, TokenKind};

/// Lexer state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    TagOpen,
    ClosingTagOpen,
    TagContinuation,
    AttributeName,
    AttributeEquals,
    AttributeValue,
    Content,
}

impl State {
    /// Kind of the token a flush in this state produces
    fn token_kind(self) -> Option<TokenKind> {
        match self {
            State::None => None,
            State::TagOpen => Some(TokenKind::TagOpen),
            State::ClosingTagOpen => Some(TokenKind::TagClose),
            State::TagContinuation => Some(TokenKind::TagContinuation),
            State::AttributeName => Some(TokenKind::AttributeName),
            State::AttributeEquals => Some(TokenKind::AttributeEquals),
            State::AttributeValue => Some(TokenKind::AttributeValue),
            State::Content => Some(TokenKind::Content),
        }
    }
}

/// Markup lexer
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    state: State,
    buffer: String,
    tokens: Vec<Token>,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            state: State::None,
            buffer: String::new(),
            tokens: Vec::new(),
        }
    }

    /// Run the lexer over the whole input
    pub fn tokenize(mut self) -> Vec<Token> {
        while let Some(c) = self.consume() {
            self.step(c);
        }

        if self.state != State::None {
            self.flush();
        }

        log::trace!("lexed {} chars into {} tokens", self.input.len(), self.tokens.len());
        self.tokens
    }

    /// Consume and return the current character
    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.pos).copied()?;
        self.pos += 1;
        Some(c)
    }

    /// Push the buffered text as a token of the current state's kind
    ///
    /// Empty tokens are pushed too; the serializer relies on them to know
    /// where a tag ends.
    fn flush(&mut self) {
        if let Some(kind) = self.state.token_kind() {
            let text = std::mem::take(&mut self.buffer);
            self.tokens.push(Token { kind, text });
        } else {
            self.buffer.clear();
        }
    }

    /// Flush, then continue in `state`
    fn switch(&mut self, state: State) {
        self.flush();
        self.state = state;
    }

    /// Execute one step of the state machine
    fn step(&mut self, c: char) {
        match self.state {
            State::None => self.none_state(c),
            State::Content => self.content_state(c),
            State::TagOpen | State::ClosingTagOpen => self.tag_name_state(c),
            State::TagContinuation => self.tag_continuation_state(c),
            State::AttributeName => self.attribute_name_state(c),
            State::AttributeEquals => self.attribute_equals_state(c),
            State::AttributeValue => self.attribute_value_state(c),
        }
    }

    // State implementations

    fn none_state(&mut self, c: char) {
        match c {
            '<' => self.state = State::TagOpen,
            c => {
                self.state = State::Content;
                self.buffer.push(c);
            }
        }
    }

    fn content_state(&mut self, c: char) {
        match c {
            '<' => self.switch(State::TagOpen),
            c => self.buffer.push(c),
        }
    }

    fn tag_name_state(&mut self, c: char) {
        match c {
            '/' if self.state == State::TagOpen && self.buffer.is_empty() => {
                self.state = State::ClosingTagOpen;
            }
            c if c.is_ascii_whitespace() => {
                self.buffer.push(c);
                self.switch(State::TagContinuation);
            }
            '>' => self.switch(State::Content),
            c => self.buffer.push(c),
        }
    }

    fn tag_continuation_state(&mut self, c: char) {
        match c {
            c if c.is_ascii_whitespace() => {
                self.buffer.push(c);
                self.flush();
            }
            '>' => self.switch(State::Content),
            c => {
                self.switch(State::AttributeName);
                self.buffer.push(c);
            }
        }
    }

    fn attribute_name_state(&mut self, c: char) {
        match c {
            '=' => {
                self.switch(State::AttributeEquals);
                self.buffer.push('=');
            }
            c if c.is_ascii_whitespace() => {
                self.switch(State::TagContinuation);
                self.buffer.push(c);
            }
            '>' => self.switch(State::Content),
            c => self.buffer.push(c),
        }
    }

    fn attribute_equals_state(&mut self, c: char) {
        match c {
            '"' => self.switch(State::AttributeValue),
            '>' => self.switch(State::Content),
            // anything between `=` and the opening quote is dropped
            _ => {}
        }
    }

    fn attribute_value_state(&mut self, c: char) {
        match c {
            '"' => self.switch(State::TagContinuation),
            c => self.buffer.push(c),
        }
    }
}

/// Tokenize markup text
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}
