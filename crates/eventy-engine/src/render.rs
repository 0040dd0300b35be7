//! Render tokens.
//!
//! Everything the engine prints is a [`Line`] of tagged tokens. A terminal
//! interprets the tokens; the engine never writes escape codes itself.

/// Foreground colors the engine asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    DarkRed,
    Yellow,
    Green,
    Blue,
    Magenta,
    Gray,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    SetColor(Color),
    ResetColor,
}

/// One output line, without the trailing newline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    tokens: Vec<Token>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.tokens.push(Token::Text(text.into()));
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.tokens.push(Token::SetColor(color));
        self
    }

    pub fn reset(mut self) -> Self {
        self.tokens.push(Token::ResetColor);
        self
    }

    /// `text` in `color`, then back to the default color.
    /// `None` writes the text without touching the color.
    pub fn colored(self, color: Option<Color>, text: impl Into<String>) -> Self {
        match color {
            Some(color) => self.color(color).text(text).reset(),
            None => self.text(text),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Text content with all color tokens dropped
    pub fn plain(&self) -> String {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Text(text) => Some(text.as_str()),
                Token::SetColor(_) | Token::ResetColor => None,
            })
            .collect()
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line::new().text(text)
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Line::new().text(text)
    }
}
