use crate::types::ColorMode;
use eventy_engine::{Color, Line, Stream, Terminal, Token};
use is_terminal::IsTerminal;
use owo_colors::{AnsiColors, OwoColorize};

/// Terminal writing to the process's stdout and stderr
pub struct ConsoleTerminal {
    stdout_color: bool,
    stderr_color: bool,
}

impl ConsoleTerminal {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            stdout_color: mode.enabled(std::io::stdout().is_terminal()),
            stderr_color: mode.enabled(std::io::stderr().is_terminal()),
        }
    }
}

impl Terminal for ConsoleTerminal {
    fn write_line(&mut self, stream: Stream, line: &Line) {
        match stream {
            Stream::Stdout => println!("{}", render(line, self.stdout_color)),
            Stream::Stderr => eprintln!("{}", render(line, self.stderr_color)),
        }
    }
}

fn ansi(color: Color) -> AnsiColors {
    match color {
        Color::Red => AnsiColors::BrightRed,
        Color::DarkRed => AnsiColors::Red,
        Color::Yellow => AnsiColors::BrightYellow,
        Color::Green => AnsiColors::BrightGreen,
        Color::Blue => AnsiColors::BrightBlue,
        Color::Magenta => AnsiColors::BrightMagenta,
        Color::Gray => AnsiColors::BrightBlack,
    }
}

/// Interpret render tokens; color tokens are dropped when `color` is off
pub fn render(line: &Line, color: bool) -> String {
    let mut out = String::new();
    let mut current: Option<Color> = None;

    for token in line.tokens() {
        match token {
            Token::SetColor(c) => current = Some(*c),
            Token::ResetColor => current = None,
            Token::Text(text) => match current {
                Some(c) if color => out.push_str(&text.color(ansi(c)).to_string()),
                _ => out.push_str(text),
            },
        }
    }

    out
}
