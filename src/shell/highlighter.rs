//! Input and output coloring for the shell.
//!
//! Secret arguments are masked while they are typed.

use rustyline::highlight::{CmdKind, Highlighter};
use std::borrow::Cow;
use std::ops::Range;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;
use crate::visibility::mask;

/// ANSI escape codes.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const WHITE: &str = "\x1b[37m";

    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

/// Colors the command word and its arguments.
pub struct PassstoreHighlighter {
    registry: Arc<CommandRegistry>,
}

impl PassstoreHighlighter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn highlight_line(&self, line: &str) -> String {
        let (spans, _) = argument_spans(line);
        let Some(first) = spans.first() else {
            return line.to_string();
        };
        let command = &line[first.clone()];

        // The shell looks the name up after removing quotes.
        let cmd = shell_words::split(command)
            .ok()
            .and_then(|words| words.into_iter().next())
            .and_then(|name| self.registry.get(&name));

        let mut result = String::with_capacity(line.len() * 2);
        result.push_str(&line[..first.start]);
        match cmd {
            Some(_) => {
                result.push_str(colors::BOLD);
                result.push_str(colors::CYAN);
            }
            None => result.push_str(colors::RED),
        }
        result.push_str(command);
        result.push_str(colors::RESET);

        let rest = &line[first.end..];
        let secret_arg = cmd.as_ref().and_then(|c| c.secret_arg());
        let takes_row = cmd
            .as_ref()
            .is_some_and(|c| c.usage().split_whitespace().nth(1) == Some("<row>"));
        result.push_str(&highlight_arguments(rest, secret_arg, takes_row));
        result
    }
}

/// Lexer states for splitting arguments the way `shell_words::split` does.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Lex {
    Between,
    Word,
    Escape,
    Single,
    Double,
    DoubleEscape,
    Comment,
}

/// State after `c` is read inside, or at the start of, an unquoted word.
fn word_state(c: char) -> Lex {
    match c {
        '\'' => Lex::Single,
        '"' => Lex::Double,
        '\\' => Lex::Escape,
        _ => Lex::Word,
    }
}

/// Byte spans of the arguments in `args`, quotes included.
///
/// The flag is false when the last span is unfinished: an open quote, a
/// trailing backslash, or a `#` comment. Where such a span ends, and which
/// argument its text will belong to, is not known yet.
fn argument_spans(args: &str) -> (Vec<Range<usize>>, bool) {
    let mut spans = Vec::new();
    let mut state = Lex::Between;
    let mut start = 0;

    for (i, c) in args.char_indices() {
        state = match state {
            Lex::Between if c.is_whitespace() => Lex::Between,
            Lex::Between => {
                start = i;
                if c == '#' { Lex::Comment } else { word_state(c) }
            }
            Lex::Word if c.is_whitespace() => {
                spans.push(start..i);
                Lex::Between
            }
            Lex::Word => word_state(c),
            Lex::Escape => Lex::Word,
            Lex::Single if c == '\'' => Lex::Word,
            Lex::Single => Lex::Single,
            Lex::Double if c == '"' => Lex::Word,
            Lex::Double if c == '\\' => Lex::DoubleEscape,
            Lex::Double | Lex::DoubleEscape => Lex::Double,
            Lex::Comment => Lex::Comment,
        };
    }

    match state {
        Lex::Between => (spans, true),
        Lex::Word => {
            spans.push(start..args.len());
            (spans, true)
        }
        _ => {
            spans.push(start..args.len());
            (spans, false)
        }
    }
}

/// Colors each argument, masking the secret one.
///
/// An unfinished last argument is masked whenever it could still turn out
/// to be, or to contain, the secret.
fn highlight_arguments(args: &str, secret_arg: Option<usize>, takes_row: bool) -> String {
    let (spans, finished) = argument_spans(args);
    let last = spans.len().saturating_sub(1);
    let mut result = String::new();
    let mut pos = 0;

    for (i, span) in spans.into_iter().enumerate() {
        result.push_str(&args[pos..span.start]);
        let part = &args[span.clone()];

        let hidden = secret_arg.is_some_and(|secret| {
            i == secret || (!finished && i == last && i < secret)
        });
        if hidden {
            result.push_str(colors::DIM);
            result.push_str(&mask(part));
        } else {
            let color = match i {
                0 if takes_row => colors::YELLOW,
                _ if secret_arg.is_some() => colors::MAGENTA,
                _ => colors::WHITE,
            };
            result.push_str(color);
            result.push_str(part);
        }
        result.push_str(colors::RESET);

        pos = span.end;
    }

    result.push_str(&args[pos..]);
    result
}

impl Highlighter for PassstoreHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlight_line(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(format!(
            "{}{}{}{}",
            colors::BOLD,
            colors::BRIGHT_GREEN,
            prompt,
            colors::RESET
        ))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("{}{}{}", colors::DIM, hint, colors::RESET))
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        _completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        Cow::Owned(format!(
            "{}{}{}",
            colors::BRIGHT_CYAN,
            candidate,
            colors::RESET
        ))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

/// Coloring for messages printed after a command.
pub struct OutputHighlighter;

impl OutputHighlighter {
    pub fn error(msg: &str) -> String {
        format!("{}{}{}", colors::BRIGHT_RED, msg, colors::RESET)
    }

    pub fn warning(msg: &str) -> String {
        format!("{}{}{}", colors::BRIGHT_YELLOW, msg, colors::RESET)
    }
}
