//! # REPL Loop
//!
//! Owns the prompt/read/dispatch/print cycle. Line editing, history, and tab
//! completion are rustyline's job; this module wires a prefix completer over
//! the command vocabulary and maps read results onto the dispatcher.
//!
//! Exit behavior: the `exit` command leaves with status 1 (historical), an
//! interrupt or EOF at the prompt prints a farewell and leaves with status 0.

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::command::{Command, KEYWORDS};
use crate::dispatch::{DispatchResult, Dispatcher};
use crate::render::Rendered;
use crate::transport::Transport;

/// Exit status for the `exit` command.
pub const EXIT_COMMAND_STATUS: i32 = 1;

/// Exit status for interrupt/EOF at the prompt.
pub const INTERRUPT_STATUS: i32 = 0;

/// Prefix completion over the fixed command vocabulary. Only the keyword
/// position completes; arguments are service-side names we know nothing
/// about.
pub struct CommandHelper;

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        if prefix.contains(' ') {
            return Ok((pos, Vec::new()));
        }
        let candidates = KEYWORDS
            .iter()
            .filter(|keyword| keyword.starts_with(prefix))
            .map(|keyword| Pair {
                display: keyword.to_string(),
                replacement: keyword.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}
impl Validator for CommandHelper {}
impl Helper for CommandHelper {}

/// Run the interpreter until `exit`, interrupt, or EOF. Returns the process
/// exit status; per-command errors are printed and the loop continues.
pub fn run<T: Transport>(dispatcher: &Dispatcher<T>, prompt: &str) -> Result<i32> {
    let mut editor: Editor<CommandHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CommandHelper));

    loop {
        match editor.readline(prompt) {
            Ok(line) => {
                let command = match Command::parse(&line) {
                    Ok(Command::Blank) => continue,
                    parsed => {
                        let _ = editor.add_history_entry(line.as_str());
                        parsed
                    }
                };
                match command {
                    Ok(command) => match dispatcher.dispatch(&command) {
                        DispatchResult::Output(rendered) => print_rendered(&rendered),
                        DispatchResult::Silent => {}
                        DispatchResult::Exit => return Ok(EXIT_COMMAND_STATUS),
                    },
                    Err(e) => println!("{}", format!("(error) {e}").red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("thank you!");
                return Ok(INTERRUPT_STATUS);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn print_rendered(rendered: &Rendered) {
    if rendered.is_error {
        println!("{}", rendered.text.red());
    } else {
        println!("{}", rendered.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::DefaultHistory;

    fn complete(line: &str) -> Vec<String> {
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);
        let (start, pairs) = CommandHelper.complete(line, line.len(), &ctx).unwrap();
        assert_eq!(start, 0);
        pairs.into_iter().map(|pair| pair.replacement).collect()
    }

    #[test]
    fn test_completes_keyword_prefix() {
        assert_eq!(complete("ma"), ["match_all", "match"]);
        assert_eq!(complete("del"), ["del", "delete_by_query"]);
    }

    #[test]
    fn test_empty_prefix_offers_everything() {
        assert_eq!(complete("").len(), KEYWORDS.len());
    }

    #[test]
    fn test_no_completion_past_the_keyword() {
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);
        let line = "get my_ind";
        let (_, pairs) = CommandHelper.complete(line, line.len(), &ctx).unwrap();
        assert!(pairs.is_empty());
    }
}
