//! # Command Grammar
//!
//! Tokenizes one raw input line and validates argument counts and shapes per
//! command, producing a typed [`Command`] or a [`CommandError`].
//!
//! Tokenization splits on single literal spaces only. There is no quoting or
//! escaping, so multi-word values cannot be entered (e.g. `analyze standard
//! hello world` is a four-token line and fails arity validation). This is a
//! documented limitation of the input language, not something the grammar
//! papers over.

use thiserror::Error;

/// Recognized command keywords, in the order `help` lists them. Also the
/// completion vocabulary for the line editor.
pub const KEYWORDS: [&str; 10] = [
    "get",
    "del",
    "delete_by_query",
    "match_all",
    "match",
    "analyze",
    "cat",
    "info",
    "help",
    "exit",
];

/// Default `from` offset for `match_all` when not supplied.
pub const DEFAULT_FROM: u64 = 0;

/// Default `size` window for `match_all` when not supplied.
pub const DEFAULT_SIZE: u64 = 50;

/// A raw line split into keyword and positional arguments.
///
/// Produced by [`ParsedCommand::parse`]; the keyword is the first
/// space-delimited token and carries no semantics yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    keyword: String,
    arguments: Vec<String>,
}

impl ParsedCommand {
    /// Split a raw line on single spaces. Leading whitespace is stripped;
    /// internal whitespace is preserved as-is, so doubled spaces yield empty
    /// argument tokens.
    pub fn parse(raw_line: &str) -> Self {
        let mut tokens = raw_line.trim_start().split(' ');
        let keyword = tokens.next().unwrap_or_default().to_string();
        let arguments = tokens.map(str::to_string).collect();
        Self { keyword, arguments }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

/// A fully validated command, ready for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Empty input line; reprompt without output.
    Blank,
    /// `get {segments...}` - fetch an arbitrary path.
    Get { segments: Vec<String> },
    /// `del {index} [type] [id]` - delete an index, type, or document.
    Del { segments: Vec<String> },
    /// `delete_by_query {index} {field} {value}` - delete matching documents.
    DeleteByQuery {
        index: String,
        field: String,
        value: String,
    },
    /// `match_all {index} [from] [size]` - page through every document.
    MatchAll { index: String, from: u64, size: u64 },
    /// `match {index} {field} {value}` - full-text match on one field.
    Match {
        index: String,
        field: String,
        value: String,
    },
    /// `analyze {analyzer} {text}` - run the analysis chain on one token.
    Analyze { analyzer: String, text: String },
    /// `cat {subpath...}` - the _cat family of diagnostic endpoints.
    Cat { segments: Vec<String> },
    /// `info` - print the service info cached at startup.
    Info,
    /// `help` - print the recognized keywords.
    Help,
    /// `exit` - leave the interpreter.
    Exit,
}

/// Errors the grammar reports before any network call happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Wrong argument count or shape for a recognized keyword.
    #[error("invalid request. Use > {0}")]
    Usage(&'static str),
    /// The first token is not a recognized keyword; echoes the whole line.
    #[error("ERR unknown command '{0}'")]
    Unknown(String),
}

const DEL_USAGE: &str = "del {index} {type:optional} {id:optional}";
const DELETE_BY_QUERY_USAGE: &str = "delete_by_query {index} {field} {value}";
const MATCH_ALL_USAGE: &str = "match_all {index} {from:optional} {size:optional}";
const MATCH_USAGE: &str = "match {index} {field} {value}";
const ANALYZE_USAGE: &str = "analyze {analyzer} {text}";

impl Command {
    /// Parse and validate one raw input line.
    pub fn parse(raw_line: &str) -> Result<Self, CommandError> {
        Self::from_parsed(ParsedCommand::parse(raw_line), raw_line)
    }

    /// Validate a tokenized line against the per-keyword arity rules.
    ///
    /// `raw_line` is carried along only so the unknown-command error can echo
    /// the operator's input verbatim.
    pub fn from_parsed(parsed: ParsedCommand, raw_line: &str) -> Result<Self, CommandError> {
        let args = parsed.arguments();
        match parsed.keyword() {
            "" => Ok(Command::Blank),
            "get" => Ok(Command::Get {
                segments: args.to_vec(),
            }),
            "del" => {
                if args.is_empty() {
                    return Err(CommandError::Usage(DEL_USAGE));
                }
                Ok(Command::Del {
                    segments: args.to_vec(),
                })
            }
            "delete_by_query" => match args {
                [index, field, value] => Ok(Command::DeleteByQuery {
                    index: index.clone(),
                    field: field.clone(),
                    value: value.clone(),
                }),
                _ => Err(CommandError::Usage(DELETE_BY_QUERY_USAGE)),
            },
            "match_all" => {
                let (index, rest) = match args {
                    [] => return Err(CommandError::Usage(MATCH_ALL_USAGE)),
                    [index, rest @ ..] if rest.len() <= 2 => (index, rest),
                    _ => return Err(CommandError::Usage(MATCH_ALL_USAGE)),
                };
                let from = parse_window(rest.first(), DEFAULT_FROM, MATCH_ALL_USAGE)?;
                let size = parse_window(rest.get(1), DEFAULT_SIZE, MATCH_ALL_USAGE)?;
                Ok(Command::MatchAll {
                    index: index.clone(),
                    from,
                    size,
                })
            }
            "match" => match args {
                [index, field, value] => Ok(Command::Match {
                    index: index.clone(),
                    field: field.clone(),
                    value: value.clone(),
                }),
                _ => Err(CommandError::Usage(MATCH_USAGE)),
            },
            "analyze" => match args {
                [analyzer, text] => Ok(Command::Analyze {
                    analyzer: analyzer.clone(),
                    text: text.clone(),
                }),
                _ => Err(CommandError::Usage(ANALYZE_USAGE)),
            },
            "cat" => Ok(Command::Cat {
                segments: args.to_vec(),
            }),
            "info" => Ok(Command::Info),
            "help" => Ok(Command::Help),
            "exit" => Ok(Command::Exit),
            _ => Err(CommandError::Unknown(raw_line.to_string())),
        }
    }
}

/// Parse an optional `from`/`size` token. Absent tokens take the default;
/// present tokens must be non-negative integers, never silently coerced.
fn parse_window(
    token: Option<&String>,
    default: u64,
    usage: &'static str,
) -> Result<u64, CommandError> {
    match token {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| CommandError::Usage(usage)),
    }
}
