//! # Command Dispatcher
//!
//! Maps a validated [`Command`] to a request shape, runs it through the
//! transport, and hands the outcome to the renderer. Owns the session:
//! the base endpoint plus the service info cached by the startup probe.
//!
//! Every request path goes through [`join_path`], so the joining and
//! slash rules are defined exactly once.

use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};

use crate::command::{Command, KEYWORDS};
use crate::render::{pretty, render, Rendered};
use crate::transport::{RequestOutcome, Transport};

/// Join path segments into an absolute request path: a leading slash,
/// single slashes between segments, no trailing slash. No segments means
/// the root path.
pub fn join_path<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut path = String::new();
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}

/// Per-process session state. The endpoint is fixed at construction; the
/// service info is written once by the connectivity probe and read-only
/// afterwards.
#[derive(Debug)]
pub struct Session {
    service_info: Map<String, Value>,
}

impl Session {
    pub fn service_info(&self) -> &Map<String, Value> {
        &self.service_info
    }
}

/// What one dispatched command asks the REPL loop to do next.
#[derive(Debug, PartialEq, Eq)]
pub enum DispatchResult {
    /// Print this and reprompt.
    Output(Rendered),
    /// Nothing to print (blank line); reprompt.
    Silent,
    /// Leave the interpreter.
    Exit,
}

/// Orchestrates grammar output through transport and renderer.
#[derive(Debug)]
pub struct Dispatcher<T: Transport> {
    transport: T,
    session: Session,
}

impl<T: Transport> Dispatcher<T> {
    /// Run the startup connectivity probe and build the dispatcher.
    ///
    /// One GET `/` decides whether the endpoint is usable: anything other
    /// than a 200 with a JSON object body is fatal, since without it the
    /// interpreter has no service to talk to. Returns the dispatcher plus
    /// the probe body for echoing to the operator.
    pub fn connect(transport: T) -> Result<(Self, String)> {
        let outcome = transport.get("/", None);
        let body = match outcome {
            RequestOutcome::Response { status: 200, body } => body,
            RequestOutcome::Response { status, .. } => {
                bail!("invalid host (service answered with status {status})")
            }
            RequestOutcome::Failed { error } => bail!("invalid host ({error})"),
        };
        let info: Value = serde_json::from_str(&body)
            .context("service answered 200 but the body is not valid JSON")?;
        let Value::Object(service_info) = info else {
            bail!("service answered 200 but the body is not a JSON object");
        };
        tracing::info!("connected, service info cached");
        let dispatcher = Self {
            transport,
            session: Session { service_info },
        };
        Ok((dispatcher, body))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The underlying transport; handy for call-recording stand-ins in tests.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute one command. Never fails: service errors and transport
    /// failures come back as error-flagged output and the loop continues.
    pub fn dispatch(&self, command: &Command) -> DispatchResult {
        let outcome = match command {
            Command::Blank => return DispatchResult::Silent,
            Command::Exit => return DispatchResult::Exit,
            Command::Help => {
                return DispatchResult::Output(Rendered {
                    text: format!("Commands: {}", KEYWORDS.join(", ")),
                    is_error: false,
                })
            }
            Command::Info => {
                return DispatchResult::Output(Rendered {
                    text: pretty(&Value::Object(self.session.service_info.clone())),
                    is_error: false,
                })
            }
            Command::Get { segments } => self
                .transport
                .get(&join_path(segments.iter().map(String::as_str)), None),
            Command::Del { segments } => self
                .transport
                .delete(&join_path(segments.iter().map(String::as_str))),
            Command::DeleteByQuery {
                index,
                field,
                value,
            } => {
                let body = json!({"query": {"match": {(field.as_str()): value}}});
                self.transport
                    .post(&join_path([index.as_str(), "_delete_by_query"]), &body)
            }
            Command::MatchAll { index, from, size } => {
                let body = json!({"query": {"match_all": {}}, "from": from, "size": size});
                self.transport
                    .get(&join_path([index.as_str(), "_search"]), Some(&body))
            }
            Command::Match {
                index,
                field,
                value,
            } => {
                let body = json!({"query": {"match": {(field.as_str()): {"query": value}}}});
                self.transport
                    .get(&join_path([index.as_str(), "_search"]), Some(&body))
            }
            Command::Analyze { analyzer, text } => {
                let body = json!({"analyzer": analyzer, "text": text});
                self.transport.post(&join_path(["_analyze"]), &body)
            }
            Command::Cat { segments } => {
                let path = join_path(
                    std::iter::once("_cat").chain(segments.iter().map(String::as_str)),
                );
                self.transport.get(&path, None)
            }
        };
        DispatchResult::Output(render(&outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every transport call and replays canned outcomes.
    #[derive(Debug)]
    struct RecordingTransport {
        calls: RefCell<Vec<(String, String, Option<Value>)>>,
        outcome: RequestOutcome,
    }

    impl RecordingTransport {
        fn ok() -> Self {
            Self::with_outcome(RequestOutcome::Response {
                status: 200,
                body: r#"{"cluster_name":"docs","version":{"number":"8.0.0"}}"#.to_string(),
            })
        }

        fn with_outcome(outcome: RequestOutcome) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                outcome,
            }
        }

        fn calls(&self) -> Vec<(String, String, Option<Value>)> {
            self.calls.borrow().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn get(&self, path: &str, body: Option<&Value>) -> RequestOutcome {
            self.calls
                .borrow_mut()
                .push(("GET".into(), path.into(), body.cloned()));
            self.outcome.clone()
        }

        fn delete(&self, path: &str) -> RequestOutcome {
            self.calls
                .borrow_mut()
                .push(("DELETE".into(), path.into(), None));
            self.outcome.clone()
        }

        fn post(&self, path: &str, body: &Value) -> RequestOutcome {
            self.calls
                .borrow_mut()
                .push(("POST".into(), path.into(), Some(body.clone())));
            self.outcome.clone()
        }
    }

    fn connected() -> Dispatcher<RecordingTransport> {
        let (dispatcher, _) = Dispatcher::connect(RecordingTransport::ok()).unwrap();
        // Drop the probe call so tests only see their own requests.
        dispatcher.transport.calls.borrow_mut().clear();
        dispatcher
    }

    #[test]
    fn test_join_path_empty_is_root() {
        let segments: [&str; 0] = [];
        assert_eq!(join_path(segments), "/");
    }

    #[test]
    fn test_join_path_segments() {
        assert_eq!(join_path(["a", "b", "c"]), "/a/b/c");
        assert_eq!(join_path(["idx"]), "/idx");
    }

    #[test]
    fn test_probe_failure_is_fatal() {
        let transport = RecordingTransport::with_outcome(RequestOutcome::Failed {
            error: "connection refused".into(),
        });
        let err = Dispatcher::connect(transport).unwrap_err();
        assert!(err.to_string().contains("invalid host"));
    }

    #[test]
    fn test_probe_rejects_non_200() {
        let transport = RecordingTransport::with_outcome(RequestOutcome::Response {
            status: 503,
            body: "busy".into(),
        });
        assert!(Dispatcher::connect(transport).is_err());
    }

    #[test]
    fn test_probe_rejects_non_json_body_on_200() {
        let transport = RecordingTransport::with_outcome(RequestOutcome::Response {
            status: 200,
            body: "<html>not a document store</html>".into(),
        });
        assert!(Dispatcher::connect(transport).is_err());
    }

    #[test]
    fn test_probe_caches_service_info() {
        let (dispatcher, greeting) = Dispatcher::connect(RecordingTransport::ok()).unwrap();
        assert_eq!(
            dispatcher.session().service_info()["cluster_name"],
            json!("docs")
        );
        assert!(greeting.contains("cluster_name"));
    }

    #[test]
    fn test_get_without_arguments_hits_root() {
        let dispatcher = connected();
        dispatcher.dispatch(&Command::Get { segments: vec![] });
        assert_eq!(
            dispatcher.transport.calls(),
            vec![("GET".into(), "/".into(), None)]
        );
    }

    #[test]
    fn test_get_joins_segments() {
        let dispatcher = connected();
        dispatcher.dispatch(&Command::Get {
            segments: vec!["a".into(), "b".into(), "c".into()],
        });
        assert_eq!(
            dispatcher.transport.calls(),
            vec![("GET".into(), "/a/b/c".into(), None)]
        );
    }

    #[test]
    fn test_del_joins_supplied_segments() {
        let dispatcher = connected();
        dispatcher.dispatch(&Command::Del {
            segments: vec!["idx".into(), "_doc".into(), "7".into()],
        });
        assert_eq!(
            dispatcher.transport.calls(),
            vec![("DELETE".into(), "/idx/_doc/7".into(), None)]
        );
    }

    #[test]
    fn test_del_single_index_has_no_trailing_slash() {
        let dispatcher = connected();
        dispatcher.dispatch(&Command::Del {
            segments: vec!["idx".into()],
        });
        assert_eq!(
            dispatcher.transport.calls(),
            vec![("DELETE".into(), "/idx".into(), None)]
        );
    }

    #[test]
    fn test_delete_by_query_shape() {
        let dispatcher = connected();
        dispatcher.dispatch(&Command::DeleteByQuery {
            index: "idx".into(),
            field: "field".into(),
            value: "val".into(),
        });
        assert_eq!(
            dispatcher.transport.calls(),
            vec![(
                "POST".into(),
                "/idx/_delete_by_query".into(),
                Some(json!({"query": {"match": {"field": "val"}}}))
            )]
        );
    }

    #[test]
    fn test_match_all_default_window() {
        let dispatcher = connected();
        dispatcher.dispatch(&Command::MatchAll {
            index: "idx".into(),
            from: 0,
            size: 50,
        });
        assert_eq!(
            dispatcher.transport.calls(),
            vec![(
                "GET".into(),
                "/idx/_search".into(),
                Some(json!({"query": {"match_all": {}}, "from": 0, "size": 50}))
            )]
        );
    }

    #[test]
    fn test_match_all_explicit_window() {
        let dispatcher = connected();
        dispatcher.dispatch(&Command::MatchAll {
            index: "idx".into(),
            from: 10,
            size: 5,
        });
        assert_eq!(
            dispatcher.transport.calls()[0].2,
            Some(json!({"query": {"match_all": {}}, "from": 10, "size": 5}))
        );
    }

    #[test]
    fn test_match_query_shape() {
        let dispatcher = connected();
        dispatcher.dispatch(&Command::Match {
            index: "idx".into(),
            field: "title".into(),
            value: "rust".into(),
        });
        assert_eq!(
            dispatcher.transport.calls(),
            vec![(
                "GET".into(),
                "/idx/_search".into(),
                Some(json!({"query": {"match": {"title": {"query": "rust"}}}}))
            )]
        );
    }

    #[test]
    fn test_analyze_shape() {
        let dispatcher = connected();
        dispatcher.dispatch(&Command::Analyze {
            analyzer: "standard".into(),
            text: "hello".into(),
        });
        assert_eq!(
            dispatcher.transport.calls(),
            vec![(
                "POST".into(),
                "/_analyze".into(),
                Some(json!({"analyzer": "standard", "text": "hello"}))
            )]
        );
    }

    #[test]
    fn test_cat_prefixes_subpath() {
        let dispatcher = connected();
        dispatcher.dispatch(&Command::Cat {
            segments: vec!["indices".into()],
        });
        assert_eq!(
            dispatcher.transport.calls(),
            vec![("GET".into(), "/_cat/indices".into(), None)]
        );
    }

    #[test]
    fn test_cat_without_arguments() {
        let dispatcher = connected();
        dispatcher.dispatch(&Command::Cat { segments: vec![] });
        assert_eq!(
            dispatcher.transport.calls(),
            vec![("GET".into(), "/_cat".into(), None)]
        );
    }

    #[test]
    fn test_info_issues_no_request() {
        let dispatcher = connected();
        let result = dispatcher.dispatch(&Command::Info);
        assert!(dispatcher.transport.calls().is_empty());
        match result {
            DispatchResult::Output(rendered) => {
                assert!(!rendered.is_error);
                assert!(rendered.text.contains("cluster_name"));
            }
            other => panic!("expected output, got {other:?}"),
        }
    }

    #[test]
    fn test_help_lists_all_keywords() {
        let dispatcher = connected();
        let result = dispatcher.dispatch(&Command::Help);
        assert!(dispatcher.transport.calls().is_empty());
        assert_eq!(
            result,
            DispatchResult::Output(Rendered {
                text: "Commands: get, del, delete_by_query, match_all, match, analyze, cat, \
                       info, help, exit"
                    .into(),
                is_error: false,
            })
        );
    }

    #[test]
    fn test_blank_is_silent_and_requestless() {
        let dispatcher = connected();
        assert_eq!(dispatcher.dispatch(&Command::Blank), DispatchResult::Silent);
        assert!(dispatcher.transport.calls().is_empty());
    }

    #[test]
    fn test_exit_stops_the_loop() {
        let dispatcher = connected();
        assert_eq!(dispatcher.dispatch(&Command::Exit), DispatchResult::Exit);
    }

    #[test]
    fn test_service_error_still_renders_body() {
        let transport = RecordingTransport::with_outcome(RequestOutcome::Response {
            status: 404,
            body: r#"{"error":"index_not_found_exception"}"#.into(),
        });
        // Bypass connect so the canned 404 only answers the command itself.
        let dispatcher = Dispatcher {
            transport,
            session: Session {
                service_info: Map::new(),
            },
        };
        match dispatcher.dispatch(&Command::Get {
            segments: vec!["missing".into()],
        }) {
            DispatchResult::Output(rendered) => {
                assert!(rendered.is_error);
                assert!(rendered.text.contains("index_not_found_exception"));
            }
            other => panic!("expected output, got {other:?}"),
        }
    }
}
