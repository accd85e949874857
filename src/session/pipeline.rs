//! Generation-tagged attribution pipeline.
//!
//! Drives the whole flow: selection event in, decoration out. Blame fetches
//! are asynchronous and a new selection can arrive while one is in flight,
//! so every event is stamped with a generation from a monotonically
//! increasing counter and a completed attribution renders only while its
//! generation is still the newest — last write wins, stale results are
//! dropped. A fetch that outlives the configured timeout is abandoned and
//! renders as "no decoration".

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::attribution::contact::CONTACT_COLOR;
use crate::attribution::{
    BlameAttributor, BlameSource, build_contact_payload, resolve_document_path,
};
use crate::git::repository::format_relative_time;
use crate::models::{Decoration, DecorationAttachment, DecorationRange, Hunk, SelectionNotice};
use crate::session::watcher::{SelectionEvent, SelectionWatcher};

/// Sink for rendered decorations. Applying an empty list clears whatever
/// was shown before.
pub trait DecorationHost: Send + Sync {
    fn apply(&self, uri: &str, decorations: Vec<Decoration>);
}

/// Cheap-to-clone handle; clones share the generation counter and sink.
#[derive(Clone)]
pub struct AttributionPipeline {
    inner: Arc<PipelineInner>,
}

struct PipelineInner {
    attributor: BlameAttributor,
    source: Arc<dyn BlameSource>,
    host: Arc<dyn DecorationHost>,
    attribution_timeout: Duration,

    /// Generation of the newest selection event
    generation: AtomicU64,
    /// Generation of the last render that went through
    rendered: Mutex<u64>,
}

impl AttributionPipeline {
    pub fn new(
        source: Arc<dyn BlameSource>,
        host: Arc<dyn DecorationHost>,
        attribution_timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(PipelineInner {
                attributor: BlameAttributor::new(Arc::clone(&source)),
                source,
                host,
                attribution_timeout,
                generation: AtomicU64::new(0),
                rendered: Mutex::new(0),
            }),
        }
    }

    /// Consume selection notices until the channel closes, deduping them
    /// through a `SelectionWatcher` and dispatching each resulting event.
    pub async fn run(self, mut notices: mpsc::Receiver<SelectionNotice>) {
        let mut watcher = SelectionWatcher::new();
        while let Some(notice) = notices.recv().await {
            if let Some(event) = watcher.observe(&notice) {
                self.dispatch(event);
            }
        }
    }

    /// Start attribution for one selection event. Returns immediately; the
    /// render happens from a spawned task unless the selection is empty.
    pub fn dispatch(&self, event: SelectionEvent) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(line) = event.line else {
            // Empty selection: clear now, and the generation bump alone
            // invalidates any fetch still in flight
            self.inner.render(generation, &event.uri, Vec::new());
            return;
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let decorations = match tokio::time::timeout(
                inner.attribution_timeout,
                inner.decorations_for(&event.uri, line),
            )
            .await
            {
                Ok(decorations) => decorations,
                Err(_) => {
                    tracing::warn!(uri = %event.uri, line, "attribution timed out; clearing");
                    Vec::new()
                }
            };
            inner.render(generation, &event.uri, decorations);
        });
    }
}

impl PipelineInner {
    /// Resolve the line's author and build its contact decoration. Every
    /// failure path degrades to an empty list.
    async fn decorations_for(&self, uri: &str, line: u32) -> Vec<Decoration> {
        let Some(hunk) = self.attributor.attribute(uri, line).await else {
            return Vec::new();
        };

        let document_text = match self.source.document_text(uri).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(uri, error = %e, "document text unavailable; quoting empty line");
                String::new()
            }
        };

        let path = resolve_document_path(uri);
        let payload = build_contact_payload(&hunk.author, &document_text, line, &path);
        vec![contact_decoration(
            line,
            &hunk,
            payload.label_text,
            payload.mail_link,
        )]
    }

    /// Apply a completed attribution unless a newer selection superseded it.
    fn render(&self, generation: u64, uri: &str, decorations: Vec<Decoration>) {
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(uri, generation, "discarding stale attribution result");
            return;
        }

        let Ok(mut rendered) = self.rendered.lock() else {
            return;
        };
        if generation <= *rendered {
            return;
        }
        *rendered = generation;
        self.host.apply(uri, decorations);
    }
}

fn contact_decoration(line: u32, hunk: &Hunk, label_text: String, mail_link: String) -> Decoration {
    Decoration {
        range: DecorationRange { line, character: 0 },
        after: DecorationAttachment {
            color: CONTACT_COLOR.to_string(),
            content_text: label_text,
            link_url: mail_link,
            hover_message: Some(format!(
                "Last modified {}",
                format_relative_time(hunk.timestamp)
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use crate::models::{Author, Person, SelectionRange};
    use async_trait::async_trait;
    use std::collections::HashMap;

    fn hunk(start: u32, end: u32, name: &str) -> Hunk {
        Hunk {
            start_line: start,
            end_line: end,
            author: Author {
                person: Person {
                    display_name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                },
            },
            commit_oid: "b".repeat(40),
            timestamp: 1_700_000_000,
        }
    }

    /// Source whose fetch latency can be scripted per line, to reorder
    /// completions relative to requests.
    struct ScriptedSource {
        hunks: Vec<Hunk>,
        delays: HashMap<u32, Duration>,
    }

    #[async_trait]
    impl BlameSource for ScriptedSource {
        async fn query_blame_hunks(&self, _uri: &str, line: Option<u32>) -> Result<Vec<Hunk>> {
            if let Some(delay) = line.and_then(|l| self.delays.get(&l)) {
                tokio::time::sleep(*delay).await;
            }
            Ok(self.hunks.clone())
        }

        async fn document_text(&self, _uri: &str) -> Result<String> {
            Ok("fn a() {}\nfn b() {}\nfn c() {}\nfn d() {}\nfn e() {}\nfn f() {}\nfn g() {}\nfn h() {}\n".to_string())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl BlameSource for FailingSource {
        async fn query_blame_hunks(&self, _uri: &str, _line: Option<u32>) -> Result<Vec<Hunk>> {
            Err(AppError::Internal("backend unreachable".to_string()))
        }

        async fn document_text(&self, _uri: &str) -> Result<String> {
            Err(AppError::Internal("backend unreachable".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        applied: Mutex<Vec<(String, Vec<Decoration>)>>,
    }

    impl RecordingHost {
        fn applied(&self) -> Vec<(String, Vec<Decoration>)> {
            self.applied.lock().unwrap().clone()
        }
    }

    impl DecorationHost for RecordingHost {
        fn apply(&self, uri: &str, decorations: Vec<Decoration>) {
            self.applied
                .lock()
                .unwrap()
                .push((uri.to_string(), decorations));
        }
    }

    fn pipeline_with(
        source: Arc<dyn BlameSource>,
        timeout: Duration,
    ) -> (AttributionPipeline, Arc<RecordingHost>) {
        let host = Arc::new(RecordingHost::default());
        let pipeline =
            AttributionPipeline::new(source, host.clone() as Arc<dyn DecorationHost>, timeout);
        (pipeline, host)
    }

    #[tokio::test]
    async fn attributed_selection_renders_contact_decoration() {
        let (pipeline, host) = pipeline_with(
            Arc::new(ScriptedSource {
                hunks: vec![hunk(0, 4, "Alice"), hunk(5, 9, "Bob")],
                delays: HashMap::new(),
            }),
            Duration::from_secs(1),
        );

        pipeline.dispatch(SelectionEvent {
            uri: "src/main.rs".to_string(),
            line: Some(5),
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let applied = host.applied();
        assert_eq!(applied.len(), 1);
        let (uri, decorations) = &applied[0];
        assert_eq!(uri, "src/main.rs");
        assert_eq!(decorations.len(), 1);
        assert_eq!(decorations[0].range.line, 5);
        assert!(decorations[0].after.content_text.contains("Bob"));
        assert!(
            decorations[0]
                .after
                .link_url
                .starts_with("mailto:bob@example.com?")
        );
    }

    #[tokio::test]
    async fn stale_fetch_never_overwrites_newer_selection() {
        let mut delays = HashMap::new();
        delays.insert(2, Duration::from_millis(80));
        delays.insert(7, Duration::from_millis(5));
        let (pipeline, host) = pipeline_with(
            Arc::new(ScriptedSource {
                hunks: vec![hunk(0, 4, "Alice"), hunk(5, 9, "Bob")],
                delays,
            }),
            Duration::from_secs(1),
        );

        // Line 2's fetch resolves after line 7's
        pipeline.dispatch(SelectionEvent {
            uri: "src/main.rs".to_string(),
            line: Some(2),
        });
        pipeline.dispatch(SelectionEvent {
            uri: "src/main.rs".to_string(),
            line: Some(7),
        });
        tokio::time::sleep(Duration::from_millis(200)).await;

        let applied = host.applied();
        assert_eq!(applied.len(), 1, "stale result must be discarded");
        assert!(applied[0].1[0].after.content_text.contains("Bob"));
    }

    #[tokio::test]
    async fn unattributable_line_clears_decorations() {
        let (pipeline, host) = pipeline_with(
            Arc::new(ScriptedSource {
                hunks: vec![hunk(0, 1, "Alice")],
                delays: HashMap::new(),
            }),
            Duration::from_secs(1),
        );

        pipeline.dispatch(SelectionEvent {
            uri: "src/main.rs".to_string(),
            line: Some(6),
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(host.applied(), vec![("src/main.rs".to_string(), vec![])]);
    }

    #[tokio::test]
    async fn fetch_failure_clears_instead_of_crashing() {
        let (pipeline, host) = pipeline_with(Arc::new(FailingSource), Duration::from_secs(1));

        pipeline.dispatch(SelectionEvent {
            uri: "src/main.rs".to_string(),
            line: Some(3),
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(host.applied(), vec![("src/main.rs".to_string(), vec![])]);
    }

    #[tokio::test]
    async fn slow_fetch_times_out_and_clears() {
        let mut delays = HashMap::new();
        delays.insert(1, Duration::from_millis(500));
        let (pipeline, host) = pipeline_with(
            Arc::new(ScriptedSource {
                hunks: vec![hunk(0, 4, "Alice")],
                delays,
            }),
            Duration::from_millis(20),
        );

        pipeline.dispatch(SelectionEvent {
            uri: "src/main.rs".to_string(),
            line: Some(1),
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(host.applied(), vec![("src/main.rs".to_string(), vec![])]);
    }

    #[tokio::test]
    async fn empty_selection_clears_immediately() {
        let (pipeline, host) = pipeline_with(
            Arc::new(ScriptedSource {
                hunks: vec![hunk(0, 4, "Alice")],
                delays: HashMap::new(),
            }),
            Duration::from_secs(1),
        );

        pipeline.dispatch(SelectionEvent {
            uri: "src/main.rs".to_string(),
            line: Some(2),
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        pipeline.dispatch(SelectionEvent {
            uri: "src/main.rs".to_string(),
            line: None,
        });

        let applied = host.applied();
        assert_eq!(applied.len(), 2);
        assert!(applied[1].1.is_empty(), "clear renders an empty list");
    }

    #[tokio::test]
    async fn run_loop_dedups_repeated_notices() {
        let (pipeline, host) = pipeline_with(
            Arc::new(ScriptedSource {
                hunks: vec![hunk(0, 9, "Alice")],
                delays: HashMap::new(),
            }),
            Duration::from_secs(1),
        );

        let (tx, rx) = mpsc::channel(8);
        let runner = tokio::spawn(pipeline.clone().run(rx));

        let notice = SelectionNotice {
            uri: "src/main.rs".to_string(),
            selections: vec![SelectionRange {
                start_line: 3,
                end_line: 3,
            }],
        };
        tx.send(notice.clone()).await.unwrap();
        tx.send(notice).await.unwrap();
        drop(tx);
        runner.await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(
            host.applied().len(),
            1,
            "duplicate notice must not re-render"
        );
    }
}
