//! Integration tests for the full chat turn flow.

use async_trait::async_trait;
use ragchat::config::RetrievalConfig;
use ragchat::core::{
    get_or_create_session_id, ChatController, IgnoreReason, MessageLog, Phase, Role, SubmitOutcome,
};
use ragchat::error::{Error, Result};
use ragchat::rag::RetrievalPipeline;
use ragchat::remote::{
    CompletionClient, DocumentIndex, MockCompletionClient, MockDocumentIndex, MockEmbeddingClient,
    NullMessageSink, RetrievedDocument, DEMO_ANSWER,
};
use ragchat::storage::{FileBackend, HistoryStore, MemoryBackend};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

fn controller_over(
    local: Arc<dyn HistoryStore>,
    index: Arc<dyn DocumentIndex>,
    completion: Arc<dyn CompletionClient>,
) -> ChatController {
    let session_id = get_or_create_session_id(local.as_ref());
    let log = Arc::new(MessageLog::open(
        session_id,
        "Welcome! How can I help?",
        local,
        Arc::new(NullMessageSink),
    ));
    let retrieval = RetrievalPipeline::new(
        Arc::new(MockEmbeddingClient),
        index,
        &RetrievalConfig::default(),
    );
    ChatController::new(log, retrieval, completion)
}

fn demo_controller() -> ChatController {
    controller_over(
        Arc::new(MemoryBackend::new()),
        Arc::new(MockDocumentIndex),
        Arc::new(MockCompletionClient::new()),
    )
}

// Session id is stable across calls and across backend reopen.
#[test]
fn session_id_is_stable() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let store = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
    let first = get_or_create_session_id(&store);
    let second = get_or_create_session_id(&store);
    assert_eq!(first, second);

    // A fresh backend over the same directory sees the same id.
    let reopened = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
    assert_eq!(get_or_create_session_id(&reopened), first);
}

// N successful turns leave 2N messages, strictly alternating roles.
#[tokio::test]
async fn turns_alternate_user_assistant() {
    let controller = demo_controller();

    let questions = ["first", "second", "third"];
    for question in questions {
        let outcome = controller.submit(question).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Answered(_)));
    }

    let messages = controller.messages();
    assert_eq!(messages.len(), 2 * questions.len());
    for (i, message) in messages.iter().enumerate() {
        let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
        assert_eq!(message.role, expected, "message {i} out of order");
    }
    assert_eq!(messages[0].content, "first");
    assert_eq!(messages[4].content, "third");
}

struct FlakyCompletion {
    fail_next: AtomicBool,
}

#[async_trait]
impl CompletionClient for FlakyCompletion {
    async fn complete(&self, _question: &str, _context: Option<&str>) -> Result<String> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(Error::Endpoint {
                status: 502,
                message: "upstream unavailable".to_string(),
            });
        }
        Ok("recovered answer".to_string())
    }
}

// A failed turn keeps the user message, returns to Idle, and the next
// submission advances normally.
#[tokio::test]
async fn failed_turn_preserves_user_message() {
    let controller = controller_over(
        Arc::new(MemoryBackend::new()),
        Arc::new(MockDocumentIndex),
        Arc::new(FlakyCompletion {
            fail_next: AtomicBool::new(true),
        }),
    );

    let err = controller.submit("does this work?").await.unwrap_err();
    assert!(matches!(err, Error::Endpoint { status: 502, .. }));

    let messages = controller.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "does this work?");
    assert_eq!(controller.phase(), Phase::Idle);

    // Manual resubmission succeeds.
    let outcome = controller.submit("does this work?").await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Answered(_)));

    let messages = controller.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(messages[2].content, "recovered answer");
}

struct BlockingCompletion {
    release: Notify,
}

#[async_trait]
impl CompletionClient for BlockingCompletion {
    async fn complete(&self, _question: &str, _context: Option<&str>) -> Result<String> {
        self.release.notified().await;
        Ok("slow answer".to_string())
    }
}

// Submitting while a turn is in flight is a no-op.
#[tokio::test]
async fn submit_while_awaiting_reply_is_ignored() {
    let completion = Arc::new(BlockingCompletion {
        release: Notify::new(),
    });
    let controller = Arc::new(controller_over(
        Arc::new(MemoryBackend::new()),
        Arc::new(MockDocumentIndex),
        completion.clone(),
    ));

    let in_flight = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit("first question").await })
    };

    // Let the first turn reach the completion await.
    while controller.phase() != Phase::AwaitingReply {
        tokio::task::yield_now().await;
    }
    assert_eq!(controller.messages().len(), 1);

    let outcome = controller.submit("second question").await.unwrap();
    assert!(matches!(
        outcome,
        SubmitOutcome::Ignored(IgnoreReason::TurnInFlight)
    ));
    assert_eq!(controller.messages().len(), 1);
    assert_eq!(controller.phase(), Phase::AwaitingReply);

    completion.release.notify_one();
    let outcome = in_flight.await.unwrap().unwrap();
    assert!(matches!(outcome, SubmitOutcome::Answered(_)));
    assert_eq!(controller.messages().len(), 2);
    assert_eq!(controller.phase(), Phase::Idle);
}

struct CapturingCompletion {
    seen: Mutex<Vec<(String, Option<String>)>>,
}

#[async_trait]
impl CompletionClient for CapturingCompletion {
    async fn complete(&self, question: &str, context: Option<&str>) -> Result<String> {
        self.seen
            .lock()
            .unwrap()
            .push((question.to_string(), context.map(String::from)));
        Ok("ok".to_string())
    }
}

struct FixedIndex(Vec<RetrievedDocument>);

#[async_trait]
impl DocumentIndex for FixedIndex {
    async fn match_documents(
        &self,
        _query_embedding: &[f32],
        _match_threshold: f32,
        _match_count: usize,
    ) -> Result<Vec<RetrievedDocument>> {
        Ok(self.0.clone())
    }
}

// Retrieved context reaches the completion request; no matches means no
// context field at all.
#[tokio::test]
async fn retrieved_context_flows_into_completion() {
    let completion = Arc::new(CapturingCompletion {
        seen: Mutex::new(Vec::new()),
    });
    let index = FixedIndex(vec![
        RetrievedDocument {
            content: "policy doc".to_string(),
            similarity: 0.9,
        },
        RetrievedDocument {
            content: "faq entry".to_string(),
            similarity: 0.82,
        },
    ]);
    let controller = controller_over(
        Arc::new(MemoryBackend::new()),
        Arc::new(index),
        completion.clone(),
    );

    controller.submit("what is the policy?").await.unwrap();

    let seen = completion.seen.lock().unwrap();
    assert_eq!(seen[0].0, "what is the policy?");
    assert_eq!(seen[0].1.as_deref(), Some("policy doc\n\nfaq entry"));
}

#[tokio::test]
async fn no_matches_means_no_context() {
    let completion = Arc::new(CapturingCompletion {
        seen: Mutex::new(Vec::new()),
    });
    let controller = controller_over(
        Arc::new(MemoryBackend::new()),
        Arc::new(MockDocumentIndex),
        completion.clone(),
    );

    controller.submit("anything").await.unwrap();

    let seen = completion.seen.lock().unwrap();
    assert_eq!(seen[0].1, None);
}

// Reset yields exactly one assistant welcome message and keeps the id.
#[tokio::test]
async fn reset_preserves_session_identity() {
    let controller = demo_controller();
    let session_id = controller.session_id().to_string();

    controller.submit("hello").await.unwrap();
    controller.submit("more").await.unwrap();
    controller.reset();

    let messages = controller.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::Assistant);
    assert_eq!(messages[0].content, "Welcome! How can I help?");
    assert_eq!(controller.session_id(), session_id);
}

// The conversation survives a "page reload": a new log over the same
// local backend sees exactly the messages visible before.
#[tokio::test]
async fn conversation_survives_reload() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let local: Arc<dyn HistoryStore> =
        Arc::new(FileBackend::new(temp_dir.path().to_path_buf()).unwrap());

    let controller = controller_over(
        local.clone(),
        Arc::new(MockDocumentIndex),
        Arc::new(MockCompletionClient::new()),
    );
    controller.submit("remember me").await.unwrap();
    let before: Vec<_> = controller
        .messages()
        .iter()
        .map(|m| (m.role, m.content.clone()))
        .collect();

    let reloaded = controller_over(
        local,
        Arc::new(MockDocumentIndex),
        Arc::new(MockCompletionClient::new()),
    );
    let after: Vec<_> = reloaded
        .messages()
        .iter()
        .map(|m| (m.role, m.content.clone()))
        .collect();

    assert_eq!(before, after);
    assert_eq!(reloaded.session_id(), controller.session_id());
}

// The demo-mode scenario: "hello" with no matches produces the canned
// two-message conversation.
#[tokio::test]
async fn demo_mode_hello_scenario() {
    let controller = demo_controller();

    let outcome = controller.submit("hello").await.unwrap();
    let SubmitOutcome::Answered(reply) = outcome else {
        panic!("expected an answered turn");
    };
    assert_eq!(reply.content, DEMO_ANSWER);

    let messages = controller.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "hello");
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, "Hello there! How can I help you today?");
}
