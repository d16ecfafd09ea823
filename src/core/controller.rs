//! Chat session controller.
//!
//! One turn at a time: `Idle` accepts a submission, `AwaitingReply` rejects
//! everything until the completion round-trip resolves. The user message is
//! appended before the round-trip starts and is never rolled back.

use crate::config::Config;
use crate::core::history::MessageLog;
use crate::core::message::Message;
use crate::core::session::get_or_create_session_id;
use crate::error::Result;
use crate::rag::RetrievalPipeline;
use crate::remote::{build_collaborators, CompletionClient};
use crate::storage::{FileBackend, HistoryStore, MemoryBackend};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ready to accept a submission.
    Idle,

    /// A completion round-trip is in flight.
    AwaitingReply,
}

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The input was empty after trimming.
    EmptyInput,

    /// Another turn is already in flight.
    TurnInFlight,
}

/// Result of an accepted or ignored submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The turn completed; the assistant reply was appended to the log.
    Answered(Message),

    /// The submission was a no-op; log and phase are unchanged.
    Ignored(IgnoreReason),
}

/// Orchestrates a chat session: message log, retrieval, completion.
pub struct ChatController {
    phase: Mutex<Phase>,
    log: Arc<MessageLog>,
    retrieval: RetrievalPipeline,
    completion: Arc<dyn CompletionClient>,
}

impl ChatController {
    /// Create a controller from explicit parts.
    #[must_use]
    pub fn new(
        log: Arc<MessageLog>,
        retrieval: RetrievalPipeline,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            phase: Mutex::new(Phase::Idle),
            log,
            retrieval,
            completion,
        }
    }

    /// Wire up a controller from configuration: local storage (file-backed,
    /// degrading to in-memory), session identity, and remote collaborators.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let local: Arc<dyn HistoryStore> = match FileBackend::new(config.storage.path.clone()) {
            Ok(backend) => Arc::new(backend),
            Err(err) => {
                warn!("local storage unavailable, state is transient: {err}");
                Arc::new(MemoryBackend::new())
            }
        };

        let session_id = get_or_create_session_id(local.as_ref());
        let collaborators = build_collaborators(config);

        let log = Arc::new(MessageLog::open(
            session_id,
            config.chat.welcome_message.clone(),
            local,
            collaborators.sink,
        ));

        let retrieval = RetrievalPipeline::new(
            collaborators.embedder,
            collaborators.index,
            &config.retrieval,
        );

        Self::new(log, retrieval, collaborators.completion)
    }

    /// Current controller phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        *self.phase.lock().unwrap()
    }

    /// Session this controller drives.
    #[must_use]
    pub fn session_id(&self) -> &str {
        self.log.session_id()
    }

    /// Ordered snapshot of the conversation.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.log.all()
    }

    /// Submit a user question and run one full turn.
    ///
    /// Empty input and re-entrant submissions are no-ops
    /// ([`SubmitOutcome::Ignored`]): log and phase are untouched.
    /// Otherwise the user message is appended, context is retrieved
    /// (best-effort), and the completion endpoint is called.
    ///
    /// # Errors
    ///
    /// Returns the completion failure for the caller to surface. The
    /// controller is back in [`Phase::Idle`], the user message remains in
    /// the log, and no assistant message was appended; resubmission is a
    /// manual caller decision.
    pub async fn submit(&self, text: &str) -> Result<SubmitOutcome> {
        let question = text.trim();
        if question.is_empty() {
            return Ok(SubmitOutcome::Ignored(IgnoreReason::EmptyInput));
        }

        // Check-and-set before the first await so a concurrent submit
        // observes the in-flight turn.
        {
            let mut phase = self.phase.lock().unwrap();
            if *phase == Phase::AwaitingReply {
                return Ok(SubmitOutcome::Ignored(IgnoreReason::TurnInFlight));
            }
            *phase = Phase::AwaitingReply;
        }

        self.log
            .append(Message::user(question, self.log.session_id()));

        let context_block = self.retrieval.retrieve_context(question).await;
        let context = (!context_block.is_empty()).then_some(context_block.as_str());

        let answer = match self.completion.complete(question, context).await {
            Ok(answer) => answer,
            Err(err) => {
                self.set_phase(Phase::Idle);
                return Err(err);
            }
        };

        let reply = Message::assistant(&answer, self.log.session_id());
        self.log.append(reply.clone());
        self.set_phase(Phase::Idle);

        Ok(SubmitOutcome::Answered(reply))
    }

    /// Start a fresh conversation (single welcome message) without
    /// discarding the session identifier.
    pub fn reset(&self) {
        self.log.reset();
    }

    fn set_phase(&self, phase: Phase) {
        *self.phase.lock().unwrap() = phase;
    }
}
