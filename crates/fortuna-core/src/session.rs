//! Chat session controller
//!
//! Owns the transcript, the composer, and panel visibility, and runs at most
//! one completion dispatch at a time. The outbound call runs on a spawned
//! task; its result comes back as a [`DispatchOutcome`] on a channel and is
//! applied by [`ChatSession::resolve`] on the owner's event loop, so session
//! state only ever changes on that loop.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::ai::{CompletionError, CompletionService};
use crate::composer::Composer;
use crate::persona::{build_prompt, CALL_FAILURE_FALLBACK, EMPTY_RESPONSE_FALLBACK};
use crate::state::ChatMessage;
use crate::transcript::Transcript;

/// Identifies one dispatch so a late or foreign outcome can be recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchId(u64);

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of one completion call, delivered back to the session owner
#[derive(Debug)]
pub struct DispatchOutcome {
    pub id: DispatchId,
    pub result: Result<Option<String>, CompletionError>,
}

pub struct ChatSession {
    transcript: Transcript,
    composer: Composer,
    panel_open: bool,

    // Single-flight guard: Some while a dispatch is outstanding
    in_flight: Option<DispatchId>,
    next_id: u64,
    torn_down: bool,

    // Set on every append, cleared when the view scrolls
    follow_latest: bool,

    service: Arc<dyn CompletionService>,
    outcomes: mpsc::UnboundedSender<DispatchOutcome>,
}

impl ChatSession {
    /// Outcomes of every dispatch are sent on `outcomes`; the owner feeds
    /// them back through [`ChatSession::resolve`].
    pub fn new(
        service: Arc<dyn CompletionService>,
        outcomes: mpsc::UnboundedSender<DispatchOutcome>,
    ) -> Self {
        Self {
            transcript: Transcript::seeded(),
            composer: Composer::new(),
            panel_open: false,
            in_flight: None,
            next_id: 0,
            torn_down: false,
            follow_latest: false,
            service,
            outcomes,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn model(&self) -> &str {
        self.service.model()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    /// Hides the panel. An outstanding dispatch keeps running.
    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    /// Send whatever the composer holds. Does nothing while the panel is
    /// closed, while a dispatch is pending, or when the text is blank; in
    /// those cases the composer keeps its text.
    pub fn submit(&mut self) -> Option<DispatchId> {
        if !self.panel_open || self.is_pending() || !self.composer.is_submittable() {
            return None;
        }
        let text = self.composer.take();
        self.send(&text)
    }

    /// Start a dispatch for `text`. Blank text, a pending dispatch, or a torn
    /// down session make this a silent no-op returning `None`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send(&mut self, text: &str) -> Option<DispatchId> {
        if self.torn_down || text.trim().is_empty() {
            return None;
        }
        if let Some(current) = self.in_flight {
            debug!(dispatch = %current, "send rejected, dispatch already in flight");
            return None;
        }

        self.append(ChatMessage::visitor(text));

        let id = DispatchId(self.next_id);
        self.next_id += 1;
        self.in_flight = Some(id);

        let prompt = build_prompt(text);
        let service = Arc::clone(&self.service);
        let outcomes = self.outcomes.clone();
        info!(dispatch = %id, model = service.model(), "dispatching visitor message");

        tokio::spawn(async move {
            // Run the call on its own task so a panicking client still
            // produces an outcome and the session never stays pending.
            let call = tokio::spawn(async move { service.complete(&prompt).await });
            let result = match call.await {
                Ok(result) => result,
                Err(join_err) => Err(CompletionError::Aborted(join_err.to_string())),
            };

            // A closed receiver means the owner is gone; nothing to update
            let _ = outcomes.send(DispatchOutcome { id, result });
        });

        Some(id)
    }

    /// Apply a dispatch outcome. Returns false when the outcome was ignored
    /// because the session was torn down or the outcome is not for the
    /// dispatch currently in flight.
    pub fn resolve(&mut self, outcome: DispatchOutcome) -> bool {
        if self.torn_down {
            debug!(dispatch = %outcome.id, "ignoring outcome after teardown");
            return false;
        }
        if self.in_flight != Some(outcome.id) {
            warn!(dispatch = %outcome.id, "ignoring outcome for a dispatch that is not in flight");
            return false;
        }

        let reply = match outcome.result {
            Ok(Some(text)) if !text.trim().is_empty() => {
                debug!(dispatch = %outcome.id, chars = text.chars().count(), "assistant replied");
                text
            }
            Ok(_) => {
                warn!(dispatch = %outcome.id, "provider returned no text");
                EMPTY_RESPONSE_FALLBACK.to_string()
            }
            Err(err) => {
                error!(
                    dispatch = %outcome.id,
                    model = self.service.model(),
                    auth = err.is_auth(),
                    error = %err,
                    "completion call failed"
                );
                CALL_FAILURE_FALLBACK.to_string()
            }
        };

        self.append(ChatMessage::assistant(reply));
        self.in_flight = None;
        true
    }

    /// Detach from any outstanding dispatch. A late outcome becomes a no-op
    /// and further sends are refused.
    pub fn teardown(&mut self) {
        if let Some(id) = self.in_flight.take() {
            debug!(dispatch = %id, "session torn down with dispatch outstanding");
        }
        self.torn_down = true;
    }

    /// True once after each transcript append
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.follow_latest)
    }

    fn append(&mut self, message: ChatMessage) {
        self.transcript.push(message);
        self.follow_latest = true;
    }
}

/// Run one dispatch to completion outside any UI and return the assistant
/// reply (or the fallback that replaced it). `None` for blank questions.
pub async fn ask(service: Arc<dyn CompletionService>, question: &str) -> Option<ChatMessage> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = ChatSession::new(service, tx);

    session.send(question)?;
    let outcome = rx.recv().await?;
    session.resolve(outcome);
    session.transcript().last().cloned()
}
