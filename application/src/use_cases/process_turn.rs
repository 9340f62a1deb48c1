//! Process Turn use case.
//!
//! Runs one conversational turn end to end:
//!
//! ```text
//! user text
//!   → normalize
//!   → IntentClassifier        (tool or UnrecognizedIntent)
//!   → slot extraction         (text rules + context, may run a producer tool)
//!   → Dispatcher              (validate, default-fill, invoke)
//!   → ConversationContext     (merge Ok result)
//!   → ReplyFormatter          (assistant text + optional artifact)
//! ```
//!
//! The use case holds only read-only collaborators. Session state is the
//! [`ConversationContext`] passed in by the caller, one per conversation.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::use_cases::dispatch::Dispatcher;
use seismic_domain::{
    ArtifactHandle, ConversationContext, DispatchOutcome, IntentClassifier, ParameterSet,
    ReplyFormatter, SlotExtractor, ToolRegistry, ToolSpec, UNRECOGNIZED_HINT, normalize,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What a turn hands back to the chat UI.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReply {
    /// Assistant text (Markdown)
    pub text: String,
    /// Rendered output produced by this turn, if any
    pub artifact: Option<ArtifactHandle>,
    /// Tool the request was routed to, if any
    pub tool: Option<String>,
    /// Dispatch outcome of the turn
    pub outcome: DispatchOutcome,
}

impl TurnReply {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Use case for processing a single chat turn.
pub struct ProcessTurnUseCase {
    registry: Arc<ToolRegistry>,
    classifier: IntentClassifier,
    dispatcher: Dispatcher,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ProcessTurnUseCase {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            classifier: IntentClassifier,
            dispatcher: Dispatcher,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Process one user message against a session's context.
    ///
    /// Never fails: every path yields reply text, and the turn is recorded
    /// in the context transcript.
    pub fn execute(&self, user_text: &str, context: &mut ConversationContext) -> TurnReply {
        self.conversation_logger.log(ConversationEvent::new(
            "user_message",
            json!({ "text": user_text, "turn": context.turns().len() + 1 }),
        ));

        let text = normalize(user_text);
        let intent = self.classifier.classify(&self.registry, &text);
        debug!(
            scores = ?self.classifier.scores(&self.registry, &text),
            "Classified request"
        );

        let reply = match intent.tool {
            Some(tool) => {
                info!(tool = %tool.name, confidence = intent.confidence, "Resolved intent");
                self.run_tool(tool, &text, context)
            }
            None => {
                info!("No tool matched the request");
                TurnReply {
                    text: UNRECOGNIZED_HINT.to_string(),
                    artifact: None,
                    tool: None,
                    outcome: DispatchOutcome::UnrecognizedIntent(UNRECOGNIZED_HINT.to_string()),
                }
            }
        };

        context.record_turn(user_text, reply.text.clone());
        self.conversation_logger.log(ConversationEvent::new(
            "assistant_reply",
            json!({
                "tool": reply.tool,
                "outcome": reply.outcome.label(),
                "text": reply.text,
                "artifact": reply.artifact.as_ref().map(|a| a.uri.clone()),
            }),
        ));

        reply
    }

    fn run_tool(&self, tool: &ToolSpec, text: &str, context: &mut ConversationContext) -> TurnReply {
        let mut params = self.extract(tool, text, context);
        debug!(tool = %tool.name, slots = ?params.keys().collect::<Vec<_>>(), "Extracted slots");

        let outcome = self.dispatch_and_merge(tool, &mut params, context);
        let text = ReplyFormatter::format_outcome(&tool.name, &params, &outcome);
        let artifact = outcome.result().and_then(ParameterSet::first_artifact).cloned();

        TurnReply {
            text,
            artifact,
            tool: Some(tool.name.clone()),
            outcome,
        }
    }

    /// Fill `tool`'s slots from lower-cased `text` and the session context.
    ///
    /// Context slots whose value is missing are produced on demand by
    /// running the producing tool on the same text; its result is merged
    /// into the context before being copied.
    pub fn extract(
        &self,
        tool: &ToolSpec,
        text: &str,
        context: &mut ConversationContext,
    ) -> ParameterSet {
        let mut in_progress = vec![tool.name.clone()];
        self.extract_slots(tool, text, context, &mut in_progress)
    }

    fn extract_slots(
        &self,
        tool: &ToolSpec,
        text: &str,
        context: &mut ConversationContext,
        in_progress: &mut Vec<String>,
    ) -> ParameterSet {
        let mut params = ParameterSet::new();

        for rule in &tool.slots {
            match &rule.extractor {
                SlotExtractor::FromContext {
                    companions,
                    producer,
                } => {
                    if !context.contains(&rule.slot) {
                        self.produce(producer, text, context, in_progress);
                    }
                    let Some(value) = context.get(&rule.slot) else {
                        continue;
                    };
                    params.insert(rule.slot.clone(), value.clone());
                    for key in companions {
                        if let Some(value) = context.get(key) {
                            params.insert(key.clone(), value.clone());
                        }
                    }
                }
                _ => {
                    if let Some(value) = rule.extract(text) {
                        params.insert(rule.slot.clone(), value);
                    }
                }
            }
        }

        params
    }

    /// Run `producer` on `text` so its result lands in the context.
    fn produce(
        &self,
        producer: &str,
        text: &str,
        context: &mut ConversationContext,
        in_progress: &mut Vec<String>,
    ) {
        if in_progress.iter().any(|name| name == producer) {
            warn!(producer, "Producer cycle detected, leaving slot unset");
            return;
        }
        let tool = match self.registry.lookup(producer) {
            Ok(tool) => tool,
            Err(e) => {
                warn!(error = %e, "Cannot produce missing context slot");
                return;
            }
        };

        in_progress.push(producer.to_string());
        let mut params = self.extract_slots(tool, text, context, in_progress);
        in_progress.pop();

        let outcome = self.dispatch_and_merge(tool, &mut params, context);
        debug!(producer, outcome = outcome.label(), "Ran producer for missing context slot");
    }

    fn dispatch_and_merge(
        &self,
        tool: &ToolSpec,
        params: &mut ParameterSet,
        context: &mut ConversationContext,
    ) -> DispatchOutcome {
        let outcome = self.dispatcher.dispatch(tool, params);

        self.conversation_logger.log(ConversationEvent::new(
            "tool_dispatch",
            json!({
                "tool": tool.name,
                "params": params.keys().collect::<Vec<_>>(),
                "outcome": outcome.label(),
            }),
        ));

        if let DispatchOutcome::Ok(result) = &outcome {
            let overwritten = context.merge(result);
            if !overwritten.is_empty() {
                debug!(tool = %tool.name, ?overwritten, "Context fields overwritten");
            }
        }

        outcome
    }
}
