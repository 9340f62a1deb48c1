//! Chat session: one conversation's state over a shared turn pipeline.

use crate::use_cases::process_turn::{ProcessTurnUseCase, TurnReply};
use seismic_domain::{ConversationContext, ToolRegistry};
use std::sync::Arc;
use tracing::info;

/// A single conversation.
///
/// Sessions never share context. Several sessions may share one
/// [`ProcessTurnUseCase`].
pub struct ChatSession {
    use_case: Arc<ProcessTurnUseCase>,
    context: ConversationContext,
}

impl ChatSession {
    pub fn new(use_case: Arc<ProcessTurnUseCase>) -> Self {
        Self {
            use_case,
            context: ConversationContext::new(),
        }
    }

    /// Process one user message.
    pub fn send(&mut self, text: &str) -> TurnReply {
        self.use_case.execute(text, &mut self.context)
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn registry(&self) -> &ToolRegistry {
        self.use_case.registry()
    }

    /// Start over with an empty context.
    pub fn reset(&mut self) {
        info!(turns = self.context.turns().len(), "Resetting conversation");
        self.context.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seismic_domain::{HandlerError, ParameterSet, SlotRule, ToolSpec};

    fn use_case() -> Arc<ProcessTurnUseCase> {
        let registry = ToolRegistry::new()
            .register(
                ToolSpec::new(
                    "make_ricker",
                    "",
                    |p: &ParameterSet| -> Result<ParameterSet, HandlerError> {
                        let f = p.number("frequency").unwrap_or_default();
                        Ok(ParameterSet::new().with("wavelet", vec![f]))
                    },
                )
                .with_keywords(["ricker", "wavelet"])
                .require("frequency")
                .with_slot(SlotRule::frequency("frequency")),
            )
            .register(
                ToolSpec::new(
                    "plot_ricker",
                    "",
                    |p: &ParameterSet| -> Result<ParameterSet, HandlerError> { Ok(p.clone()) },
                )
                .with_keywords(["plot"])
                .require("wavelet")
                .with_slot(SlotRule::from_context("wavelet", &[], "make_ricker")),
            );
        Arc::new(ProcessTurnUseCase::new(Arc::new(registry)))
    }

    #[test]
    fn test_sessions_do_not_share_context() {
        let use_case = use_case();
        let mut first = ChatSession::new(use_case.clone());
        let mut second = ChatSession::new(use_case);

        assert!(first.send("a 30 hz ricker wavelet").is_ok());
        assert!(first.send("plot it").is_ok());
        assert!(!second.send("plot it").is_ok());
        assert!(!second.context().contains("wavelet"));
    }

    #[test]
    fn test_reset_forgets_context() {
        let mut session = ChatSession::new(use_case());
        session.send("a 30 hz ricker wavelet");
        assert_eq!(session.context().turns().len(), 1);

        session.reset();
        assert!(session.context().values().is_empty());
        assert!(session.context().turns().is_empty());
        assert!(!session.send("plot it").is_ok());
    }
}
