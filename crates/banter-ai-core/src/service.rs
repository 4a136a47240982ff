//! Coach service - composes prompts, the chat provider, and the parser

use std::sync::Arc;

use tracing::{debug, warn};

use crate::parse::parse_reply;
use crate::prompt::{coaching_prompt, vision_prompt, COACHING_TRIGGER, VISION_SYSTEM};
use crate::provider::{ChatProvider, UserContent};
use crate::AiError;

/// Analysis text used when the model reply carried no `ANALYSIS:` line.
///
/// Format drift is tolerated rather than failed: the suggestions are usually
/// still usable, and the warn log gives operators the drift signal.
pub const DEFAULT_ANALYSIS: &str =
    "No structured analysis was returned for this conversation.";

/// Structured result of one suggestion-generation call
#[derive(Debug, Clone)]
pub struct CoachSuggestions {
    pub analysis: String,
    pub suggestions: Vec<String>,
    /// Unparsed model reply, persisted for audit
    pub raw_response: String,
}

/// AI orchestration service
pub struct CoachService<P: ChatProvider> {
    provider: Arc<P>,
}

impl<P: ChatProvider> CoachService<P> {
    /// Create a new coach service
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Generate reply suggestions for a conversation context.
    ///
    /// Exactly one chat call. The suggestion list never exceeds
    /// `suggestion_count`; a reply without an analysis line falls back to
    /// [`DEFAULT_ANALYSIS`].
    pub async fn generate_suggestions(
        &self,
        context: &str,
        tone: &str,
        goal: &str,
        model: &str,
        suggestion_count: usize,
    ) -> Result<CoachSuggestions, AiError> {
        let system = coaching_prompt(context, tone, goal, suggestion_count);
        let raw = self
            .provider
            .chat(model, &system, UserContent::text(COACHING_TRIGGER))
            .await?;

        let parsed = parse_reply(&raw, suggestion_count);

        let analysis = match parsed.analysis {
            Some(analysis) => analysis,
            None => {
                warn!("Model reply carried no ANALYSIS line; substituting placeholder");
                DEFAULT_ANALYSIS.to_string()
            }
        };

        if parsed.suggestions.len() < suggestion_count {
            debug!(
                got = parsed.suggestions.len(),
                entitled = suggestion_count,
                "Model reply carried fewer suggestions than entitled"
            );
        }

        Ok(CoachSuggestions {
            analysis,
            suggestions: parsed.suggestions,
            raw_response: raw,
        })
    }

    /// Describe an image for use as conversation context.
    ///
    /// One multimodal chat call; the reply is returned verbatim.
    pub async fn describe_image(
        &self,
        image_base64: &str,
        hint: Option<&str>,
        model: &str,
    ) -> Result<String, AiError> {
        let prompt = vision_prompt(hint);
        self.provider
            .chat(
                model,
                VISION_SYSTEM,
                UserContent::with_image(prompt, image_base64),
            )
            .await
    }
}

impl<P: ChatProvider> std::fmt::Debug for CoachService<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoachService").finish_non_exhaustive()
    }
}
