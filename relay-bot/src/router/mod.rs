//! # Command router
//!
//! Maps an [`Input`] plus the user's [`Session`] to a [`Reply`], mutating the session in place.
//! At most one gateway call per update. Gateway failures become their fixed user message and leave
//! history and last response untouched.

mod input;
pub mod replies;

use std::sync::Arc;

use ai_gateway::{AiGateway, GatewayError, GatewayRequest};
use tracing::{info, instrument, warn};

use crate::core::Reply;
use crate::session::{Mode, Session, Turn, DEFAULT_HISTORY_CAP};

pub use input::{Action, Command, FollowUp, Input};

/// Input and history limits applied by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterLimits {
    /// Max characters (Unicode scalar values) in a free-text message.
    pub max_message_chars: usize,
    /// Max turns kept in session history.
    pub history_cap: usize,
    /// Recent turns sent as gateway context; 0 disables.
    pub context_turns: usize,
}

impl Default for RouterLimits {
    fn default() -> Self {
        Self {
            max_message_chars: 1000,
            history_cap: DEFAULT_HISTORY_CAP,
            context_turns: 0,
        }
    }
}

/// Dispatches commands, button actions and free text.
pub struct CommandRouter {
    gateway: Arc<dyn AiGateway>,
    limits: RouterLimits,
}

impl CommandRouter {
    pub fn new(gateway: Arc<dyn AiGateway>, limits: RouterLimits) -> Self {
        Self { gateway, limits }
    }

    pub fn limits(&self) -> RouterLimits {
        self.limits
    }

    /// Whether routing `input` against `session` would reach the gateway. Used to show "typing…" up front.
    pub fn will_call_gateway(&self, session: &Session, input: &Input) -> bool {
        match input {
            Input::Text(text) => self.validate(text).is_ok(),
            Input::Action(Action::FollowUp(_)) => session.last_response.is_some(),
            _ => false,
        }
    }

    /// Routes one update for this session.
    #[instrument(skip(self, session, input), fields(user_id = session.user_id))]
    pub async fn route(&self, session: &mut Session, input: &Input) -> Reply {
        match input {
            Input::Command(Command::Start) => replies::welcome(),
            Input::Command(Command::Help) => replies::help(),
            Input::Command(Command::New) | Input::Action(Action::NewChat) => {
                session.reset();
                info!(user_id = session.user_id, "step: history cleared");
                replies::history_cleared()
            }
            Input::Command(Command::Mode) => replies::mode_menu(),
            Input::Command(Command::Feedback(text)) => Self::feedback(session, text),
            Input::Action(Action::SelectMode(mode)) => {
                Self::set_mode(session, *mode);
                Reply::text(replies::mode_switched(*mode)).editing_origin()
            }
            Input::Action(Action::QuickQuestion) => Reply::text(replies::MSG_QUICK_QUESTION),
            Input::Action(Action::CreativeWriting) => {
                Self::set_mode(session, Mode::Creative);
                replies::creative_started()
            }
            Input::Action(Action::CodeHelp) => {
                Self::set_mode(session, Mode::Coder);
                replies::code_help_started()
            }
            Input::Action(Action::FollowUp(kind)) => self.follow_up(session, *kind).await,
            Input::Text(text) => self.converse(session, text).await,
        }
    }

    fn set_mode(session: &mut Session, mode: Mode) {
        info!(user_id = session.user_id, from = %session.mode, to = %mode, "step: mode switched");
        session.mode = mode;
    }

    fn feedback(session: &Session, text: &str) -> Reply {
        if text.is_empty() {
            return Reply::text(replies::MSG_FEEDBACK_USAGE);
        }
        info!(user_id = session.user_id, feedback = %text, "User feedback received");
        Reply::text(replies::MSG_FEEDBACK_THANKS)
    }

    /// Non-empty after trimming and at most `max_message_chars` characters.
    fn validate(&self, text: &str) -> Result<(), Reply> {
        if text.trim().is_empty() {
            return Err(Reply::text(replies::MSG_EMPTY_INPUT));
        }
        if text.chars().count() > self.limits.max_message_chars {
            return Err(Reply::text(replies::too_long(self.limits.max_message_chars)));
        }
        Ok(())
    }

    /// Free text: mode prefix + raw text → gateway; on success record the turn.
    async fn converse(&self, session: &mut Session, text: &str) -> Reply {
        if let Err(reply) = self.validate(text) {
            info!(user_id = session.user_id, "step: input rejected by validation");
            return reply;
        }

        let prompt = match session.mode.prompt_prefix() {
            Some(prefix) => format!("{}{}", prefix, text),
            None => text.to_string(),
        };
        let request = GatewayRequest::new(prompt)
            .with_user_id(session.user_id)
            .with_context(session.context_hint(self.limits.context_turns));

        match self.ask(request).await {
            Ok(answer) => {
                session.last_response = Some(answer.clone());
                session.push_turn(Turn::new(text, answer.clone()), self.limits.history_cap);
                info!(
                    user_id = session.user_id,
                    history_len = session.history.len(),
                    "step: turn recorded"
                );
                replies::answer(answer)
            }
            Err(e) => {
                warn!(user_id = session.user_id, error = %e, "Gateway call failed");
                Reply::text(e.user_message())
            }
        }
    }

    /// One gateway call. A blank answer counts as a failed call: it can neither be shown nor recorded.
    async fn ask(&self, request: GatewayRequest) -> Result<String, GatewayError> {
        let answer = self.gateway.ask(request).await?;
        if answer.trim().is_empty() {
            return Err(GatewayError::Unavailable("empty reply".to_string()));
        }
        Ok(answer)
    }

    /// Continue / rephrase / summarize the last response. Updates only `last_response`.
    async fn follow_up(&self, session: &mut Session, kind: FollowUp) -> Reply {
        let Some(last) = session.last_response.as_deref() else {
            return Reply::text(replies::MSG_NOTHING_TO_FOLLOW_UP);
        };

        let request = GatewayRequest::new(format!("{}{}", kind.prompt_lead(), last))
            .with_user_id(session.user_id);

        match self.ask(request).await {
            Ok(answer) => {
                session.last_response = Some(answer.clone());
                replies::follow_up_answer(answer)
            }
            Err(e) => {
                warn!(user_id = session.user_id, error = %e, follow_up = ?kind, "Gateway call failed");
                Reply::text(e.user_message())
            }
        }
    }
}
