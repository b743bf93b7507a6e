//! Inbound input classification: commands, button actions and free text.

use crate::core::Message;
use crate::session::Mode;

const MODE_PREFIX: &str = "mode_";

/// Slash commands the router understands. Unknown commands are treated as free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    New,
    Mode,
    /// `/feedback <text>`; text may be empty.
    Feedback(String),
}

impl Command {
    /// Parses `/name[@bot] [args]`. Returns None for non-commands and unknown names.
    pub fn parse(text: &str) -> Option<Command> {
        let text = text.trim_start();
        let rest = text.strip_prefix('/')?;
        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        let name = head.split('@').next().unwrap_or(head);
        match name {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "new" => Some(Command::New),
            "mode" => Some(Command::Mode),
            "feedback" => Some(Command::Feedback(args.to_string())),
            _ => None,
        }
    }

    /// (command, description) pairs for the bot command menu.
    pub fn descriptions() -> Vec<(&'static str, &'static str)> {
        vec![
            ("start", "Show the welcome menu"),
            ("new", "Start a fresh conversation"),
            ("mode", "Change AI personality"),
            ("help", "Show all commands"),
            ("feedback", "Send your suggestions"),
        ]
    }
}

/// Follow-up requests on the last AI reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    Continue,
    Rephrase,
    Summarize,
}

impl FollowUp {
    pub fn prompt_lead(&self) -> &'static str {
        match self {
            FollowUp::Continue => "Continue your last response: ",
            FollowUp::Rephrase => "Rephrase your last response: ",
            FollowUp::Summarize => "Summarize your last response: ",
        }
    }
}

/// Button actions, encoded as opaque callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectMode(Mode),
    FollowUp(FollowUp),
    NewChat,
    QuickQuestion,
    CreativeWriting,
    CodeHelp,
}

impl Action {
    /// Callback data sent with the button.
    pub fn callback_data(&self) -> String {
        match self {
            Action::SelectMode(mode) => format!("{}{}", MODE_PREFIX, mode.as_str()),
            Action::FollowUp(FollowUp::Continue) => "continue".to_string(),
            Action::FollowUp(FollowUp::Rephrase) => "rephrase".to_string(),
            Action::FollowUp(FollowUp::Summarize) => "summarize".to_string(),
            Action::NewChat => "new_chat".to_string(),
            Action::QuickQuestion => "quick_question".to_string(),
            Action::CreativeWriting => "creative_writing".to_string(),
            Action::CodeHelp => "code_help".to_string(),
        }
    }

    /// Decodes callback data; unknown ids (including unknown modes) yield None.
    pub fn parse(data: &str) -> Option<Action> {
        if let Some(name) = data.strip_prefix(MODE_PREFIX) {
            return Mode::parse(name).map(Action::SelectMode);
        }
        match data {
            "continue" => Some(Action::FollowUp(FollowUp::Continue)),
            "rephrase" => Some(Action::FollowUp(FollowUp::Rephrase)),
            "summarize" => Some(Action::FollowUp(FollowUp::Summarize)),
            "new_chat" => Some(Action::NewChat),
            "quick_question" => Some(Action::QuickQuestion),
            "creative_writing" => Some(Action::CreativeWriting),
            "code_help" => Some(Action::CodeHelp),
            _ => None,
        }
    }
}

/// What a single inbound update asks the router to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Action(Action),
    Text(String),
}

impl Input {
    /// Classifies an update. None for non-text messages and unknown button ids.
    pub fn from_message(message: &Message) -> Option<Input> {
        if let Some(data) = &message.callback_data {
            return Action::parse(data).map(Input::Action);
        }
        if !message.is_text() {
            return None;
        }
        Some(Input::from_text(&message.content))
    }

    pub fn from_text(text: &str) -> Input {
        match Command::parse(text) {
            Some(command) => Input::Command(command),
            None => Input::Text(text.to_string()),
        }
    }
}
