//! Fixed reply texts and keyboards.

use crate::core::{Button, Keyboard, Reply};
use crate::session::Mode;

use super::input::{Action, FollowUp};

pub const MSG_EMPTY_INPUT: &str = "❌ Please send a valid message.";
pub const MSG_HISTORY_CLEARED: &str = "🆕 Conversation history cleared! I'm ready for a new topic.";
pub const MSG_MODE_MENU: &str = "Select AI Personality:";
pub const MSG_NOTHING_TO_FOLLOW_UP: &str =
    "💭 There is nothing to continue yet. Send me a message first.";
pub const MSG_QUICK_QUESTION: &str = "💬 Go ahead and type your question!";
pub const MSG_FEEDBACK_THANKS: &str = "🙏 Thanks for your feedback!";
pub const MSG_FEEDBACK_USAGE: &str = "✍️ Add your suggestion after the command, e.g. /feedback more modes please";
pub const MSG_HANDLER_FAILED: &str = "🚨 An error occurred. Please try your request again.";

const WELCOME_HTML: &str = "🌟 <b>AI Assistant</b> 🌟\n\n\
I can help with:\n\
• Answering complex questions\n\
• Creative writing &amp; brainstorming\n\
• Programming &amp; technical help\n\
• Language translation\n\
• And much more!\n\n\
Try these commands:\n\
/new - Start fresh conversation\n\
/mode - Change AI personality\n\
/help - Show all commands";

const HELP_HTML: &str = "<b>🚀 Advanced AI Commands:</b>\n\n\
/new - Reset conversation history\n\
/mode - Switch AI personalities\n\
/help - Show this help message\n\
/feedback - Send your suggestions\n\n\
<b>💡 Pro Tip:</b> Use buttons below responses to continue conversations!";

pub fn too_long(max_chars: usize) -> String {
    format!(
        "❌ Message too long! Please limit to {} characters.",
        max_chars
    )
}

fn button(label: &str, action: Action) -> Button {
    Button::new(label, action.callback_data())
}

pub fn welcome() -> Reply {
    Reply::html(WELCOME_HTML).with_keyboard(Keyboard::Inline(vec![
        vec![button("💬 Ask Question", Action::QuickQuestion)],
        vec![button("📝 Creative Writing", Action::CreativeWriting)],
        vec![button("👨‍💻 Code Help", Action::CodeHelp)],
    ]))
}

pub fn help() -> Reply {
    Reply::html(HELP_HTML).with_keyboard(Keyboard::Reply {
        rows: vec![
            vec!["/new".to_string(), "/mode".to_string()],
            vec!["Ask something interesting!".to_string()],
        ],
        resize: true,
    })
}

pub fn history_cleared() -> Reply {
    Reply::text(MSG_HISTORY_CLEARED).with_keyboard(Keyboard::Remove)
}

pub fn mode_menu() -> Reply {
    let rows = Mode::ALL
        .into_iter()
        .map(|mode| vec![button(mode.menu_label(), Action::SelectMode(mode))])
        .collect();
    Reply::text(MSG_MODE_MENU).with_keyboard(Keyboard::Inline(rows))
}

pub fn mode_switched(mode: Mode) -> String {
    format!("✅ Switched to {} mode!", mode.title())
}

pub fn creative_started() -> Reply {
    Reply::text(format!(
        "{} Tell me what to write about.",
        mode_switched(Mode::Creative)
    ))
}

pub fn code_help_started() -> Reply {
    Reply::text(format!(
        "{} Paste your code or describe the problem.",
        mode_switched(Mode::Coder)
    ))
}

/// AI answer to a fresh message: continue / rephrase / summarize.
pub fn answer(text: String) -> Reply {
    Reply::text(text).with_keyboard(Keyboard::Inline(vec![vec![
        button("🔁 Continue", Action::FollowUp(FollowUp::Continue)),
        button("🔄 Rephrase", Action::FollowUp(FollowUp::Rephrase)),
        button("📝 Summarize", Action::FollowUp(FollowUp::Summarize)),
    ]]))
}

/// AI answer to a follow-up: continue / rephrase.
pub fn follow_up_answer(text: String) -> Reply {
    Reply::text(text).with_keyboard(Keyboard::Inline(vec![vec![
        button("🔁 Continue", Action::FollowUp(FollowUp::Continue)),
        button("🔄 Rephrase", Action::FollowUp(FollowUp::Rephrase)),
    ]]))
}
