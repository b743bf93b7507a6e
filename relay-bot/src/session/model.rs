//! Session record: history, mode, last response and activity timestamp.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Turns kept per session unless configured otherwise.
pub const DEFAULT_HISTORY_CAP: usize = 10;

/// Behavioral tag that contextualizes outgoing prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    General,
    Academic,
    Funny,
    Coder,
    Creative,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::General,
        Mode::Academic,
        Mode::Funny,
        Mode::Coder,
        Mode::Creative,
    ];

    /// Wire name, as used in `mode_<name>` callback data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::General => "general",
            Mode::Academic => "academic",
            Mode::Funny => "funny",
            Mode::Coder => "coder",
            Mode::Creative => "creative",
        }
    }

    pub fn parse(name: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// Capitalized name for confirmations ("Academic").
    pub fn title(&self) -> &'static str {
        match self {
            Mode::General => "General",
            Mode::Academic => "Academic",
            Mode::Funny => "Funny",
            Mode::Coder => "Coder",
            Mode::Creative => "Creative",
        }
    }

    /// Label on the mode-menu button.
    pub fn menu_label(&self) -> &'static str {
        match self {
            Mode::General => "🤖 General Assistant",
            Mode::Academic => "📚 Academic Researcher",
            Mode::Funny => "😂 Humorous Companion",
            Mode::Coder => "👨‍💻 Code Expert",
            Mode::Creative => "🎨 Creative Writer",
        }
    }

    /// Text prepended to the user's message; none for general mode.
    pub fn prompt_prefix(&self) -> Option<String> {
        match self {
            Mode::General => None,
            other => Some(format!("[Respond in {} mode] ", other.as_str())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user message plus the AI reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub ai: String,
}

impl Turn {
    pub fn new(user: impl Into<String>, ai: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ai: ai.into(),
        }
    }
}

/// Conversation state for a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub history: VecDeque<Turn>,
    pub mode: Mode,
    pub last_response: Option<String>,
    pub last_interaction: DateTime<Utc>,
}

impl Session {
    /// Fresh session: general mode, empty history.
    pub fn new(user_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            history: VecDeque::new(),
            mode: Mode::default(),
            last_response: None,
            last_interaction: now,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_interaction = now;
    }

    /// Clears history; mode and last response survive.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Appends a turn, dropping the oldest turns beyond `cap`.
    pub fn push_turn(&mut self, turn: Turn, cap: usize) {
        self.history.push_back(turn);
        while self.history.len() > cap {
            self.history.pop_front();
        }
    }

    /// History as alternating `User: ...` / `AI: ...` lines, oldest first.
    pub fn history_lines(&self) -> Vec<String> {
        self.history
            .iter()
            .flat_map(|t| [format!("User: {}", t.user), format!("AI: {}", t.ai)])
            .collect()
    }

    /// Last `turns` turns rendered as lines joined by newlines; `None` when disabled or empty.
    pub fn context_hint(&self, turns: usize) -> Option<String> {
        if turns == 0 || self.history.is_empty() {
            return None;
        }
        let skip = self.history.len().saturating_sub(turns);
        let lines: Vec<String> = self
            .history
            .iter()
            .skip(skip)
            .flat_map(|t| [format!("User: {}", t.user), format!("AI: {}", t.ai)])
            .collect();
        Some(lines.join("\n"))
    }

    /// True when inactive for strictly longer than `ttl`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_interaction > ttl
    }
}
