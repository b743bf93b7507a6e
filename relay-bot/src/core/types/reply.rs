//! Outbound reply: text, formatting, optional keyboard and how to deliver it.

/// How `Reply::text` should be rendered by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    Html,
}

/// Inline button: visible label plus the opaque id sent back on press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Controls attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Buttons under the message; presses come back as callback data.
    Inline(Vec<Vec<Button>>),
    /// Custom keyboard replacing the user's keyboard; presses send the label as text.
    Reply { rows: Vec<Vec<String>>, resize: bool },
    /// Remove a previously shown custom keyboard.
    Remove,
}

/// Where the reply goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delivery {
    /// New message in the chat.
    #[default]
    Send,
    /// Replace the text of the message whose button was pressed. Falls back to `Send` for non-button updates.
    EditOrigin,
}

/// Outbound message produced by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub format: TextFormat,
    pub keyboard: Option<Keyboard>,
    pub delivery: Delivery,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
            keyboard: None,
            delivery: Delivery::Send,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            format: TextFormat::Html,
            ..Self::text(text)
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn editing_origin(mut self) -> Self {
        self.delivery = Delivery::EditOrigin;
        self
    }

    /// Callback ids of all inline buttons, row-major. Empty for other keyboards.
    pub fn button_data(&self) -> Vec<&str> {
        match &self.keyboard {
            Some(Keyboard::Inline(rows)) => rows
                .iter()
                .flatten()
                .map(|b| b.data.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }
}
