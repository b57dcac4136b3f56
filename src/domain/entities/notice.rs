//! Platform-free rich notifications. The Discord adapter renders these as
//! embeds; nothing outside the adapter knows what an embed is.

use chrono::{DateTime, Utc};

/// A single labelled field in a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A rich notification: audit trail entries, failure reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
    pub colour: u32,
    pub fields: Vec<NoticeField>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Notice {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            colour: 0xFF0000,
            fields: Vec::new(),
            timestamp: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_colour(mut self, colour: u32) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(NoticeField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn stamped(mut self) -> Self {
        self.timestamp = Some(Utc::now());
        self
    }
}

/// An outbound payload: plain text or a rich notice.
#[derive(Debug, Clone)]
pub enum Outgoing {
    Text(String),
    Notice(Notice),
}

impl Outgoing {
    pub fn text(text: impl Into<String>) -> Self {
        Outgoing::Text(text.into())
    }
}
