//! Terminal presentation for the participant viewer
//!
//! Renders the welcome/waiting screens and keeps the append-only
//! translation log. The log is display-scoped: the session machine only
//! holds the latest texts, entries accumulate here.

use crate::tenant::{Language, TenantInfo};
use chrono::{DateTime, Utc};

/// Languages rendered right-to-left
const RTL_LANGUAGES: [&str; 7] = ["ar", "he", "fa", "ur", "yi", "ps", "sd"];

pub fn is_rtl(code: &str) -> bool {
    RTL_LANGUAGES.contains(&code)
}

/// One translation/transcript pair, appended per translation event
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub translation: String,
    pub transcript: Option<String>,
    pub received_at: DateTime<Utc>,
}

/// Append-only log of received translations, with an optional source-text
/// line per entry
#[derive(Debug, Default)]
pub struct TranscriptLog {
    include_source: bool,
    entries: Vec<LogEntry>,
    latest_transcript: Option<String>,
}

impl TranscriptLog {
    pub fn new(include_source: bool) -> Self {
        Self {
            include_source,
            entries: Vec::new(),
            latest_transcript: None,
        }
    }

    pub fn include_source(&self) -> bool {
        self.include_source
    }

    pub fn toggle_source(&mut self) -> bool {
        self.include_source = !self.include_source;
        self.include_source
    }

    /// Remember the latest source text; it is attached to the next
    /// translation entry when the source toggle is on.
    pub fn on_transcript(&mut self, text: &str) {
        self.latest_transcript = Some(text.to_string());
    }

    /// Append a pair for a received translation and return it for display
    pub fn on_translation(&mut self, text: &str) -> LogEntry {
        let entry = LogEntry {
            translation: text.to_string(),
            transcript: if self.include_source {
                self.latest_transcript.clone()
            } else {
                None
            },
            received_at: Utc::now(),
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.latest_transcript = None;
    }
}

/// Print the tenant welcome block
pub fn print_welcome(tenant: &TenantInfo) {
    println!();
    if !tenant.welcome.greeting.is_empty() {
        println!("  {}", tenant.welcome.greeting);
    }
    for message in &tenant.welcome.messages {
        println!("  {}", message);
    }
    if !tenant.welcome.additional_message.is_empty() {
        println!("  {}", tenant.welcome.additional_message);
    }
    println!();
}

/// Print the waiting line shown while the service is not ready
pub fn print_waiting(tenant: &TenantInfo) {
    println!("  {}", tenant.welcome.waiting);
}

/// Print the numbered language menu offered once the service is ready
pub fn print_language_menu(languages: &[Language]) {
    println!("Select a language:");
    for (index, language) in languages.iter().enumerate() {
        println!("  {}. {} ({})", index + 1, language.label, language.value);
    }
    println!("Type a number or a locale, 'stop' to leave, 'source' to toggle source text, 'quit' to exit.");
}

/// Print one received translation entry
pub fn print_entry(entry: &LogEntry, language_code: &str) {
    let direction = if is_rtl(language_code) { " [rtl]" } else { "" };
    println!("[{}]{} {}", entry.received_at.format("%H:%M:%S"), direction, entry.translation);
    if let Some(transcript) = &entry.transcript {
        println!("    ({})", transcript);
    }
}
