//! What both decoders have in common: the partially recovered fields and the
//! rules for turning them into a [`Chapter`].

use std::sync::LazyLock;

use regex::Regex;

use super::escape::unescape_js_string;
use crate::models::{
    Chapter, ChapterId, ConversationSection, LanguageDefaults, Question, question_id,
};

/// `window.chapterName = "...";` inside the metadata script.
static CHAPTER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"window\.chapterName\s*=\s*"((?:[^"\\]|\\.)*)""#).expect("static regex")
});

/// Fields a decoder managed to locate. `None` means the anchor was absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecodedFields {
    pub title: Option<String>,
    pub heading: Option<String>,
    pub chapter_name: Option<String>,
    pub questions: Vec<Question>,
    pub conversation_title: Option<String>,
    pub conversation_label: Option<String>,
    pub conversation_placeholder: Option<String>,
    pub email_label: Option<String>,
    pub email_placeholder: Option<String>,
    pub submit_text: Option<String>,
    pub reset_text: Option<String>,
    pub success_message: Option<String>,
    pub summary_title: Option<String>,
}

impl DecodedFields {
    /// Fill every missing field from `defaults` and build the chapter.
    pub fn into_chapter(self, id: ChapterId, defaults: &LanguageDefaults) -> Chapter {
        let or_default = |field: &str, found: Option<String>, fallback: &str| {
            found.unwrap_or_else(|| {
                log::debug!("{}: no {field} found, using default", id.default_name());
                fallback.to_string()
            })
        };

        Chapter {
            number: id.number,
            language: id.language,
            title: or_default("title", self.title, &id.default_title()),
            heading: or_default("heading", self.heading, &defaults.heading),
            chapter_name: or_default("chapter name", self.chapter_name, &id.default_name()),
            questions: self.questions,
            conversation: ConversationSection {
                title: or_default(
                    "conversation title",
                    self.conversation_title,
                    &defaults.conversation_title,
                ),
                label: or_default("conversation label", self.conversation_label, ""),
                placeholder: or_default(
                    "conversation placeholder",
                    self.conversation_placeholder,
                    &defaults.conversation_placeholder,
                ),
            },
            email_label: or_default("email label", self.email_label, &defaults.email_label),
            email_placeholder: or_default(
                "email placeholder",
                self.email_placeholder,
                &defaults.email_placeholder,
            ),
            submit_text: or_default("submit text", self.submit_text, &defaults.submit_text),
            reset_text: or_default("reset text", self.reset_text, &defaults.reset_text),
            success_message: or_default(
                "success message",
                self.success_message,
                &defaults.success_message,
            ),
            summary_title: or_default("summary title", self.summary_title, &defaults.summary_title),
        }
    }
}

/// Parent of conditional question `q<number>`.
///
/// Markup only says *that* a question is conditional; the parent is always
/// the question immediately before it. The first question has none.
pub fn conditional_parent(number: usize) -> Option<String> {
    (number > 1).then(|| question_id(number - 1))
}

/// The chapter name from the metadata script, if present.
pub fn chapter_name(html: &str) -> Option<String> {
    CHAPTER_NAME
        .captures(html)
        .map(|caps| unescape_js_string(&caps[1]))
}
