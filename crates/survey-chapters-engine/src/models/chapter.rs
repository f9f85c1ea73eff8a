use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::language::{Language, LanguageDefaults};

static QUESTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Q(\d+):").expect("static regex"));

/// Identifies one chapter file: its language and its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChapterId {
    pub language: Language,
    pub number: u32,
}

impl ChapterId {
    pub fn new(language: Language, number: u32) -> Self {
        Self { language, number }
    }

    /// Display name used when a document does not carry one, e.g. `Capítulo 3`
    pub fn default_name(&self) -> String {
        format!("{} {}", self.language.chapter_label(), self.number)
    }

    /// Document title used for freshly created chapters
    pub fn default_title(&self) -> String {
        format!(
            "{} - {}",
            self.default_name(),
            self.language.title_suffix()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Radio buttons, exactly one answer
    SingleChoice,
    /// Checkboxes, zero or more answers
    MultiChoice,
}

impl QuestionKind {
    pub fn toggled(self) -> Self {
        match self {
            QuestionKind::SingleChoice => QuestionKind::MultiChoice,
            QuestionKind::MultiChoice => QuestionKind::SingleChoice,
        }
    }

    /// The `type` attribute of the rendered inputs
    pub fn input_type(self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "radio",
            QuestionKind::MultiChoice => "checkbox",
        }
    }

    pub fn from_input_type(input_type: &str) -> Option<Self> {
        match input_type {
            "radio" => Some(QuestionKind::SingleChoice),
            "checkbox" => Some(QuestionKind::MultiChoice),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Submitted form value
    pub value: String,
    /// Displayed text
    pub label: String,
}

impl ChoiceOption {
    /// An option whose value and label are the same string
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: label.clone(),
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// `q<N>`, where N is the 1-based position in the chapter
    pub id: String,
    /// Display text, conventionally `Q<N>: ...`
    pub title: String,
    pub kind: QuestionKind,
    pub options: Vec<ChoiceOption>,
    pub required: bool,
    /// Id of an earlier question whose affirmative answer reveals this one
    pub conditional_on: Option<String>,
}

impl Question {
    /// A required question at 1-based `position` with a `Q<N>: ` title prefix.
    pub fn new(position: usize, text: &str, kind: QuestionKind, options: Vec<ChoiceOption>) -> Self {
        Self {
            id: question_id(position),
            title: with_question_prefix(strip_question_prefix(text), position),
            kind,
            options,
            required: true,
            conditional_on: None,
        }
    }

    pub fn is_conditional(&self) -> bool {
        self.conditional_on.is_some()
    }

    /// Title without its `Q<N>:` prefix
    pub fn text(&self) -> &str {
        strip_question_prefix(&self.title)
    }

    /// Whether the rendered page will reject an empty answer.
    ///
    /// Only the first radio of a visible single-choice question can carry the
    /// `required` attribute, so there must be at least one option.
    pub fn enforces_required(&self) -> bool {
        self.required
            && self.kind == QuestionKind::SingleChoice
            && !self.is_conditional()
            && !self.options.is_empty()
    }
}

/// The free-text discussion prompt; every chapter has exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSection {
    pub title: String,
    pub label: String,
    pub placeholder: String,
}

/// One survey page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: u32,
    pub language: Language,
    /// `<title>` content
    pub title: String,
    /// `<h1>` content
    pub heading: String,
    /// Name reported with submissions, e.g. `Capítulo 1`
    pub chapter_name: String,
    pub questions: Vec<Question>,
    pub conversation: ConversationSection,
    pub email_label: String,
    pub email_placeholder: String,
    pub submit_text: String,
    pub reset_text: String,
    pub success_message: String,
    pub summary_title: String,
}

impl Chapter {
    /// A chapter with no questions, populated from the language defaults.
    pub fn new(id: ChapterId, defaults: &LanguageDefaults) -> Self {
        Self {
            number: id.number,
            language: id.language,
            title: id.default_title(),
            heading: defaults.heading.clone(),
            chapter_name: id.default_name(),
            questions: Vec::new(),
            conversation: ConversationSection {
                title: defaults.conversation_title.clone(),
                label: String::new(),
                placeholder: defaults.conversation_placeholder.clone(),
            },
            email_label: defaults.email_label.clone(),
            email_placeholder: defaults.email_placeholder.clone(),
            submit_text: defaults.submit_text.clone(),
            reset_text: defaults.reset_text.clone(),
            success_message: defaults.success_message.clone(),
            summary_title: defaults.summary_title.clone(),
        }
    }

    pub fn id(&self) -> ChapterId {
        ChapterId::new(self.language, self.number)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn has_multi_choice(&self) -> bool {
        self.questions
            .iter()
            .any(|q| q.kind == QuestionKind::MultiChoice)
    }

    pub fn has_conditionals(&self) -> bool {
        self.questions.iter().any(Question::is_conditional)
    }

    /// Copy of this chapter with `required` reduced to what the markup can carry.
    ///
    /// Decoding an encoded chapter always yields this form.
    pub fn canonicalized(&self) -> Self {
        let mut chapter = self.clone();
        for q in &mut chapter.questions {
            q.required = q.enforces_required();
        }
        chapter
    }
}

pub fn question_id(position: usize) -> String {
    format!("q{position}")
}

/// Numeric part of a `q<N>` id
pub fn question_number(id: &str) -> Option<usize> {
    id.strip_prefix('q')?.parse().ok()
}

/// Number in a `Q<N>:` title prefix, if the title has one
pub fn title_number(title: &str) -> Option<usize> {
    QUESTION_PREFIX
        .captures(title)
        .and_then(|caps| caps[1].parse().ok())
}

pub fn strip_question_prefix(title: &str) -> &str {
    match QUESTION_PREFIX.find(title) {
        Some(m) => title[m.end()..].trim_start(),
        None => title,
    }
}

/// Rewrite (or add) the `Q<N>: ` prefix so it matches `position`.
pub fn with_question_prefix(title: &str, position: usize) -> String {
    match QUESTION_PREFIX.find(title) {
        Some(m) => format!("Q{position}:{}", &title[m.end()..]),
        None => format!("Q{position}: {title}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Q3: ¿Tiene hijos?", 1, "Q1: ¿Tiene hijos?")]
    #[case("Q12:sin espacio", 4, "Q4:sin espacio")]
    #[case("Sin prefijo", 2, "Q2: Sin prefijo")]
    #[case("Question: not a prefix", 2, "Q2: Question: not a prefix")]
    fn rewrites_question_prefix(#[case] title: &str, #[case] position: usize, #[case] expected: &str) {
        assert_eq!(with_question_prefix(title, position), expected);
    }

    #[test]
    fn parses_question_numbers() {
        assert_eq!(question_number("q7"), Some(7));
        assert_eq!(question_number("Q7"), None);
        assert_eq!(question_number("conversation"), None);
        assert_eq!(title_number("Q10: texto"), Some(10));
        assert_eq!(title_number("Conversen:"), None);
    }

    #[test]
    fn new_question_strips_user_supplied_prefix() {
        let q = Question::new(2, "Q9: ¿Cuántos?", QuestionKind::SingleChoice, vec![]);
        assert_eq!(q.id, "q2");
        assert_eq!(q.title, "Q2: ¿Cuántos?");
        assert_eq!(q.text(), "¿Cuántos?");
    }

    #[test]
    fn fresh_chapter_uses_language_defaults() {
        let id = ChapterId::new(Language::English, 4);
        let chapter = Chapter::new(id, &LanguageDefaults::english());
        assert_eq!(chapter.title, "Chapter 4 - After watching the video");
        assert_eq!(chapter.chapter_name, "Chapter 4");
        assert_eq!(chapter.conversation.title, "Discuss:");
        assert!(chapter.conversation.label.is_empty());
        assert!(chapter.questions.is_empty());
    }

    #[test]
    fn canonical_form_only_keeps_enforceable_required_flags() {
        let id = ChapterId::new(Language::Spanish, 1);
        let mut chapter = Chapter::new(id, &LanguageDefaults::spanish());
        chapter.questions = vec![
            Question::new(1, "a", QuestionKind::SingleChoice, vec![ChoiceOption::new("Si")]),
            Question::new(2, "b", QuestionKind::MultiChoice, vec![ChoiceOption::new("x")]),
            Question {
                conditional_on: Some("q1".to_string()),
                ..Question::new(3, "c", QuestionKind::SingleChoice, vec![ChoiceOption::new("y")])
            },
        ];

        let canonical = chapter.canonicalized();
        let flags: Vec<bool> = canonical.questions.iter().map(|q| q.required).collect();
        assert_eq!(flags, vec![true, false, false]);
    }
}
