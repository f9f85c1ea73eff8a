//! Regex decoder: scans the raw text for the markup the encoder writes,
//! without building a tree. Faster and less tolerant than the tree decoder.

use std::sync::LazyLock;

use regex::Regex;

use super::decode::{self, DecodedFields, conditional_parent};
use super::escape::decode_entities;
use super::markup::{CONDITIONAL_SECTION, HIDDEN, section_id};
use crate::models::{ChoiceOption, Question, QuestionKind, question_id};

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($re).expect("static regex"));
    };
}

pattern!(TITLE, r"(?s)<title>(.*?)</title>");
pattern!(HEADING, r"(?s)<h1[^>]*>(.*?)</h1>");
pattern!(
    QUESTION_MARKER,
    r#"<div class="question-title">\s*(Q(\d+):[^<]*?)\s*</div>"#
);
pattern!(SECTION_START, r#"<div\s[^>]*class="question-section"#);
pattern!(
    OPTION,
    r"(<input\s[^>]*>)\s*<label[^>]*>([^<]*)</label>"
);
pattern!(BARE_INPUT, r"<input\s[^>]*>");
pattern!(TYPE_ATTR, r#"\stype="([^"]*)""#);
pattern!(VALUE_ATTR, r#"\svalue="([^"]*)""#);
pattern!(CLASS_ATTR, r#"\sclass="([^"]*)""#);
pattern!(PLACEHOLDER_ATTR, r#"\splaceholder="([^"]*)""#);
pattern!(REQUIRED, r"<input[^>]*\srequired[\s>/]");
pattern!(CHECKBOX_GROUP, r#"class="checkbox-group""#);
pattern!(OPTIONS_GROUP, r#"class="options""#);
pattern!(
    CONVERSATION_TITLE,
    r#"class="question-title">([^<]*)</div>\s*<div class="text-input-section">\s*<label for="conversation""#
);
pattern!(
    CONVERSATION_LABEL,
    r#"<label for="conversation"[^>]*>([^<]*)</label>"#
);
pattern!(CONVERSATION_TEXTAREA, r#"<textarea\s[^>]*\bid="conversation"[^>]*>"#);
pattern!(EMAIL_LABEL, r#"<label for="email"[^>]*>([^<]*)</label>"#);
pattern!(EMAIL_INPUT, r#"<input\s[^>]*\btype="email"[^>]*>"#);
pattern!(SUBMIT, r#"class="submit-btn"[^>]*>([^<]*)</button>"#);
pattern!(RESET, r#"class="reset-btn"[^>]*>([^<]*)</button>"#);
pattern!(SUCCESS, r#"(?s)class="success-message"[^>]*>(.*?)</div>"#);
pattern!(SUMMARY, r#"class="summary-title"[^>]*>([^<]*)</h2>"#);

pub fn decode(html: &str) -> DecodedFields {
    DecodedFields {
        title: capture_text(&TITLE, html),
        heading: capture_text(&HEADING, html),
        chapter_name: decode::chapter_name(html),
        questions: decode_questions(html),
        conversation_title: capture_text(&CONVERSATION_TITLE, html),
        conversation_label: capture_text(&CONVERSATION_LABEL, html),
        conversation_placeholder: tag_attr(&CONVERSATION_TEXTAREA, &PLACEHOLDER_ATTR, html),
        email_label: capture_text(&EMAIL_LABEL, html),
        email_placeholder: tag_attr(&EMAIL_INPUT, &PLACEHOLDER_ATTR, html),
        submit_text: capture_text(&SUBMIT, html),
        reset_text: capture_text(&RESET, html),
        success_message: capture_text(&SUCCESS, html),
        summary_title: capture_text(&SUMMARY, html),
    }
}

/// First capture group, trimmed and entity-decoded.
fn capture_text(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .map(|caps| decode_entities(caps[1].trim()))
}

/// Attribute `attr` of the first tag matched by `tag`.
fn tag_attr(tag: &Regex, attr: &Regex, haystack: &str) -> Option<String> {
    let tag = tag.find(haystack)?;
    attr.captures(tag.as_str())
        .map(|caps| decode_entities(&caps[1]))
}

fn decode_questions(html: &str) -> Vec<Question> {
    let markers: Vec<_> = QUESTION_MARKER.captures_iter(html).collect();
    let mut questions = Vec::with_capacity(markers.len());

    for caps in &markers {
        let (Some(marker), Some(number)) = (caps.get(0), caps[2].parse::<usize>().ok()) else {
            continue;
        };
        // a block runs from its title to the start of the next section
        let rest = &html[marker.end()..];
        let block_end = SECTION_START.find(rest).map_or(rest.len(), |m| m.start());
        let block = &rest[..block_end];

        let Some(kind) = block_kind(block) else {
            continue;
        };
        let id = question_id(number);

        let options = OPTION
            .captures_iter(block)
            .filter(|opt| attr(&TYPE_ATTR, &opt[1]).as_deref() == Some(kind.input_type()))
            .map(|opt| {
                let label = decode_entities(opt[2].trim());
                let value = attr(&VALUE_ATTR, &opt[1]).unwrap_or_else(|| label.clone());
                ChoiceOption { value, label }
            })
            .collect();

        questions.push(Question {
            required: REQUIRED.is_match(block),
            conditional_on: if is_conditional(html, &id) {
                conditional_parent(number)
            } else {
                None
            },
            title: decode_entities(&caps[1]),
            id,
            kind,
            options,
        });
    }

    questions
}

fn attr(re: &Regex, tag: &str) -> Option<String> {
    re.captures(tag).map(|caps| decode_entities(&caps[1]))
}

/// Radio inputs win over checkboxes; an empty block falls back to its
/// container class.
fn block_kind(block: &str) -> Option<QuestionKind> {
    let input_types: Vec<String> = BARE_INPUT
        .find_iter(block)
        .filter_map(|tag| attr(&TYPE_ATTR, tag.as_str()))
        .collect();
    let has = |kind: QuestionKind| input_types.iter().any(|t| t == kind.input_type());

    if has(QuestionKind::SingleChoice) {
        Some(QuestionKind::SingleChoice)
    } else if has(QuestionKind::MultiChoice) {
        Some(QuestionKind::MultiChoice)
    } else if CHECKBOX_GROUP.is_match(block) {
        Some(QuestionKind::MultiChoice)
    } else if OPTIONS_GROUP.is_match(block) {
        Some(QuestionKind::SingleChoice)
    } else {
        None
    }
}

/// Whether a `<div>` with id `<id>-section` carries both marker classes.
fn is_conditional(html: &str, question_id: &str) -> bool {
    let wrapper = format!(
        r#"<div\s[^>]*\bid="{}"[^>]*>"#,
        regex::escape(&section_id(question_id))
    );
    let Ok(wrapper) = Regex::new(&wrapper) else {
        return false;
    };
    wrapper
        .find(html)
        .and_then(|tag| attr(&CLASS_ATTR, tag.as_str()))
        .is_some_and(|class| {
            let classes: Vec<&str> = class.split_whitespace().collect();
            classes.contains(&CONDITIONAL_SECTION) && classes.contains(&HIDDEN)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn block_stops_at_next_section() {
        let html = r#"
            <div class="question-section">
                <div class="question-title">Q1: a</div>
                <div class="options">
                    <div class="option">
                        <input type="radio" id="q1_1" name="q1" value="Si">
                        <label for="q1_1">Si</label>
                    </div>
                </div>
            </div>
            <div class="question-section">
                <div class="question-title">Conversen:</div>
                <div class="text-input-section">
                    <label for="conversation">Hablen</label>
                    <textarea id="conversation" placeholder="aquí" required></textarea>
                </div>
            </div>"#;

        let questions = decode_questions(html);
        assert_eq!(questions.len(), 1);
        // the textarea's required belongs to the conversation block
        assert!(!questions[0].required);
        assert_eq!(questions[0].options, vec![ChoiceOption::new("Si")]);
    }

    #[test]
    fn test_section_class_in_label_text_does_not_end_block() {
        // Given an option whose label spells out the section class
        let html = r#"
            <div class="question-section">
                <div class="question-title">Q1: a</div>
                <div class="options">
                    <div class="option">
                        <input type="radio" id="q1_1" name="q1" value="see class=&quot;question-section&quot;">
                        <label for="q1_1">see class="question-section"</label>
                    </div>
                    <div class="option">
                        <input type="radio" id="q1_2" name="q1" value="B">
                        <label for="q1_2">B</label>
                    </div>
                </div>
            </div>"#;

        // When the questions are decoded
        let questions = decode_questions(html);

        // Then both options stay in the block
        assert_eq!(
            questions[0].options,
            vec![
                ChoiceOption::new(r#"see class="question-section""#),
                ChoiceOption::new("B"),
            ]
        );
    }

    #[test]
    fn conditional_needs_both_marker_classes() {
        let both = r#"<div class="question-section conditional-section hidden" id="q2-section">"#;
        let hidden_only = r#"<div class="question-section hidden" id="q2-section">"#;
        assert!(is_conditional(both, "q2"));
        assert!(!is_conditional(hidden_only, "q2"));
        assert!(!is_conditional(both, "q3"));
    }

    #[test]
    fn attribute_values_are_decoded() {
        let html = r#"
            <div class="question-title">Q1: &lt;b&gt; &amp; "c"</div>
            <div class="options">
                <input type="radio" id="q1_1" name="q1" value="&quot;A&quot;">
                <label for="q1_1">&quot;A&quot; &amp; B</label>
            </div>"#;
        let questions = decode_questions(html);
        assert_eq!(questions[0].title, r#"Q1: <b> & "c""#);
        assert_eq!(
            questions[0].options,
            vec![ChoiceOption {
                value: r#""A""#.to_string(),
                label: r#""A" & B"#.to_string(),
            }]
        );
    }

    #[test]
    fn success_message_is_trimmed() {
        let html = "<div class=\"success-message\" id=\"successMessage\">\n    ✓ Listo\n</div>";
        assert_eq!(decode(html).success_message.as_deref(), Some("✓ Listo"));
    }
}
