//! Structural decoder: parse the document into an element tree, then look
//! fields up by tag, class and id.

use super::decode::{self, DecodedFields, conditional_parent};
use super::markup::{
    CHECKBOX_GROUP, CONDITIONAL_SECTION, CONVERSATION_ID, EMAIL_ID, HIDDEN, OPTIONS,
    QUESTION_SECTION, QUESTION_TITLE, RESET_BUTTON, SUBMIT_BUTTON, SUCCESS_MESSAGE,
    SUMMARY_TITLE, section_id,
};
use crate::models::{ChoiceOption, Question, QuestionKind, question_id, title_number};
use crate::parsing::{Document, Element, parse_html};

pub fn decode(html: &str) -> DecodedFields {
    let doc = parse_html(html);

    let text_of = |pred: &dyn Fn(&Element) -> bool| doc.find(pred).map(Element::text);
    let conversation_label = doc
        .find(|e| e.is("label") && e.attr("for") == Some(CONVERSATION_ID))
        .map(Element::text);

    DecodedFields {
        title: text_of(&|e| e.is("title")),
        heading: text_of(&|e| e.is("h1")),
        chapter_name: doc
            .find_all(|e| e.is("script"))
            .into_iter()
            .find_map(|script| decode::chapter_name(&script.raw_text())),
        questions: decode_questions(&doc),
        conversation_title: conversation_section(&doc)
            .and_then(|section| section.find(|e| e.has_class(QUESTION_TITLE)))
            .map(Element::text),
        conversation_label,
        conversation_placeholder: doc
            .element_by_id(CONVERSATION_ID)
            .and_then(|e| e.attr("placeholder"))
            .map(str::to_string),
        email_label: text_of(&|e| e.is("label") && e.attr("for") == Some(EMAIL_ID)),
        email_placeholder: doc
            .find(|e| e.is("input") && e.attr("type") == Some("email"))
            .and_then(|e| e.attr("placeholder"))
            .map(str::to_string),
        submit_text: text_of(&|e| e.has_class(SUBMIT_BUTTON)),
        reset_text: text_of(&|e| e.has_class(RESET_BUTTON)),
        success_message: text_of(&|e| e.has_class(SUCCESS_MESSAGE)),
        summary_title: text_of(&|e| e.has_class(SUMMARY_TITLE)),
    }
}

/// The block holding the free-text field.
fn conversation_section(doc: &Document) -> Option<&Element> {
    doc.find_all(|e| e.has_class(QUESTION_SECTION))
        .into_iter()
        .find(|section| section.find(|e| e.id() == Some(CONVERSATION_ID)).is_some())
}

fn decode_questions(doc: &Document) -> Vec<Question> {
    doc.find_all(|e| e.has_class(QUESTION_SECTION))
        .into_iter()
        .filter_map(decode_question)
        .collect()
}

/// A block is a question when its title carries a `Q<N>:` marker and it
/// holds choice inputs or an options container.
fn decode_question(section: &Element) -> Option<Question> {
    let title = section.find(|e| e.has_class(QUESTION_TITLE))?.text();
    let number = title_number(&title)?;
    let kind = question_kind(section)?;
    let id = question_id(number);

    let options = section
        .find_all(|e| e.is("input") && e.attr("type") == Some(kind.input_type()))
        .into_iter()
        .map(|input| {
            let value = input.attr("value").unwrap_or_default().to_string();
            let label = input
                .id()
                .and_then(|input_id| {
                    section.find(|e| e.is("label") && e.attr("for") == Some(input_id))
                })
                .map(Element::text)
                .unwrap_or_else(|| value.clone());
            ChoiceOption { value, label }
        })
        .collect();

    let conditional = section.has_class(CONDITIONAL_SECTION)
        && section.has_class(HIDDEN)
        && section.id() == Some(section_id(&id).as_str());

    Some(Question {
        required: section.find(|e| e.has_attr("required")).is_some(),
        conditional_on: if conditional {
            conditional_parent(number)
        } else {
            None
        },
        id,
        title,
        kind,
        options,
    })
}

/// Radio inputs win over checkboxes; an empty block falls back to its
/// container class.
fn question_kind(section: &Element) -> Option<QuestionKind> {
    let has_input = |kind: QuestionKind| {
        section
            .find(|e| e.is("input") && e.attr("type") == Some(kind.input_type()))
            .is_some()
    };

    if has_input(QuestionKind::SingleChoice) {
        Some(QuestionKind::SingleChoice)
    } else if has_input(QuestionKind::MultiChoice) {
        Some(QuestionKind::MultiChoice)
    } else if section.find(|e| e.has_class(CHECKBOX_GROUP)).is_some() {
        Some(QuestionKind::MultiChoice)
    } else if section.find(|e| e.has_class(OPTIONS)).is_some() {
        Some(QuestionKind::SingleChoice)
    } else {
        None
    }
}
