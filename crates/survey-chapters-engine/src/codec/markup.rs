//! Class names, ids and script globals shared by the encoder and decoders.
//!
//! The rendering page's script looks these up, so they are part of the file
//! format rather than styling details.

pub const QUESTION_SECTION: &str = "question-section";
pub const QUESTION_TITLE: &str = "question-title";
pub const CONDITIONAL_SECTION: &str = "conditional-section";
pub const HIDDEN: &str = "hidden";
pub const OPTIONS: &str = "options";
pub const OPTION: &str = "option";
pub const CHECKBOX_GROUP: &str = "checkbox-group";
pub const CHECKBOX_OPTION: &str = "checkbox-option";
pub const TEXT_INPUT_SECTION: &str = "text-input-section";

pub const CONVERSATION_ID: &str = "conversation";
pub const EMAIL_ID: &str = "email";

pub const SUBMIT_BUTTON: &str = "submit-btn";
pub const RESET_BUTTON: &str = "reset-btn";
pub const SUCCESS_MESSAGE: &str = "success-message";
pub const SUMMARY_TITLE: &str = "summary-title";

pub const QUESTIONS_GLOBAL: &str = "window.surveyQuestions";
pub const CHAPTER_NAME_GLOBAL: &str = "window.chapterName";

/// Id of the wrapper around a conditional question
pub fn section_id(question_id: &str) -> String {
    format!("{question_id}-section")
}

/// Id of an option input; `index` is 1-based
pub fn option_input_id(question_id: &str, index: usize) -> String {
    format!("{question_id}_{index}")
}

/// Classes on a conditional question's wrapper, in emission order
pub fn conditional_wrapper_class() -> String {
    format!("{QUESTION_SECTION} {CONDITIONAL_SECTION} {HIDDEN}")
}
