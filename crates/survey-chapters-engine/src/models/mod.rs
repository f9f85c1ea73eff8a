pub mod chapter;
pub mod language;

pub use chapter::{
    Chapter, ChapterId, ChoiceOption, ConversationSection, Question, QuestionKind, question_id,
    question_number, strip_question_prefix, title_number, with_question_prefix,
};
pub use language::{DefaultsTable, Language, LanguageDefaults, UnknownLanguage};
