/*!
 * # Editing Chapters
 *
 * All changes to a [`Chapter`](crate::models::Chapter) go through
 * [`Chapter::apply`](crate::models::Chapter::apply) with a [`Cmd`]:
 *
 * ```rust
 * use survey_chapters_engine::editing::Cmd;
 * use survey_chapters_engine::models::{Chapter, ChapterId, Language, LanguageDefaults, QuestionKind};
 *
 * let id = ChapterId::new(Language::Spanish, 1);
 * let mut chapter = Chapter::new(id, &LanguageDefaults::spanish());
 * chapter.apply(Cmd::AppendQuestion {
 *     text: "¿Tiene hijos?".to_string(),
 *     kind: QuestionKind::SingleChoice,
 *     options: vec!["Si".to_string(), "No".to_string()],
 *     conditional_on: None,
 * })?;
 * assert_eq!(chapter.questions[0].title, "Q1: ¿Tiene hijos?");
 * # Ok::<(), survey_chapters_engine::editing::EditError>(())
 * ```
 *
 * Commands are checked before anything is changed, so a rejected command
 * leaves the chapter as it was. Question ids always equal `q<position>`:
 * removing a question renumbers everything after it and rewrites the
 * conditional references that pointed at the old ids. The returned [`Patch`]
 * lists what moved.
 */

pub mod commands;
pub mod patch;

pub use commands::{Cmd, EditError, LabelField};
pub use patch::Patch;
