use crate::editing::Patch;
use crate::models::{
    Chapter, ChoiceOption, Question, QuestionKind, question_id, strip_question_prefix,
    with_question_prefix,
};

/// Free-text labels that [`Cmd::SetLabel`] can change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField {
    EmailLabel,
    EmailPlaceholder,
    Submit,
    Reset,
    Success,
    Summary,
}

/// Commands that can be applied to a chapter. Positions are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    SetTitle {
        text: String,
    },
    SetHeading {
        text: String,
    },
    SetChapterName {
        text: String,
    },
    SetLabel {
        field: LabelField,
        text: String,
    },
    /// `None` leaves a field as it is; the label may be set to empty
    SetConversation {
        title: Option<String>,
        label: Option<String>,
        placeholder: Option<String>,
    },
    AppendQuestion {
        text: String,
        kind: QuestionKind,
        options: Vec<String>,
        conditional_on: Option<String>,
    },
    RemoveQuestion {
        position: usize,
    },
    SetQuestionText {
        position: usize,
        text: String,
    },
    ToggleKind {
        position: usize,
    },
    /// The parent id is stored as given, without checking it exists
    SetConditional {
        position: usize,
        parent: Option<String>,
    },
    SetRequired {
        position: usize,
        required: bool,
    },
    AddOption {
        position: usize,
        label: String,
    },
    RelabelOption {
        position: usize,
        option: usize,
        label: String,
    },
    RemoveOption {
        position: usize,
        option: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no question at position {position} (chapter has {len})")]
    QuestionOutOfRange { position: usize, len: usize },

    #[error("question {position} has no option {option} (it has {len})")]
    OptionOutOfRange {
        position: usize,
        option: usize,
        len: usize,
    },

    #[error("{0} cannot be empty")]
    EmptyText(&'static str),
}

impl Chapter {
    /// Apply `cmd`. On error the chapter is left exactly as it was.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        validate(self, &cmd)?;
        Ok(execute(self, cmd))
    }
}

fn validate(chapter: &Chapter, cmd: &Cmd) -> Result<(), EditError> {
    match cmd {
        Cmd::SetTitle { text } => non_empty("title", text),
        Cmd::SetHeading { text } => non_empty("heading", text),
        Cmd::SetChapterName { text } => non_empty("chapter name", text),
        Cmd::SetLabel { text, .. } => non_empty("label", text),
        Cmd::SetConversation {
            title, placeholder, ..
        } => {
            if let Some(title) = title {
                non_empty("conversation title", title)?;
            }
            if let Some(placeholder) = placeholder {
                non_empty("conversation placeholder", placeholder)?;
            }
            Ok(())
        }
        Cmd::AppendQuestion { text, options, .. } => {
            non_empty("question text", strip_question_prefix(text.trim()))?;
            options
                .iter()
                .try_for_each(|label| non_empty("option label", label))
        }
        Cmd::RemoveQuestion { position }
        | Cmd::ToggleKind { position }
        | Cmd::SetConditional { position, .. }
        | Cmd::SetRequired { position, .. } => question_at(chapter, *position).map(|_| ()),
        Cmd::SetQuestionText { position, text } => {
            question_at(chapter, *position)?;
            non_empty("question text", strip_question_prefix(text.trim()))
        }
        Cmd::AddOption { position, label } => {
            question_at(chapter, *position)?;
            non_empty("option label", label)
        }
        Cmd::RelabelOption {
            position,
            option,
            label,
        } => {
            option_at(chapter, *position, *option)?;
            non_empty("option label", label)
        }
        Cmd::RemoveOption { position, option } => option_at(chapter, *position, *option),
    }
}

/// Carry out a command that already passed [`validate`].
fn execute(chapter: &mut Chapter, cmd: Cmd) -> Patch {
    match cmd {
        Cmd::SetTitle { text } => chapter.title = text.trim().to_string(),
        Cmd::SetHeading { text } => chapter.heading = text.trim().to_string(),
        Cmd::SetChapterName { text } => chapter.chapter_name = text.trim().to_string(),
        Cmd::SetLabel { field, text } => {
            let target = match field {
                LabelField::EmailLabel => &mut chapter.email_label,
                LabelField::EmailPlaceholder => &mut chapter.email_placeholder,
                LabelField::Submit => &mut chapter.submit_text,
                LabelField::Reset => &mut chapter.reset_text,
                LabelField::Success => &mut chapter.success_message,
                LabelField::Summary => &mut chapter.summary_title,
            };
            *target = text.trim().to_string();
        }
        Cmd::SetConversation {
            title,
            label,
            placeholder,
        } => {
            let conversation = &mut chapter.conversation;
            if let Some(title) = title {
                conversation.title = title.trim().to_string();
            }
            if let Some(label) = label {
                conversation.label = label.trim().to_string();
            }
            if let Some(placeholder) = placeholder {
                conversation.placeholder = placeholder.trim().to_string();
            }
        }
        Cmd::AppendQuestion {
            text,
            kind,
            options,
            conditional_on,
        } => {
            let position = chapter.questions.len() + 1;
            let options = options
                .iter()
                .map(|label| ChoiceOption::new(label.trim()))
                .collect();
            let mut question = Question::new(position, text.trim(), kind, options);
            question.conditional_on = parent_id(conditional_on);
            chapter.questions.push(question);
        }
        Cmd::RemoveQuestion { position } => return remove_question(chapter, position),
        Cmd::SetQuestionText { position, text } => {
            let question = &mut chapter.questions[position - 1];
            question.title = with_question_prefix(strip_question_prefix(text.trim()), position);
        }
        Cmd::ToggleKind { position } => {
            let question = &mut chapter.questions[position - 1];
            question.kind = question.kind.toggled();
        }
        Cmd::SetConditional { position, parent } => {
            chapter.questions[position - 1].conditional_on = parent_id(parent);
        }
        Cmd::SetRequired { position, required } => {
            chapter.questions[position - 1].required = required;
        }
        Cmd::AddOption { position, label } => {
            chapter.questions[position - 1]
                .options
                .push(ChoiceOption::new(label.trim()));
        }
        Cmd::RelabelOption {
            position,
            option,
            label,
        } => {
            chapter.questions[position - 1].options[option - 1] = ChoiceOption::new(label.trim());
        }
        Cmd::RemoveOption { position, option } => {
            chapter.questions[position - 1].options.remove(option - 1);
        }
    }
    Patch::default()
}

/// A blank parent id means the question is always shown
fn parent_id(parent: Option<String>) -> Option<String> {
    parent
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
}

/// Remove the question at `position` and renumber the ones after it.
///
/// Conditional references to renumbered questions follow them. A question
/// whose parent was the removed one becomes unconditional and is reported as
/// orphaned.
fn remove_question(chapter: &mut Chapter, position: usize) -> Patch {
    let removed = chapter.questions.remove(position - 1);
    let mut patch = Patch::default();

    for (index, question) in chapter.questions.iter_mut().enumerate().skip(position - 1) {
        let new_position = index + 1;
        let new_id = question_id(new_position);
        question.title = with_question_prefix(&question.title, new_position);
        if question.id != new_id {
            let old_id = std::mem::replace(&mut question.id, new_id.clone());
            patch.renumbered.push((old_id, new_id));
        }
    }

    for question in &mut chapter.questions {
        let Some(parent) = question.conditional_on.as_deref() else {
            continue;
        };
        if parent == removed.id {
            log::debug!("{} lost its parent {}", question.id, removed.id);
            question.conditional_on = None;
            patch.orphaned.push(question.id.clone());
        } else if let Some((_, new_id)) = patch.renumbered.iter().find(|(old, _)| old == parent) {
            question.conditional_on = Some(new_id.clone());
        }
    }

    patch
}

fn non_empty(what: &'static str, text: &str) -> Result<(), EditError> {
    if text.trim().is_empty() {
        Err(EditError::EmptyText(what))
    } else {
        Ok(())
    }
}

fn question_at(chapter: &Chapter, position: usize) -> Result<&Question, EditError> {
    position
        .checked_sub(1)
        .and_then(|index| chapter.questions.get(index))
        .ok_or(EditError::QuestionOutOfRange {
            position,
            len: chapter.questions.len(),
        })
}

fn option_at(chapter: &Chapter, position: usize, option: usize) -> Result<(), EditError> {
    let question = question_at(chapter, position)?;
    if option == 0 || option > question.options.len() {
        return Err(EditError::OptionOutOfRange {
            position,
            option,
            len: question.options.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChapterId, Language, LanguageDefaults};
    use pretty_assertions::assert_eq;

    fn chapter(questions: &[(&str, Option<&str>)]) -> Chapter {
        let mut chapter = Chapter::new(
            ChapterId::new(Language::Spanish, 1),
            &LanguageDefaults::spanish(),
        );
        for (text, parent) in questions {
            chapter
                .apply(Cmd::AppendQuestion {
                    text: text.to_string(),
                    kind: QuestionKind::SingleChoice,
                    options: vec!["Si".to_string(), "No".to_string()],
                    conditional_on: parent.map(str::to_string),
                })
                .unwrap();
        }
        chapter
    }

    fn ids_and_parents(chapter: &Chapter) -> Vec<(String, Option<String>)> {
        chapter
            .questions
            .iter()
            .map(|q| (q.id.clone(), q.conditional_on.clone()))
            .collect()
    }

    #[test]
    fn test_append_question_numbers_it() {
        let chapter = chapter(&[("¿Tiene hijos?", None), ("Q7: ¿Cuántos?", Some("q1"))]);
        assert_eq!(chapter.questions[1].id, "q2");
        assert_eq!(chapter.questions[1].title, "Q2: ¿Cuántos?");
        assert_eq!(chapter.questions[1].conditional_on.as_deref(), Some("q1"));
        assert!(chapter.questions[1].required);
    }

    #[test]
    fn test_append_question_with_blank_parent_is_unconditional() {
        // Given questions appended with a blank and a padded parent id
        let chapter = chapter(&[("a", None), ("b", Some("")), ("c", Some("  ")), ("d", Some(" q1 "))]);

        // Then blank parents are dropped and the padded one is trimmed
        assert_eq!(
            ids_and_parents(&chapter),
            vec![
                ("q1".to_string(), None),
                ("q2".to_string(), None),
                ("q3".to_string(), None),
                ("q4".to_string(), Some("q1".to_string())),
            ]
        );
        assert!(!chapter.questions[1].is_conditional());
    }

    #[test]
    fn test_remove_renumbers_following_questions() {
        let mut chapter = chapter(&[("a", None), ("b", None), ("c", None), ("d", Some("q3"))]);
        let patch = chapter.apply(Cmd::RemoveQuestion { position: 2 }).unwrap();

        assert_eq!(
            ids_and_parents(&chapter),
            vec![
                ("q1".to_string(), None),
                ("q2".to_string(), None),
                ("q3".to_string(), Some("q2".to_string())),
            ]
        );
        let titles: Vec<&str> = chapter.questions.iter().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, vec!["Q1: a", "Q2: c", "Q3: d"]);
        assert_eq!(
            patch.renumbered,
            vec![
                ("q3".to_string(), "q2".to_string()),
                ("q4".to_string(), "q3".to_string()),
            ]
        );
        assert!(patch.orphaned.is_empty());
    }

    #[test]
    fn test_remove_parent_orphans_child() {
        let mut chapter = chapter(&[("a", None), ("b", Some("q1")), ("c", Some("q2"))]);
        let patch = chapter.apply(Cmd::RemoveQuestion { position: 1 }).unwrap();

        assert_eq!(
            ids_and_parents(&chapter),
            vec![("q1".to_string(), None), ("q2".to_string(), Some("q1".to_string()))]
        );
        assert_eq!(patch.orphaned, vec!["q1".to_string()]);
        assert!(patch.is_structural());
    }

    #[test]
    fn test_remove_last_question_renumbers_nothing() {
        let mut chapter = chapter(&[("a", None), ("b", None)]);
        let patch = chapter.apply(Cmd::RemoveQuestion { position: 2 }).unwrap();
        assert_eq!(chapter.question_count(), 1);
        assert!(!patch.is_structural());
    }

    #[test]
    fn test_earlier_references_survive_removal() {
        let mut chapter = chapter(&[("a", None), ("b", Some("q1")), ("c", None)]);
        chapter.apply(Cmd::RemoveQuestion { position: 3 }).unwrap();
        assert_eq!(chapter.questions[1].conditional_on.as_deref(), Some("q1"));
    }

    #[test]
    fn test_out_of_range_leaves_chapter_untouched() {
        let mut chapter = chapter(&[("a", None)]);
        let before = chapter.clone();

        assert_eq!(
            chapter.apply(Cmd::RemoveQuestion { position: 0 }),
            Err(EditError::QuestionOutOfRange { position: 0, len: 1 })
        );
        assert_eq!(
            chapter.apply(Cmd::ToggleKind { position: 2 }),
            Err(EditError::QuestionOutOfRange { position: 2, len: 1 })
        );
        assert_eq!(
            chapter.apply(Cmd::RemoveOption {
                position: 1,
                option: 3
            }),
            Err(EditError::OptionOutOfRange {
                position: 1,
                option: 3,
                len: 2
            })
        );
        assert_eq!(chapter, before);
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let mut chapter = chapter(&[("a", None)]);
        let before = chapter.clone();
        assert_eq!(
            chapter.apply(Cmd::SetQuestionText {
                position: 1,
                text: "Q1:  ".to_string()
            }),
            Err(EditError::EmptyText("question text"))
        );
        assert_eq!(
            chapter.apply(Cmd::AppendQuestion {
                text: "x".to_string(),
                kind: QuestionKind::MultiChoice,
                options: vec!["ok".to_string(), " ".to_string()],
                conditional_on: None,
            }),
            Err(EditError::EmptyText("option label"))
        );
        assert_eq!(chapter, before);
    }

    #[test]
    fn test_toggle_kind_keeps_options_and_wiring() {
        let mut chapter = chapter(&[("a", None), ("b", Some("q1"))]);
        chapter.apply(Cmd::ToggleKind { position: 2 }).unwrap();
        let q = &chapter.questions[1];
        assert_eq!(q.kind, QuestionKind::MultiChoice);
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.conditional_on.as_deref(), Some("q1"));
    }

    #[test]
    fn test_set_conditional_accepts_unknown_parent_and_clears() {
        let mut chapter = chapter(&[("a", None)]);
        chapter
            .apply(Cmd::SetConditional {
                position: 1,
                parent: Some("q9".to_string()),
            })
            .unwrap();
        assert_eq!(chapter.questions[0].conditional_on.as_deref(), Some("q9"));

        chapter
            .apply(Cmd::SetConditional {
                position: 1,
                parent: None,
            })
            .unwrap();
        assert!(!chapter.questions[0].is_conditional());
    }

    #[test]
    fn test_option_edits() {
        let mut chapter = chapter(&[("a", None)]);
        chapter
            .apply(Cmd::AddOption {
                position: 1,
                label: " Tal vez ".to_string(),
            })
            .unwrap();
        chapter
            .apply(Cmd::RelabelOption {
                position: 1,
                option: 1,
                label: "Sí".to_string(),
            })
            .unwrap();
        chapter
            .apply(Cmd::RemoveOption {
                position: 1,
                option: 2,
            })
            .unwrap();

        assert_eq!(
            chapter.questions[0].options,
            vec![ChoiceOption::new("Sí"), ChoiceOption::new("Tal vez")]
        );
    }

    #[test]
    fn test_set_question_text_keeps_prefix() {
        let mut chapter = chapter(&[("a", None), ("b", None)]);
        chapter
            .apply(Cmd::SetQuestionText {
                position: 2,
                text: "Q5: ¿Nuevo?".to_string(),
            })
            .unwrap();
        assert_eq!(chapter.questions[1].title, "Q2: ¿Nuevo?");
    }

    #[test]
    fn test_labels_and_conversation() {
        let mut chapter = chapter(&[]);
        chapter
            .apply(Cmd::SetLabel {
                field: LabelField::Submit,
                text: "Mandar".to_string(),
            })
            .unwrap();
        chapter
            .apply(Cmd::SetConversation {
                title: None,
                label: Some("¿Qué opinan?".to_string()),
                placeholder: None,
            })
            .unwrap();

        assert_eq!(chapter.submit_text, "Mandar");
        assert_eq!(chapter.conversation.title, "Conversen:");
        assert_eq!(chapter.conversation.label, "¿Qué opinan?");
    }
}
