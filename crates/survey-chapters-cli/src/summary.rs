//! Plain-text descriptions of chapters, shared by `list`, `show` and `browse`.

use survey_chapters_engine::Chapter;

const LIST_PROMPT_WIDTH: usize = 60;

/// Shorten `text` to at most `max` characters, ending in `...` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// One line for a chapter listing
pub fn list_line(chapter: &Chapter) -> String {
    format!(
        "{} {} - {} questions - Conversation: {:?}",
        chapter.language.chapter_label(),
        chapter.number,
        chapter.question_count(),
        truncate(&chapter.conversation.label, LIST_PROMPT_WIDTH)
    )
}

/// Full description of a chapter: names, questions with their options, and
/// the discussion section.
pub fn describe(chapter: &Chapter) -> Vec<String> {
    let mut lines = vec![
        format!("Title:   {}", chapter.title),
        format!("Heading: {}", chapter.heading),
        String::new(),
    ];

    for (i, q) in chapter.questions.iter().enumerate() {
        let shown_when = match &q.conditional_on {
            Some(parent) => format!(
                " [shown when {parent} = {}]",
                chapter.language.affirmative()
            ),
            None => String::new(),
        };
        let required = if q.enforces_required() {
            ", required"
        } else {
            ""
        };
        lines.push(format!(
            "── Question {} ({}{required}{shown_when}) ──",
            i + 1,
            q.kind.input_type()
        ));
        lines.push(format!("   {}", q.title));
        for (j, option) in q.options.iter().enumerate() {
            lines.push(format!("     {}) {}", j + 1, option.label));
        }
        lines.push(String::new());
    }

    lines.push("── Conversation Section ──".to_string());
    lines.push(format!("   Title: {}", chapter.conversation.title));
    lines.push(format!("   Prompt: {}", chapter.conversation.label));
    lines.push(format!("   Placeholder: {}", chapter.conversation.placeholder));
    lines.push(String::new());
    lines.push(format!(
        "Email: {} ({})",
        chapter.email_label, chapter.email_placeholder
    ));
    lines.push(format!(
        "Buttons: {} / {}",
        chapter.submit_text, chapter.reset_text
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use survey_chapters_engine::{
        ChapterId, ChoiceOption, Language, LanguageDefaults, Question, QuestionKind,
    };

    fn chapter() -> Chapter {
        let mut chapter = Chapter::new(
            ChapterId::new(Language::Spanish, 2),
            &LanguageDefaults::spanish(),
        );
        chapter.conversation.label = "Conversen en familia".to_string();
        let mut child = Question::new(
            2,
            "¿Cuántos?",
            QuestionKind::MultiChoice,
            vec![ChoiceOption::new("1"), ChoiceOption::new("2")],
        );
        child.conditional_on = Some("q1".to_string());
        chapter.questions = vec![
            Question::new(
                1,
                "¿Tiene hijos?",
                QuestionKind::SingleChoice,
                vec![ChoiceOption::new("Si"), ChoiceOption::new("No")],
            ),
            child,
        ];
        chapter
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("año", 3), "año");
        assert_eq!(truncate("añoañoaño", 6), "año...");
    }

    #[test]
    fn test_list_line() {
        assert_eq!(
            list_line(&chapter()),
            r#"Capítulo 2 - 2 questions - Conversation: "Conversen en familia""#
        );
    }

    #[test]
    fn test_describe_marks_conditional_and_required_questions() {
        let lines = describe(&chapter());

        assert!(lines.contains(&"── Question 1 (radio, required) ──".to_string()));
        assert!(lines.contains(&"── Question 2 (checkbox [shown when q1 = Si]) ──".to_string()));
        assert!(lines.contains(&"   Q2: ¿Cuántos?".to_string()));
        assert!(lines.contains(&"     2) 2".to_string()));
        assert!(lines.contains(&"   Prompt: Conversen en familia".to_string()));
    }
}
