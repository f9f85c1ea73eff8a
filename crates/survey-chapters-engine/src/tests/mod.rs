use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::models::{
    Chapter, ChapterId, ChoiceOption, Language, LanguageDefaults, Question, QuestionKind,
};

/// Create a temporary chapters directory
pub fn create_test_chapters_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file in the chapters directory with the given content
pub fn create_test_file(chapters_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = chapters_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// A small Spanish chapter: a yes/no question and a conditional follow-up
pub fn sample_chapter(number: u32) -> Chapter {
    let mut chapter = Chapter::new(
        ChapterId::new(Language::Spanish, number),
        &LanguageDefaults::spanish(),
    );
    chapter.conversation.label = "¿Qué aprendieron?".to_string();
    chapter.questions = vec![
        Question::new(
            1,
            "¿Tiene hijos?",
            QuestionKind::SingleChoice,
            vec![ChoiceOption::new("Si"), ChoiceOption::new("No")],
        ),
        Question {
            required: false,
            conditional_on: Some("q1".to_string()),
            ..Question::new(
                2,
                "¿Cuántos?",
                QuestionKind::SingleChoice,
                vec![
                    ChoiceOption::new("1"),
                    ChoiceOption::new("2"),
                    ChoiceOption::new("3+"),
                ],
            )
        },
    ];
    chapter
}
