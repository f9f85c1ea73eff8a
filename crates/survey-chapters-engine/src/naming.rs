//! Chapter file names: `capitulo_01.html`, `chapter_12.html`.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ChapterId, Language};

static FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(capitulo|chapter)_(\d+)\.html$").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    #[error("'{0}' is not a chapter file name (expected capitulo_NN.html or chapter_NN.html)")]
    Unrecognized(String),

    #[error("'{0}' does not carry a positive chapter number")]
    InvalidNumber(String),
}

impl ChapterId {
    /// File name with a two-digit zero-padded number
    pub fn file_name(&self) -> String {
        format!("{}_{:02}.html", self.language.file_prefix(), self.number)
    }

    pub fn from_file_name(name: &str) -> Result<Self, NamingError> {
        let caps = FILE_NAME
            .captures(name)
            .ok_or_else(|| NamingError::Unrecognized(name.to_string()))?;
        let language = Language::from_file_prefix(&caps[1])
            .ok_or_else(|| NamingError::Unrecognized(name.to_string()))?;
        let number = caps[2]
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| NamingError::InvalidNumber(name.to_string()))?;
        Ok(Self::new(language, number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Language::Spanish, 1, "capitulo_01.html")]
    #[case(Language::English, 12, "chapter_12.html")]
    #[case(Language::Spanish, 123, "capitulo_123.html")]
    fn file_names_round_trip(#[case] language: Language, #[case] number: u32, #[case] name: &str) {
        let id = ChapterId::new(language, number);
        assert_eq!(id.file_name(), name);
        assert_eq!(ChapterId::from_file_name(name), Ok(id));
    }

    #[test]
    fn unpadded_numbers_are_accepted() {
        assert_eq!(
            ChapterId::from_file_name("chapter_7.html"),
            Ok(ChapterId::new(Language::English, 7))
        );
    }

    #[rstest]
    #[case("capitulo_00.html")]
    #[case("capitulo_99999999999.html")]
    fn rejects_non_positive_or_oversized_numbers(#[case] name: &str) {
        assert_eq!(
            ChapterId::from_file_name(name),
            Err(NamingError::InvalidNumber(name.to_string()))
        );
    }

    #[rstest]
    #[case("capitulo_ab.html")]
    #[case("capitulo_01.htm")]
    #[case("notes.html")]
    #[case("Capitulo_01.html")]
    fn rejects_other_names(#[case] name: &str) {
        assert!(matches!(
            ChapterId::from_file_name(name),
            Err(NamingError::Unrecognized(_))
        ));
    }
}
