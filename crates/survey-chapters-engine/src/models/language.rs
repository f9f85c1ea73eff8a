use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two languages a chapter can be written in.
///
/// The language selects the file prefix, the default label strings and the
/// affirmative answer that reveals conditional questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Spanish,
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Spanish, Language::English];

    /// Value of the document's `<html lang>` attribute
    pub fn code(self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }

    /// File name prefix, e.g. `capitulo` in `capitulo_01.html`
    pub fn file_prefix(self) -> &'static str {
        match self {
            Language::Spanish => "capitulo",
            Language::English => "chapter",
        }
    }

    pub fn chapter_label(self) -> &'static str {
        match self {
            Language::Spanish => "Capítulo",
            Language::English => "Chapter",
        }
    }

    pub fn title_suffix(self) -> &'static str {
        match self {
            Language::Spanish => "Después de ver el video",
            Language::English => "After watching the video",
        }
    }

    /// Option value that reveals a conditional question
    pub fn affirmative(self) -> &'static str {
        match self {
            Language::Spanish => "Si",
            Language::English => "Yes",
        }
    }

    pub fn from_file_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.file_prefix() == prefix)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Spanish => "Spanish",
            Language::English => "English",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}' (expected es or en)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "spanish" | "español" | "espanol" => Ok(Language::Spanish),
            "en" | "english" => Ok(Language::English),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// Label strings a chapter falls back to when a field is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDefaults {
    pub heading: String,
    pub email_label: String,
    pub email_placeholder: String,
    pub submit_text: String,
    pub reset_text: String,
    pub success_message: String,
    pub summary_title: String,
    pub conversation_title: String,
    pub conversation_placeholder: String,
}

impl LanguageDefaults {
    pub fn spanish() -> Self {
        Self {
            heading: "Después de ver el video, realiza este ejercicio:".to_string(),
            email_label: "Correo Electrónico".to_string(),
            email_placeholder: "ejemplo@correo.com".to_string(),
            submit_text: "Enviar Encuesta".to_string(),
            reset_text: "Limpiar".to_string(),
            success_message: "✓ ¡Encuesta enviada correctamente!".to_string(),
            summary_title: "Resumen de tus respuestas".to_string(),
            conversation_title: "Conversen:".to_string(),
            conversation_placeholder: "Escribe tu respuesta aquí...".to_string(),
        }
    }

    pub fn english() -> Self {
        Self {
            heading: "After watching the video, complete this exercise:".to_string(),
            email_label: "Email Address".to_string(),
            email_placeholder: "example@email.com".to_string(),
            submit_text: "Submit Survey".to_string(),
            reset_text: "Clear".to_string(),
            success_message: "✓ Survey submitted successfully!".to_string(),
            summary_title: "Summary of your answers".to_string(),
            conversation_title: "Discuss:".to_string(),
            conversation_placeholder: "Write your answer here...".to_string(),
        }
    }
}

/// One [`LanguageDefaults`] per language, passed explicitly to the codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsTable {
    pub spanish: LanguageDefaults,
    pub english: LanguageDefaults,
}

impl DefaultsTable {
    pub fn get(&self, language: Language) -> &LanguageDefaults {
        match language {
            Language::Spanish => &self.spanish,
            Language::English => &self.english,
        }
    }
}

impl Default for DefaultsTable {
    fn default() -> Self {
        Self {
            spanish: LanguageDefaults::spanish(),
            english: LanguageDefaults::english(),
        }
    }
}
