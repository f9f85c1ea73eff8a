//! # Codec - Chapter Documents ⇄ Model
//!
//! A chapter is stored as a standalone HTML page. This module turns such a
//! page into a [`Chapter`] and back.
//!
//! There is one encoder and two decoders behind the [`ChapterCodec`] trait:
//!
//! - [`TreeCodec`] parses the page into an element tree first (see
//!   [`crate::parsing`]) and is the one the tools use.
//! - [`PatternCodec`] scans the raw text with regular expressions.
//!
//! Both must decode every encoder-produced page to the same model; the
//! conformance tests run against each.
//!
//! Decoding never fails. A field whose anchor cannot be found takes the
//! language default from [`CodecSettings::defaults`].

pub mod decode;
pub mod encode;
pub mod escape;
pub mod markup;
pub mod pattern_decoder;
pub mod tree_decoder;

use serde::{Deserialize, Serialize};

use crate::models::{Chapter, ChapterId, DefaultsTable};

pub use decode::DecodedFields;
pub use encode::encode;

/// Third-party widget and asset references written into every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub recaptcha_site_key: String,
    pub emailjs_public_key: String,
    pub stylesheet_href: String,
    pub survey_script_src: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            recaptcha_site_key: "6LeyoggsAAAAAAgXzEg9PAC9ypZtr-yyc24cAnN_".to_string(),
            emailjs_public_key: "wZ_Z4F9Y-8CcFzD2g".to_string(),
            stylesheet_href: "survey.css".to_string(),
            survey_script_src: "survey.js?v=20250110005".to_string(),
        }
    }
}

/// Everything the codec needs besides the chapter itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecSettings {
    pub defaults: DefaultsTable,
    pub site: SiteSettings,
}

pub trait ChapterCodec {
    fn settings(&self) -> &CodecSettings;

    /// Decode a page. The number and language come from the file name.
    fn decode(&self, html: &str, id: ChapterId) -> Chapter;

    fn encode(&self, chapter: &Chapter) -> String {
        encode::encode(chapter, &self.settings().site)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreeCodec {
    settings: CodecSettings,
}

impl TreeCodec {
    pub fn new(settings: CodecSettings) -> Self {
        Self { settings }
    }
}

impl ChapterCodec for TreeCodec {
    fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    fn decode(&self, html: &str, id: ChapterId) -> Chapter {
        tree_decoder::decode(html).into_chapter(id, self.settings.defaults.get(id.language))
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatternCodec {
    settings: CodecSettings,
}

impl PatternCodec {
    pub fn new(settings: CodecSettings) -> Self {
        Self { settings }
    }
}

impl ChapterCodec for PatternCodec {
    fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    fn decode(&self, html: &str, id: ChapterId) -> Chapter {
        pattern_decoder::decode(html).into_chapter(id, self.settings.defaults.get(id.language))
    }
}
