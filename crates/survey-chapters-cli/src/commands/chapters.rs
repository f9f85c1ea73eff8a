//! Whole-chapter commands: list, show, render, new and delete.

use std::path::PathBuf;

use anyhow::{Result, bail};
use survey_chapters_engine::{Chapter, ChapterCodec, ChapterId, Cmd, Language, io};

use super::Context;
use crate::summary;

pub fn list(ctx: &Context, language: Language) -> Result<()> {
    let report = io::load_chapters(&ctx.chapters_dir, language, &ctx.codec)?;
    for failure in &report.failures {
        eprintln!("Skipped {}: {}", failure.path.display(), failure.error);
    }

    if report.chapters.is_empty() {
        println!("No {language} chapters found.");
        return Ok(());
    }

    println!(
        "=== {language} Chapters ({} total) ===",
        report.chapters.len()
    );
    for chapter in &report.chapters {
        println!("  {}", summary::list_line(chapter));
    }
    Ok(())
}

pub fn show(ctx: &Context, id: ChapterId, json: bool) -> Result<()> {
    let chapter = io::read_chapter(&ctx.chapters_dir, id, &ctx.codec)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chapter)?);
        return Ok(());
    }

    println!("╔══════════════════════════════════════════╗");
    println!("║  {}", chapter.chapter_name);
    println!("╚══════════════════════════════════════════╝");
    for line in summary::describe(&chapter) {
        println!("  {line}");
    }
    Ok(())
}

pub fn render(ctx: &Context, id: ChapterId) -> Result<()> {
    let chapter = io::read_chapter(&ctx.chapters_dir, id, &ctx.codec)?;
    print!("{}", ctx.codec.encode(&chapter));
    Ok(())
}

pub fn create(
    ctx: &Context,
    language: Language,
    number: Option<u32>,
    conversation: Option<String>,
) -> Result<()> {
    let (chapter, path) = create_chapter(ctx, language, number, conversation)?;
    println!("Created {} at {}", chapter.chapter_name, path.display());
    Ok(())
}

/// Write a new chapter built from the language defaults.
///
/// Without `number` the chapter goes one past the highest existing one.
/// An existing chapter is never overwritten.
pub fn create_chapter(
    ctx: &Context,
    language: Language,
    number: Option<u32>,
    conversation: Option<String>,
) -> Result<(Chapter, PathBuf)> {
    let number = match number {
        Some(number) => number,
        None => io::next_chapter_number(&ctx.chapters_dir, language)?,
    };
    let id = ChapterId::new(language, number);
    if io::chapter_exists(&ctx.chapters_dir, id) {
        bail!(
            "{} already exists ({}); edit it instead",
            id.default_name(),
            id.file_name()
        );
    }

    let defaults = ctx.codec.settings().defaults.get(language);
    let mut chapter = Chapter::new(id, defaults);
    if let Some(label) = conversation {
        chapter.apply(Cmd::SetConversation {
            title: None,
            label: Some(label),
            placeholder: None,
        })?;
    }

    let path = io::save_chapter(&ctx.chapters_dir, &chapter, &ctx.codec)?;
    Ok((chapter, path))
}

pub fn delete(ctx: &Context, id: ChapterId, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!(
            "Refusing to delete {} without --yes",
            io::chapter_path(&ctx.chapters_dir, id).display()
        );
    }
    io::delete_chapter(&ctx.chapters_dir, id)?;
    println!("Deleted {}", id.file_name());
    Ok(())
}
