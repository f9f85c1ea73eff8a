use std::path::PathBuf;

use anyhow::{Context as _, Result};
use survey_chapters_engine::{ChapterId, Cmd, Patch, TreeCodec, io};

use crate::Commands;

pub mod chapters;
pub mod edit;

/// Where the chapters live and how to read and write them
pub struct Context {
    pub chapters_dir: PathBuf,
    pub codec: TreeCodec,
}

impl Context {
    pub fn new(chapters_dir: PathBuf, codec: TreeCodec) -> Self {
        Self {
            chapters_dir,
            codec,
        }
    }

    /// Read a chapter, apply one command and save it back.
    pub fn edit(&self, id: ChapterId, cmd: Cmd) -> Result<Patch> {
        let mut chapter = io::read_chapter(&self.chapters_dir, id, &self.codec)?;
        log::debug!("applying {cmd:?} to {}", id.file_name());
        let patch = chapter
            .apply(cmd)
            .with_context(|| format!("Cannot edit {}", chapter.chapter_name))?;
        let path = io::save_chapter(&self.chapters_dir, &chapter, &self.codec)?;
        println!("Saved {}", path.display());
        for line in patch_report(&patch) {
            println!("{line}");
        }
        Ok(patch)
    }
}

/// Human-readable notes about everything an edit changed besides its target
pub fn patch_report(patch: &Patch) -> Vec<String> {
    let mut lines: Vec<String> = patch
        .renumbered
        .iter()
        .map(|(old, new)| format!("  renumbered {old} -> {new}"))
        .collect();
    lines.extend(
        patch
            .orphaned
            .iter()
            .map(|id| format!("  {id} lost its condition and is now always shown")),
    );
    lines
}

pub fn run(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::List(args) => chapters::list(ctx, args.lang),
        Commands::Show(args) => chapters::show(ctx, args.chapter.id(), args.json),
        Commands::Render(args) => chapters::render(ctx, args.id()),
        Commands::New(args) => {
            chapters::create(ctx, args.lang.lang, args.number, args.conversation)
        }
        Commands::Delete(args) => chapters::delete(ctx, args.chapter.id(), args.yes),
        Commands::Browse(args) => crate::browse::run(ctx, args.lang),
        edit_command => edit::run(ctx, edit_command),
    }
}
