//! Commands that change one field or question of an existing chapter.

use anyhow::{Result, bail};
use survey_chapters_engine::{ChapterId, Cmd, QuestionKind};

use super::Context;
use crate::{Commands, LabelArg};

pub fn run(ctx: &Context, command: Commands) -> Result<()> {
    let Some((id, cmd)) = edit_command(command)? else {
        bail!("not an edit command");
    };
    ctx.edit(id, cmd)?;
    Ok(())
}

/// The chapter and command an edit subcommand stands for, `None` for the
/// subcommands that do not edit a chapter.
pub fn edit_command(command: Commands) -> Result<Option<(ChapterId, Cmd)>> {
    let edit = match command {
        Commands::AddQuestion(args) => (
            args.chapter.id(),
            Cmd::AppendQuestion {
                text: args.text,
                kind: if args.checkbox {
                    QuestionKind::MultiChoice
                } else {
                    QuestionKind::SingleChoice
                },
                options: args.options,
                conditional_on: args.conditional_on,
            },
        ),
        Commands::RemoveQuestion(args) => (
            args.chapter.id(),
            Cmd::RemoveQuestion {
                position: args.position,
            },
        ),
        Commands::SetQuestion(args) => (
            args.question.chapter.id(),
            Cmd::SetQuestionText {
                position: args.question.position,
                text: args.text,
            },
        ),
        Commands::ToggleKind(args) => (
            args.chapter.id(),
            Cmd::ToggleKind {
                position: args.position,
            },
        ),
        Commands::SetConditional(args) => {
            if args.clear == args.parent.is_some() {
                bail!("pass either --parent <ID> or --clear");
            }
            (
                args.question.chapter.id(),
                Cmd::SetConditional {
                    position: args.question.position,
                    parent: args.parent,
                },
            )
        }
        Commands::SetRequired(args) => (
            args.question.chapter.id(),
            Cmd::SetRequired {
                position: args.question.position,
                required: args.required,
            },
        ),
        Commands::AddOption(args) => (
            args.question.chapter.id(),
            Cmd::AddOption {
                position: args.question.position,
                label: args.label,
            },
        ),
        Commands::RelabelOption(args) => (
            args.option.question.chapter.id(),
            Cmd::RelabelOption {
                position: args.option.question.position,
                option: args.option.option,
                label: args.label,
            },
        ),
        Commands::RemoveOption(args) => (
            args.question.chapter.id(),
            Cmd::RemoveOption {
                position: args.question.position,
                option: args.option,
            },
        ),
        Commands::SetLabel(args) => {
            let text = args.text;
            let cmd = match (args.field, args.field.field()) {
                (_, Some(field)) => Cmd::SetLabel { field, text },
                (LabelArg::Title, None) => Cmd::SetTitle { text },
                (LabelArg::Heading, None) => Cmd::SetHeading { text },
                (_, None) => Cmd::SetChapterName { text },
            };
            (args.chapter.id(), cmd)
        }
        Commands::SetConversation(args) => {
            if args.title.is_none() && args.label.is_none() && args.placeholder.is_none() {
                bail!("nothing to change: pass --title, --label or --placeholder");
            }
            (
                args.chapter.id(),
                Cmd::SetConversation {
                    title: args.title,
                    label: args.label,
                    placeholder: args.placeholder,
                },
            )
        }
        Commands::List(_)
        | Commands::Show(_)
        | Commands::Render(_)
        | Commands::New(_)
        | Commands::Delete(_)
        | Commands::Browse(_) => return Ok(None),
    };
    Ok(Some(edit))
}
