use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use survey_chapters_config::Config;
use survey_chapters_engine::{ChapterId, LabelField, Language, TreeCodec, io};

mod browse;
mod commands;
mod summary;

use commands::Context;

#[derive(Parser)]
#[command(
    name = "survey-chapters",
    version,
    about = "Inspect and edit the chapter pages of a bilingual survey site"
)]
struct Cli {
    /// Chapters directory (default: chapters_path from the config file)
    #[arg(long, global = true, value_name = "PATH")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the chapters of one language
    List(LangArgs),
    /// Print a chapter's questions and labels
    Show(ShowArgs),
    /// Print the HTML a chapter encodes to
    Render(ChapterArgs),
    /// Create a chapter from the language defaults
    New(NewArgs),
    /// Delete a chapter file
    Delete(DeleteArgs),
    /// Append a question
    AddQuestion(AddQuestionArgs),
    /// Remove a question and renumber the rest
    RemoveQuestion(QuestionArgs),
    /// Replace a question's text (the Q<N>: prefix is kept)
    SetQuestion(SetQuestionArgs),
    /// Switch a question between radio buttons and checkboxes
    ToggleKind(QuestionArgs),
    /// Show a question only when another is answered affirmatively
    SetConditional(SetConditionalArgs),
    /// Mark a question as required or optional
    SetRequired(SetRequiredArgs),
    /// Append an option to a question
    AddOption(AddOptionArgs),
    /// Change an option's text
    RelabelOption(RelabelOptionArgs),
    /// Remove an option from a question
    RemoveOption(OptionArgs),
    /// Change a page label, the title or the heading
    SetLabel(SetLabelArgs),
    /// Change the discussion section
    SetConversation(SetConversationArgs),
    /// Browse chapters in the terminal
    Browse(LangArgs),
}

#[derive(Args)]
struct LangArgs {
    /// Chapter language: es or en
    #[arg(long, short, default_value = "es")]
    lang: Language,
}

#[derive(Args)]
struct ChapterArgs {
    #[command(flatten)]
    lang: LangArgs,

    /// Chapter number
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    number: u32,
}

impl ChapterArgs {
    fn id(&self) -> ChapterId {
        ChapterId::new(self.lang.lang, self.number)
    }
}

#[derive(Args)]
struct ShowArgs {
    #[command(flatten)]
    chapter: ChapterArgs,

    /// Print the decoded chapter as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct NewArgs {
    #[command(flatten)]
    lang: LangArgs,

    /// Chapter number (default: one past the highest existing)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    number: Option<u32>,

    /// Discussion prompt shown above the free-text field
    #[arg(long)]
    conversation: Option<String>,
}

#[derive(Args)]
struct DeleteArgs {
    #[command(flatten)]
    chapter: ChapterArgs,

    /// Confirm the deletion
    #[arg(long)]
    yes: bool,
}

#[derive(Args)]
struct QuestionArgs {
    #[command(flatten)]
    chapter: ChapterArgs,

    /// Question position, starting at 1
    position: usize,
}

#[derive(Args)]
struct AddQuestionArgs {
    #[command(flatten)]
    chapter: ChapterArgs,

    /// Question text, without the Q<N>: prefix
    text: String,

    /// Answer options, in order
    #[arg(long = "option", short = 'o', value_name = "LABEL")]
    options: Vec<String>,

    /// Use checkboxes instead of radio buttons
    #[arg(long)]
    checkbox: bool,

    /// Show only when this question (e.g. q1) is answered affirmatively
    #[arg(long, value_name = "ID")]
    conditional_on: Option<String>,
}

#[derive(Args)]
struct SetQuestionArgs {
    #[command(flatten)]
    question: QuestionArgs,

    text: String,
}

#[derive(Args)]
struct SetConditionalArgs {
    #[command(flatten)]
    question: QuestionArgs,

    /// Parent question id, e.g. q1
    #[arg(long, value_name = "ID", required_unless_present = "clear")]
    parent: Option<String>,

    /// Make the question always visible
    #[arg(long, conflicts_with = "parent")]
    clear: bool,
}

#[derive(Args)]
struct SetRequiredArgs {
    #[command(flatten)]
    question: QuestionArgs,

    #[arg(action = clap::ArgAction::Set)]
    required: bool,
}

#[derive(Args)]
struct AddOptionArgs {
    #[command(flatten)]
    question: QuestionArgs,

    label: String,
}

#[derive(Args)]
struct OptionArgs {
    #[command(flatten)]
    question: QuestionArgs,

    /// Option position, starting at 1
    option: usize,
}

#[derive(Args)]
struct RelabelOptionArgs {
    #[command(flatten)]
    option: OptionArgs,

    label: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum LabelArg {
    Title,
    Heading,
    ChapterName,
    EmailLabel,
    EmailPlaceholder,
    Submit,
    Reset,
    Success,
    Summary,
}

impl LabelArg {
    /// `None` for the fields that have their own command
    fn field(self) -> Option<LabelField> {
        match self {
            LabelArg::Title | LabelArg::Heading | LabelArg::ChapterName => None,
            LabelArg::EmailLabel => Some(LabelField::EmailLabel),
            LabelArg::EmailPlaceholder => Some(LabelField::EmailPlaceholder),
            LabelArg::Submit => Some(LabelField::Submit),
            LabelArg::Reset => Some(LabelField::Reset),
            LabelArg::Success => Some(LabelField::Success),
            LabelArg::Summary => Some(LabelField::Summary),
        }
    }
}

#[derive(Args)]
struct SetLabelArgs {
    #[command(flatten)]
    chapter: ChapterArgs,

    #[arg(value_enum)]
    field: LabelArg,

    text: String,
}

#[derive(Args)]
struct SetConversationArgs {
    #[command(flatten)]
    chapter: ChapterArgs,

    #[arg(long)]
    title: Option<String>,

    /// Prompt shown above the free-text field (may be empty)
    #[arg(long)]
    label: Option<String>,

    #[arg(long)]
    placeholder: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let chapters_dir = resolve_chapters_dir(cli.dir, config.as_ref())?;
    let settings = config
        .map(|config| config.codec_settings())
        .unwrap_or_default();
    let ctx = Context::new(chapters_dir, TreeCodec::new(settings));

    commands::run(&ctx, cli.command)
}

/// `--dir` wins over the config file; one of the two is required
fn resolve_chapters_dir(dir: Option<PathBuf>, config: Option<&Config>) -> Result<PathBuf> {
    let (chapters_dir, source) = match (dir, config) {
        (Some(dir), _) => (dir, String::new()),
        (None, Some(config)) => (
            config.chapters_path.clone(),
            format!(" from config file '{}'", Config::config_path().display()),
        ),
        (None, None) => bail!(
            "No chapters directory given and no config file found\n\
             Pass --dir <PATH> or create a config file at {} with chapters_path = \"...\"",
            Config::config_path().display()
        ),
    };

    io::validate_chapters_dir(&chapters_dir).with_context(|| {
        format!(
            "Chapters path '{}'{} is invalid",
            chapters_dir.display(),
            source
        )
    })?;
    log::debug!("using chapters in {}", chapters_dir.display());
    Ok(chapters_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dir_flag_wins_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(PathBuf::from("/nonexistent/from-config"));

        let resolved =
            resolve_chapters_dir(Some(dir.path().to_path_buf()), Some(&config)).unwrap();
        assert_eq!(resolved, dir.path());
    }

    #[test]
    fn test_missing_dir_and_config_is_an_error() {
        let err = resolve_chapters_dir(None, None).unwrap_err();
        assert!(err.to_string().contains("--dir"));
    }

    #[test]
    fn test_invalid_config_dir_names_its_source() {
        let config = Config::new(PathBuf::from("/nonexistent/from-config"));
        let err = resolve_chapters_dir(None, Some(&config)).unwrap_err();
        assert!(err.to_string().contains("from config file"));
    }

    #[test]
    fn test_parses_edit_command() {
        let cli = Cli::try_parse_from([
            "survey-chapters",
            "--dir",
            "/tmp",
            "add-question",
            "--lang",
            "en",
            "3",
            "Do you read?",
            "-o",
            "Yes",
            "-o",
            "No",
            "--conditional-on",
            "q1",
        ])
        .unwrap();

        let Commands::AddQuestion(args) = cli.command else {
            panic!("expected add-question");
        };
        assert_eq!(args.chapter.lang.lang, Language::English);
        assert_eq!(args.chapter.number, 3);
        assert_eq!(args.options, vec!["Yes", "No"]);
        assert_eq!(args.conditional_on.as_deref(), Some("q1"));
        assert!(!args.checkbox);
    }
}
