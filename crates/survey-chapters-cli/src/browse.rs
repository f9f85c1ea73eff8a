//! Read-only terminal browser: chapter list on the left, the selected
//! chapter on the right.

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::{Stdout, stdout};
use survey_chapters_engine::{Chapter, Language, io};

use crate::commands::Context;
use crate::summary;

struct App<'a> {
    ctx: &'a Context,
    language: Language,
    chapters: Vec<Chapter>,
    /// Files that failed to load, shown under the list
    skipped: usize,
    list_state: ListState,
    current_content: Vec<String>,
}

impl<'a> App<'a> {
    fn new(ctx: &'a Context, language: Language) -> Result<Self> {
        let mut app = Self {
            ctx,
            language,
            chapters: Vec::new(),
            skipped: 0,
            list_state: ListState::default(),
            current_content: Vec::new(),
        };
        app.load()?;
        Ok(app)
    }

    fn load(&mut self) -> Result<()> {
        let report = io::load_chapters(&self.ctx.chapters_dir, self.language, &self.ctx.codec)?;
        self.chapters = report.chapters;
        self.skipped = report.failures.len();
        self.list_state
            .select(if self.chapters.is_empty() { None } else { Some(0) });
        self.update_content_for_selection();
        Ok(())
    }

    fn switch_language(&mut self) -> Result<()> {
        self.language = match self.language {
            Language::Spanish => Language::English,
            Language::English => Language::Spanish,
        };
        self.load()
    }

    fn next_chapter(&mut self) {
        if self.chapters.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.chapters.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_chapter(&mut self) {
        if self.chapters.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.chapters.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        self.current_content = match self
            .list_state
            .selected()
            .and_then(|index| self.chapters.get(index))
        {
            Some(chapter) => {
                let mut lines = vec![chapter.chapter_name.clone(), String::new()];
                lines.extend(summary::describe(chapter));
                lines
            }
            None => Vec::new(),
        };
    }
}

pub fn run(ctx: &Context, language: Language) -> Result<()> {
    let mut app = App::new(ctx, language)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_chapter(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_chapter(),
                KeyCode::Tab => app.switch_language()?,
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    let items: Vec<ListItem> = app
        .chapters
        .iter()
        .map(|chapter| {
            ListItem::new(Line::from(format!(
                "{} {} ({}q)",
                chapter.language.chapter_label(),
                chapter.number,
                chapter.question_count()
            )))
        })
        .collect();

    let mut title = format!("{} chapters", app.language);
    if app.skipped > 0 {
        title.push_str(&format!(" ({} skipped)", app.skipped));
    }
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, chunks[0], &mut app.list_state);

    let content_text: Vec<Line> = if app.current_content.is_empty() {
        vec![Line::from(format!(
            "No {} chapters in {}",
            app.language,
            app.ctx.chapters_dir.display()
        ))]
    } else {
        app.current_content
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect()
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Chapter"))
        .wrap(Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    let help = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("Tab: Switch language"),
    ]);
    f.render_widget(Paragraph::new(help), rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use survey_chapters_engine::TreeCodec;

    use crate::commands::chapters::create_chapter;

    #[test]
    fn test_navigation_wraps_around() {
        // Given three Spanish chapters
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(dir.path().to_path_buf(), TreeCodec::default());
        for _ in 0..3 {
            create_chapter(&ctx, Language::Spanish, None, None).unwrap();
        }
        let mut app = App::new(&ctx, Language::Spanish).unwrap();
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.current_content[0], "Capítulo 1");

        // When moving back from the first chapter
        app.previous_chapter();

        // Then the last chapter is selected and shown
        assert_eq!(app.list_state.selected(), Some(2));
        assert_eq!(app.current_content[0], "Capítulo 3");

        app.next_chapter();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_switch_language_reloads_list() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(dir.path().to_path_buf(), TreeCodec::default());
        create_chapter(&ctx, Language::Spanish, None, None).unwrap();

        let mut app = App::new(&ctx, Language::Spanish).unwrap();
        app.switch_language().unwrap();

        assert_eq!(app.language, Language::English);
        assert!(app.chapters.is_empty());
        assert_eq!(app.list_state.selected(), None);
        assert!(app.current_content.is_empty());

        // navigating an empty list is a no-op
        app.next_chapter();
        app.previous_chapter();
        assert_eq!(app.list_state.selected(), None);
    }
}
