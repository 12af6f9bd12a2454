use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use interactive_quiz::{
    draw_menu, draw_quit_confirmation, draw_quiz, draw_summary, logger, App, AppState, Flow,
    QuizConfig,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

fn main() -> io::Result<()> {
    let config = QuizConfig::from_env();
    logger::init(&config.log_path);
    logger::info(&format!(
        "Starting with questions from {}",
        config.questions_path.display()
    ));

    let mut app = App::from_path(&config.questions_path);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::error(&format!("Terminal error: {}", e));
    }
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| match app.state() {
            AppState::Menu => draw_menu(
                f,
                app.engine.store(),
                app.selected_menu_index,
                app.load_error.as_deref(),
            ),
            AppState::Quiz => draw_quiz(f, app.engine.surface()),
            AppState::QuizQuitConfirm => draw_quit_confirmation(f),
            AppState::Summary => {
                let surface = app.engine.surface();
                draw_summary(f, &surface.title, &surface.score);
            }
        })?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key) == Flow::Exit
        {
            logger::info("Exiting");
            return Ok(());
        }
    }
}
