use crate::engine::{QuizEngine, QuizError};
use crate::logger;
use crate::models::{CategoryFilter, QuizState};
use crate::surface::TerminalSurface;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Screen currently on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
    QuizQuitConfirm,
    Summary,
}

pub struct App {
    pub engine: QuizEngine<TerminalSurface>,
    pub selected_menu_index: usize,
    pub confirming_quit: bool,
    pub load_error: Option<String>,
}

impl App {
    pub fn new(engine: QuizEngine<TerminalSurface>) -> Self {
        Self {
            engine,
            selected_menu_index: 0,
            confirming_quit: false,
            load_error: None,
        }
    }

    /// Builds the app from a question file; a failed load still yields an app.
    pub fn from_path(path: &Path) -> Self {
        let mut engine = QuizEngine::new(TerminalSurface::new());
        let loaded = engine.load_questions_from(path);
        let mut app = Self::new(engine);
        if !loaded {
            app.load_error = Some(path.display().to_string());
        }
        app
    }

    pub fn state(&self) -> AppState {
        match self.engine.state() {
            QuizState::CategorySelection => AppState::Menu,
            QuizState::InQuestion | QuizState::AnswerShown if self.confirming_quit => {
                AppState::QuizQuitConfirm
            }
            QuizState::InQuestion | QuizState::AnswerShown => AppState::Quiz,
            QuizState::Finished => AppState::Summary,
        }
    }

    /// Number of menu entries: one per category plus "all".
    pub fn menu_len(&self) -> usize {
        self.engine.categories().len() + 1
    }

    pub fn selected_filter(&self) -> CategoryFilter {
        match self.engine.categories().get(self.selected_menu_index) {
            Some(category) => CategoryFilter::Named(category.clone()),
            None => CategoryFilter::All,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Exit;
        }

        let result = match self.state() {
            AppState::Menu => return self.handle_menu_input(key),
            AppState::Quiz => self.handle_quiz_input(key),
            AppState::QuizQuitConfirm => {
                self.handle_quit_confirm_input(key);
                Ok(())
            }
            AppState::Summary => return self.handle_summary_input(key),
        };

        if let Err(e) = result {
            logger::warn(&format!("Ignored key {:?}: {}", key.code, e));
        }
        Flow::Continue
    }

    fn handle_menu_input(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Up => {
                self.selected_menu_index = self.selected_menu_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_menu_index < self.menu_len().saturating_sub(1) {
                    self.selected_menu_index += 1;
                }
            }
            KeyCode::Enter => {
                let filter = self.selected_filter();
                if let Err(e) = self.engine.start_quiz(filter) {
                    logger::warn(&format!("Could not start quiz: {}", e));
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Exit,
            _ => {}
        }
        Flow::Continue
    }

    fn handle_quiz_input(&mut self, key: KeyEvent) -> Result<(), QuizError> {
        if key.code == KeyCode::Esc {
            self.confirming_quit = true;
            return Ok(());
        }

        if self.engine.state() == QuizState::AnswerShown {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => self.engine.advance(),
                _ => Ok(()),
            };
        }

        match key.code {
            KeyCode::Up => {
                self.engine.surface_mut().cursor_up();
                Ok(())
            }
            KeyCode::Down => {
                self.engine.surface_mut().cursor_down();
                Ok(())
            }
            KeyCode::Char(' ') => match self.engine.surface().cursor_key().map(str::to_string) {
                Some(option_key) => self.engine.select_option(&option_key),
                None => Ok(()),
            },
            KeyCode::Enter => {
                if self.engine.surface().can_check {
                    self.engine.check_answer().map(|_| ())
                } else {
                    Ok(())
                }
            }
            KeyCode::Char(c) => match self.engine.surface().key_for_char(c) {
                Some(option_key) => self.engine.select_option(&option_key),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }

    fn handle_quit_confirm_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.confirming_quit = false;
                self.engine.restart();
                self.selected_menu_index = 0;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirming_quit = false;
            }
            _ => {}
        }
    }

    fn handle_summary_input(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Char('r') => {
                if let Err(e) = self.engine.retry() {
                    logger::warn(&format!("Could not retry quiz: {}", e));
                }
            }
            KeyCode::Char('m') | KeyCode::Enter => {
                self.engine.restart();
                self.selected_menu_index = 0;
            }
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Exit,
            _ => {}
        }
        Flow::Continue
    }
}
