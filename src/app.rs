use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap};
use ratatui::{DefaultTerminal, Frame};

use crate::config::Settings;
use crate::domain::notice::Notice;
use crate::extension::Splittable;
use crate::router::{Router, Screen, ScreenChange};
use crate::screen::login::LoginScreenWidget;
use crate::screen::signup::SignUpScreenWidget;
use crate::screen::{OnKeyEvent, OnTick};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    /// Is the application running?
    running: bool,
    router: Router,
    /// Blocks all screen input while shown.
    notice: Option<Notice>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: Settings) -> Self {
        Self {
            running: true,
            router: Router::new(settings),
            notice: None,
        }
    }

    /// Run the application's main loop.
    ///
    /// Must be called from within a tokio runtime: the sign-up screen spawns
    /// its countdown on it.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_crossterm_events()?;
            self.on_tick();
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        match self.router.screen_mut() {
            Screen::Login(data) => frame.render_stateful_widget(LoginScreenWidget, area, data),
            Screen::SignUp(data) => frame.render_stateful_widget(SignUpScreenWidget, area, data),
        }

        if let Some(notice) = self.notice {
            let [popup_area] = Layout::vertical([Constraint::Length(5)])
                .flex(Flex::Center)
                .areas(area);
            let popup_area = Layout::center_column(popup_area, 48);
            frame.render_widget(NoticePopup { notice }, popup_area);
        } else if let Some(position) = self.router.screen().cursor_position() {
            frame.set_cursor_position(position);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> Result<()> {
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                self.on_key_event(key);
            }
        }
        Ok(())
    }

    /// Timers stand still while a notice is shown.
    fn on_tick(&mut self) {
        let screen = self.router.screen_mut();
        if self.notice.is_some() {
            screen.skip_ticks();
        } else {
            screen.on_tick();
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if self.notice.is_some() {
            self.on_notice_key_event(key);
            return;
        }
        match self.router.screen_mut().on_key_event(key) {
            ScreenChange::Quit => self.quit(),
            ScreenChange::Navigate(destination) => self.router.navigate_to(destination),
            ScreenChange::Notify(notice) => {
                info!("showing notice: {notice}");
                self.notice = Some(notice);
            }
            ScreenChange::None => {}
        }
    }

    fn on_notice_key_event(&mut self, key: KeyEvent) {
        match (key.kind, key.modifiers, key.code) {
            (KeyEventKind::Press, KeyModifiers::CONTROL, KeyCode::Char('c')) => self.quit(),
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Enter | KeyCode::Esc) => {
                self.notice = None;
            }
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

pub struct NoticePopup {
    notice: Notice,
}

impl Widget for NoticePopup {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let color = if self.notice.is_error() {
            Color::Red
        } else {
            Color::LightGreen
        };
        Clear.render(area, buf);
        Paragraph::new(self.notice.to_string())
            .centered()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(self.notice.title())
                    .title_bottom(Line::from("Enter to dismiss").centered())
                    .style(Style::default().fg(color)),
            )
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::time::sleep;

    use super::*;
    use crate::domain::form::Field;
    use crate::domain::signup::SignUpFlowState;
    use crate::error::Error;
    use crate::router::Destination;

    fn press(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn rendered(app: &mut App) -> color_eyre::Result<String> {
        let mut terminal = Terminal::new(TestBackend::new(120, 30))?;
        terminal.draw(|frame| app.draw(frame))?;
        Ok(terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect())
    }

    fn signup_flow_state(app: &App) -> Option<SignUpFlowState> {
        match app.router.screen() {
            Screen::SignUp(data) => Some(data.flow().state()),
            Screen::Login(_) => None,
        }
    }

    #[test]
    fn test_missing_field_notice_blocks_input() -> color_eyre::Result<()> {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.notice,
            Some(Notice::Rejected(Error::MissingRequiredField))
        );
        assert!(rendered(&mut app)?.contains("All Fields are Mandatory !!"));

        type_text(&mut app, "ignored");
        press(&mut app, KeyCode::Esc);
        assert!(app.running);
        assert_eq!(app.notice, None);

        let Screen::Login(data) = app.router.screen() else {
            panic!("expected login screen");
        };
        assert_eq!(data.form().field(Field::Email), "");
        Ok(())
    }

    #[test]
    fn test_login_renders_form() -> color_eyre::Result<()> {
        let mut app = App::default();
        let screen = rendered(&mut app)?;
        assert!(screen.contains("Listen to the top music"));
        assert!(screen.contains("Enter your email"));
        assert!(screen.contains("Don't Have an Account ? SignUp"));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_signup_journey() -> color_eyre::Result<()> {
        let mut app = App::default();
        // email, password, toggle, login, signup link
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.router.current(), Destination::SignUp);

        type_text(&mut app, "Jan");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.notice, Some(Notice::OtpSent));
        assert!(rendered(&mut app)?.contains("OTP Sent Successfully"));
        press(&mut app, KeyCode::Enter);
        assert_eq!(signup_flow_state(&app), Some(SignUpFlowState::AwaitingOtp));
        assert!(rendered(&mut app)?.contains("Resend OTP in 30"));

        sleep(Duration::from_millis(5_010)).await;
        app.on_tick();
        assert!(rendered(&mut app)?.contains("Resend OTP in 25"));

        type_text(&mut app, "000000");
        press(&mut app, KeyCode::Enter);
        assert!(rendered(&mut app)?.contains("Invalid OTP. Try again."));
        press(&mut app, KeyCode::Enter);

        for _ in 0..6 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "123456");
        press(&mut app, KeyCode::Enter);
        assert!(rendered(&mut app)?.contains("OTP Verified! Account created."));
        press(&mut app, KeyCode::Esc);
        assert_eq!(signup_flow_state(&app), Some(SignUpFlowState::AwaitingOtp));
        assert!(app.running);

        sleep(Duration::from_secs(26)).await;
        app.on_tick();
        let screen = rendered(&mut app)?;
        assert!(screen.contains("Resend"));
        assert!(!screen.contains("Resend OTP in"));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_stands_still_behind_notice() -> color_eyre::Result<()> {
        let mut app = App::default();
        app.router.navigate_to(Destination::SignUp);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.notice, Some(Notice::OtpSent));

        sleep(Duration::from_millis(5_010)).await;
        app.on_tick();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.notice, None);
        app.on_tick();
        assert!(rendered(&mut app)?.contains("Resend OTP in 30"));

        sleep(Duration::from_secs(2)).await;
        app.on_tick();
        assert!(rendered(&mut app)?.contains("Resend OTP in 28"));
        Ok(())
    }

    #[test]
    fn test_ctrl_c_quits_even_with_notice() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
