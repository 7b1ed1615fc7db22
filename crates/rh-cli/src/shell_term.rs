#[cfg(coverage)]
pub(crate) fn run_window_session(
    session: &mut rh_host::StandaloneSession,
    shell: &crate::shell_line::LineShell,
) -> Result<i32, rh_core::RehostError> {
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut writer = std::io::stdout();
    crate::shell_line::run_line_session(session, shell, &mut reader, &mut writer)
}

#[cfg(not(coverage))]
mod rich {
    use std::io;
    use std::time::Duration;

    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
    use crossterm::terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    };
    use crossterm::ExecutableCommand;
    use ratatui::backend::CrosstermBackend;
    use ratatui::text::Line;
    use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
    use ratatui::{Frame, Terminal};
    use rh_core::RehostError;
    use rh_host::{StandaloneSession, WindowConfig};

    use crate::error_map::map_shell_io;
    use crate::shell_line::LineShell;

    const POLL_INTERVAL_MS: u64 = 250;

    struct ShellTerminal {
        terminal: Terminal<CrosstermBackend<io::Stdout>>,
    }

    impl ShellTerminal {
        fn new() -> Result<Self, RehostError> {
            enable_raw_mode().map_err(map_shell_io)?;
            io::stdout()
                .execute(EnterAlternateScreen)
                .map_err(map_shell_io)?;
            let backend = CrosstermBackend::new(io::stdout());
            let terminal = Terminal::new(backend).map_err(map_shell_io)?;
            Ok(Self { terminal })
        }

        fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
            &mut self.terminal
        }
    }

    impl Drop for ShellTerminal {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
        }
    }

    pub(crate) fn run_window_session(
        session: &mut StandaloneSession,
        shell: &LineShell,
    ) -> Result<i32, RehostError> {
        let window = shell.window().cloned().unwrap_or_else(|| {
            WindowConfig::new(session.client_name().to_string())
        });
        let mut terminal = ShellTerminal::new()?;
        session.set_visible(true);

        loop {
            terminal
                .terminal_mut()
                .draw(|frame| render_window(frame, session, &window))
                .map_err(map_shell_io)?;

            if !event::poll(Duration::from_millis(POLL_INTERVAL_MS)).map_err(map_shell_io)? {
                continue;
            }

            match event::read().map_err(map_shell_io)? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break
                        }
                        KeyCode::Char('v') => {
                            let visible = session.is_visible();
                            session.set_visible(!visible);
                        }
                        _ => {}
                    }
                }
                Event::Resize(width, height) => {
                    session.notify_resized(u32::from(width), u32::from(height));
                }
                _ => {}
            }
        }

        // close request: tear the client down, then report a clean exit
        session.shutdown();
        Ok(0)
    }

    fn render_window(frame: &mut Frame<'_>, session: &StandaloneSession, window: &WindowConfig) {
        let block = Block::default()
            .title(window.title.clone())
            .borders(Borders::ALL);
        let lines = vec![
            Line::from(format!("client: {}", session.client_name())),
            Line::from(format!("root: {}", session.root().display())),
            Line::from(format!("visible: {}", session.is_visible())),
            Line::from("keys: v toggles visibility, q closes the window"),
        ];
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, frame.area());
    }
}

#[cfg(not(coverage))]
pub(crate) use rich::run_window_session;
