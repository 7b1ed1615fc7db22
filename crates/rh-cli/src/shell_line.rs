use std::io::{BufRead, Write};

use rh_core::RehostError;
use rh_host::{SharedAdapter, StandaloneSession, WindowConfig, WindowShell};

use crate::error_map::map_shell_io;

// Shell record used by both presentation modes: launch drives the
// WindowShell seam, the session loops below drive the embedded client.
pub(crate) struct LineShell {
    window: Option<WindowConfig>,
    mounted: bool,
}

impl LineShell {
    pub(crate) fn new() -> Self {
        Self {
            window: None,
            mounted: false,
        }
    }

    pub(crate) fn window(&self) -> Option<&WindowConfig> {
        self.window.as_ref()
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl WindowShell for LineShell {
    fn create_window(&mut self, config: &WindowConfig) -> Result<(), RehostError> {
        log::info!(
            "window '{}' opened at {}x{}",
            config.title,
            config.width,
            config.height
        );
        self.window = Some(config.clone());
        Ok(())
    }

    fn set_content(&mut self, _adapter: &SharedAdapter) -> Result<(), RehostError> {
        self.mounted = true;
        Ok(())
    }
}

const LINE_COMMANDS: &str = "commands: :help :show :hide :resize W H :param NAME :status :quit";

pub(crate) fn run_line_session(
    session: &mut StandaloneSession,
    shell: &LineShell,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, RehostError> {
    if let Some(window) = shell.window() {
        writeln!(
            writer,
            "window '{}' at {}x{}",
            window.title, window.width, window.height
        )
        .map_err(map_shell_io)?;
    }
    writeln!(writer, "{}", LINE_COMMANDS).map_err(map_shell_io)?;
    session.set_visible(true);

    loop {
        // reaching end of input is the close request in this mode
        let Some(raw) = prompt_input_from("> ", reader, writer)? else {
            break;
        };
        match handle_line_command(raw.as_str(), session, writer)? {
            LineAction::Continue => {}
            LineAction::Close => break,
        }
    }

    session.shutdown();
    Ok(0)
}

enum LineAction {
    Continue,
    Close,
}

fn handle_line_command(
    raw: &str,
    session: &mut StandaloneSession,
    writer: &mut dyn Write,
) -> Result<LineAction, RehostError> {
    match raw {
        "" => Ok(LineAction::Continue),
        ":help" => {
            writeln!(writer, "{}", LINE_COMMANDS).map_err(map_shell_io)?;
            Ok(LineAction::Continue)
        }
        ":show" => {
            session.set_visible(true);
            writeln!(writer, "visible: true").map_err(map_shell_io)?;
            Ok(LineAction::Continue)
        }
        ":hide" => {
            session.set_visible(false);
            writeln!(writer, "visible: false").map_err(map_shell_io)?;
            Ok(LineAction::Continue)
        }
        ":status" => {
            writeln!(writer, "client: {}", session.client_name()).map_err(map_shell_io)?;
            writeln!(writer, "root: {}", session.root().display()).map_err(map_shell_io)?;
            writeln!(writer, "visible: {}", session.is_visible()).map_err(map_shell_io)?;
            Ok(LineAction::Continue)
        }
        ":quit" => {
            writeln!(writer, "bye").map_err(map_shell_io)?;
            Ok(LineAction::Close)
        }
        _ => {
            if let Some(rest) = raw.strip_prefix(":resize ") {
                return handle_resize(rest, session, writer);
            }
            if let Some(name) = raw.strip_prefix(":param ") {
                let answer = session
                    .adapter()
                    .borrow()
                    .parameter(name)
                    .unwrap_or_else(|| "<absent>".to_string());
                writeln!(writer, "PARAM:{}={}", name, answer).map_err(map_shell_io)?;
                return Ok(LineAction::Continue);
            }
            writeln!(writer, "unknown command: {}", raw).map_err(map_shell_io)?;
            Ok(LineAction::Continue)
        }
    }
}

fn handle_resize(
    rest: &str,
    session: &mut StandaloneSession,
    writer: &mut dyn Write,
) -> Result<LineAction, RehostError> {
    let mut parts = rest.split_whitespace();
    let parsed = match (parts.next(), parts.next(), parts.next()) {
        (Some(width), Some(height), None) => width
            .parse::<u32>()
            .ok()
            .zip(height.parse::<u32>().ok()),
        _ => None,
    };
    match parsed {
        Some((width, height)) => {
            session.notify_resized(width, height);
            writeln!(writer, "resized to {}x{}", width, height).map_err(map_shell_io)?;
        }
        None => {
            writeln!(writer, "usage: :resize W H").map_err(map_shell_io)?;
        }
    }
    Ok(LineAction::Continue)
}

pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<Option<String>, RehostError> {
    write!(writer, "{}", prefix).map_err(map_shell_io)?;
    writer.flush().map_err(map_shell_io)?;
    let mut input = String::new();
    let read = reader.read_line(&mut input).map_err(map_shell_io)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
