//! Line-oriented analyzer session on stdin/stdout.

use std::io::{self, BufRead, Write};

use radar_core::{InputType, Msg};

use crate::app::Session;
use crate::ui::render::{render, render_backend, RenderStyle};

const HELP: &str = "\
Commands:
  mode text|url    switch the active input
  text <content>   set the text to analyze
  url <address>    set the URL to analyze
  submit           analyze the active input
  clear            empty both inputs
  show             print the current screen
  info             query backend model info
  help             show this help
  quit             leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mode(InputType),
    Text(String),
    Url(String),
    Submit,
    Clear,
    Show,
    Info,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command {0:?}, type `help`")]
    Unknown(String),
    #[error("usage: mode text|url")]
    BadMode,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if line.trim().is_empty() {
        return Ok(None);
    }
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "mode" => match rest.trim().to_ascii_lowercase().as_str() {
            "text" => Command::Mode(InputType::Text),
            "url" => Command::Mode(InputType::Url),
            _ => return Err(ParseError::BadMode),
        },
        "text" => Command::Text(rest.to_string()),
        "url" => Command::Url(rest.to_string()),
        "submit" | "analyze" => Command::Submit,
        "clear" => Command::Clear,
        "show" => Command::Show,
        "info" => Command::Info,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

pub fn run(session: &mut Session, style: RenderStyle) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{HELP}")?;
    write!(stdout, "{}", render(&session.view(), style))?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };
        if !execute(session, command, &mut stdout, style)? {
            break;
        }
    }
    Ok(())
}

/// Applies one command and prints what changed. Returns false on `quit`.
fn execute(
    session: &mut Session,
    command: Command,
    out: &mut impl Write,
    style: RenderStyle,
) -> io::Result<bool> {
    let changed = match command {
        Command::Mode(input_type) => session.dispatch(Msg::InputTypeChanged(input_type)),
        Command::Text(content) => session.dispatch(Msg::ContentChanged(content)),
        Command::Url(url) => session.dispatch(Msg::UrlChanged(url)),
        Command::Submit => {
            if let Some(view) = session.dispatch(Msg::SubmitClicked) {
                write!(out, "{}", render(&view, style))?;
                out.flush()?;
            }
            // A locally rejected submit was fully shown above.
            if session.state().is_analyzing() {
                session.wait_until_idle();
                Some(session.view())
            } else {
                None
            }
        }
        Command::Clear => session.clear(),
        Command::Show => Some(session.view()),
        Command::Info => {
            session.load_model_info();
            writeln!(out, "{}", render_backend(&session.view().backend))?;
            None
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            None
        }
        Command::Quit => return Ok(false),
    };

    if let Some(view) = changed {
        write!(out, "{}", render(&view, style))?;
    }
    out.flush()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use radar_core::InputType;
    use radar_engine::ClientSettings;

    use super::{execute, parse_command, Command, ParseError};
    use crate::app::Session;
    use crate::ui::render::RenderStyle;

    const PLAIN: RenderStyle = RenderStyle { color: false };

    fn run_script(session: &mut Session, commands: Vec<Command>) -> String {
        let mut out = Vec::new();
        for command in commands {
            assert!(execute(session, command, &mut out, PLAIN).unwrap());
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_command("   \n"), Ok(None));
    }

    #[test]
    fn text_keeps_rest_of_line_verbatim() {
        assert_eq!(
            parse_command("text  Breaking: markets  crash \n"),
            Ok(Some(Command::Text(" Breaking: markets  crash ".to_string())))
        );
    }

    #[test]
    fn mode_is_case_insensitive() {
        assert_eq!(
            parse_command("MODE Url"),
            Ok(Some(Command::Mode(InputType::Url)))
        );
        assert_eq!(parse_command("mode video"), Err(ParseError::BadMode));
    }

    #[test]
    fn aliases_map_to_commands() {
        assert_eq!(parse_command("analyze"), Ok(Some(Command::Submit)));
        assert_eq!(parse_command("exit"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("?"), Ok(Some(Command::Help)));
        assert_eq!(parse_command("Clear"), Ok(Some(Command::Clear)));
        assert_eq!(parse_command("url"), Ok(Some(Command::Url(String::new()))));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            parse_command("frobnicate now"),
            Err(ParseError::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn rejected_submit_is_printed_once() {
        let mut session = Session::new(ClientSettings::default()).unwrap();
        let out = run_script(&mut session, vec![Command::Submit]);

        assert_eq!(out, "[text] (empty)\nError: Please enter some text to analyze\n");
    }

    #[test]
    fn clear_resets_inputs_and_error() {
        let mut session = Session::new(ClientSettings::default()).unwrap();
        let out = run_script(
            &mut session,
            vec![
                Command::Url("https://example.com/a".into()),
                Command::Text("   ".into()),
                Command::Submit,
                Command::Clear,
            ],
        );

        assert!(out.ends_with("Error: Please enter some text to analyze\n[text] (empty)\n"));
        assert_eq!(session.state().input_content(), "");
        assert_eq!(session.state().url(), "");
        assert!(session.state().error().is_none());
    }

    #[test]
    fn quit_stops_the_session() {
        let mut session = Session::new(ClientSettings::default()).unwrap();
        let mut out = Vec::new();
        assert!(!execute(&mut session, Command::Quit, &mut out, PLAIN).unwrap());
        assert!(out.is_empty());
    }
}
