/// Line commands typed into the terminal player
use crate::error::{CliError, Result};
use tune_transport::{ControlIcon, Input, Key, NavLink, TransportButton};

/// One parsed line
#[derive(Debug, Clone, PartialEq)]
pub enum LineCommand {
    /// Forward to the session
    Input(Input),
    /// Print the help text
    Help,
    /// Print the current state
    Status,
    /// Leave the player
    Quit,
}

pub const HELP: &str = "\
Commands:
  space | p            play/pause
  left | right         skip -/+ keyboard step
  rewind | forward     skip -/+ button step
  seek <0-100>         jump to a point on the progress bar
  shuffle | repeat     transport buttons
  like | next | lyrics | queue | share
  card [title]         click a card
  badge <label>        click a badge
  search | install     other page controls
  status | help | quit";

/// Parse a line of user input
///
/// Blank lines parse to `None`.
pub fn parse_line(line: &str) -> Result<Option<LineCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "space" | "p" => LineCommand::Input(Input::Key(Key::Space)),
        "left" => LineCommand::Input(Input::Key(Key::ArrowLeft)),
        "right" => LineCommand::Input(Input::Key(Key::ArrowRight)),
        "shuffle" => button(TransportButton::Shuffle),
        "rewind" | "prev" => button(TransportButton::Rewind),
        "play" | "pause" => button(TransportButton::PlayPause),
        "forward" | "ff" => button(TransportButton::Forward),
        "repeat" => button(TransportButton::Repeat),
        "like" => icon(ControlIcon::Like),
        "next" => icon(ControlIcon::PlayNext),
        "lyrics" => icon(ControlIcon::Lyrics),
        "queue" => icon(ControlIcon::Queue),
        "share" => icon(ControlIcon::Share),
        "search" => LineCommand::Input(Input::NavLink(NavLink::Search)),
        "link" => LineCommand::Input(Input::NavLink(NavLink::Placeholder)),
        "install" => LineCommand::Input(Input::InstallButton),
        "seek" => {
            let value = rest.parse::<f64>().map_err(|e| CliError::InvalidArgument {
                command: "seek".to_string(),
                reason: e.to_string(),
            })?;
            LineCommand::Input(Input::ProgressInput(value))
        }
        "card" => LineCommand::Input(Input::Card {
            title: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "badge" => {
            if rest.is_empty() {
                return Err(CliError::InvalidArgument {
                    command: "badge".to_string(),
                    reason: "missing label".to_string(),
                });
            }
            LineCommand::Input(Input::Badge(rest.to_string()))
        }
        "status" => LineCommand::Status,
        "help" | "?" => LineCommand::Help,
        "quit" | "q" | "exit" => LineCommand::Quit,
        other => return Err(CliError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn button(button: TransportButton) -> LineCommand {
    LineCommand::Input(Input::TransportButton(button))
}

fn icon(icon: ControlIcon) -> LineCommand {
    LineCommand::Input(Input::ControlIcon(icon))
}
