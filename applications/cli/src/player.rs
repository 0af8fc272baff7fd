/// Interactive terminal player
///
/// Reads line commands, forwards them to the session and redraws the
/// progress line whenever the visible label changes.
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use tune_session::{SessionEvent, SessionHandle};
use tune_transport::{PlaybackState, TransportEvent};

use crate::{
    error::Result,
    input::{parse_line, LineCommand, HELP},
    render::{needs_redraw, notice_line, progress_line, BAR_WIDTH},
};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

/// Drive the session from `reader` until `quit`, end of input, or the
/// session stopping
pub async fn run_player<R, W>(
    handle: &SessionHandle,
    reader: R,
    out: &mut W,
    mode: OutputMode,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();
    let mut state = handle.watch();
    let mut events = handle.subscribe();

    let mut last = *state.borrow_and_update();
    draw(out, &last, mode)?;

    loop {
        tokio::select! {
            // Session output first, so every input's effects are shown
            // before the next line is read
            biased;

            event = events.recv() => match event {
                Ok(SessionEvent::Notice(notice)) => match mode {
                    OutputMode::Text => writeln!(out, "{}", notice_line(&notice))?,
                    OutputMode::Json => writeln!(out, "{}", serde_json::to_string(&notice)?)?,
                },
                Ok(SessionEvent::Transport(TransportEvent::TrackFinished)) => {
                    if mode == OutputMode::Text {
                        writeln!(out, "Track finished")?;
                    }
                }
                // Text output is line based; only JSON consumers restyle notices
                Ok(SessionEvent::NoticeChanged(change)) => {
                    if mode == OutputMode::Json {
                        writeln!(out, "{}", serde_json::to_string(&change)?)?;
                    }
                }
                Ok(SessionEvent::Transport(_)) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Player lagged behind session, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            },

            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = *state.borrow_and_update();
                if needs_redraw(&last, &current) {
                    draw(out, &current, mode)?;
                }
                last = current;
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };

                match parse_line(&line) {
                    Ok(None) => {}
                    Ok(Some(LineCommand::Quit)) => break,
                    Ok(Some(LineCommand::Help)) => writeln!(out, "{}", HELP)?,
                    Ok(Some(LineCommand::Status)) => draw(out, &handle.snapshot(), mode)?,
                    Ok(Some(LineCommand::Input(input))) => {
                        let dispatch = handle.input(input).await?;
                        if dispatch.is_ignored() {
                            writeln!(out, "Nothing bound to that input")?;
                        }
                    }
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
        }

        out.flush()?;
    }

    Ok(())
}

fn draw<W: Write>(out: &mut W, state: &PlaybackState, mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Text => writeln!(out, "{}", progress_line(state, BAR_WIDTH))?,
        OutputMode::Json => writeln!(out, "{}", serde_json::to_string(state)?)?,
    }
    Ok(())
}
