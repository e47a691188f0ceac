//! Terminal chat channel.
//!
//! Renders flow events to stdout and feeds user lines back into the session
//! until the flow finishes or the user interrupts.

use crossterm::style::Stylize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::{ChannelError, Error};
use crate::flow::{BotEvent, FlowDeps, FlowSession, Variant};

const PROMPT: &str = "tú> ";

/// Run one interactive session to completion.
pub async fn run(variant: Variant, deps: FlowDeps) -> Result<(), Error> {
    let mut editor = DefaultEditor::new().map_err(ChannelError::from)?;
    let mut session = FlowSession::new(variant);

    let mut finished = render(&session.opening());
    while !finished {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("{}", "Sesión interrumpida.".dark_grey());
                return Ok(());
            }
            Err(err) => return Err(ChannelError::from(err).into()),
        };
        let _ = editor.add_history_entry(line.as_str());

        match session.handle_turn(&line, &deps).await {
            Ok(events) => finished = render(&events),
            Err(err) => {
                tracing::error!(error = %err, "turn failed");
                println!(
                    "{}",
                    "⚠️  El servicio de análisis no responde. Repite tu último \
                     mensaje para reintentar."
                        .red()
                );
            }
        }
    }
    Ok(())
}

/// Print a turn's events. Returns `true` when the flow signalled completion.
fn render(events: &[BotEvent]) -> bool {
    let mut finished = false;
    for event in events {
        match event {
            BotEvent::Say(text) => println!("🤖 {text}"),
            BotEvent::Chart(chart) => {
                println!();
                print!("{chart}");
                println!();
            }
            BotEvent::AskChoice(question) => {
                println!("🤖 {}", question.text.bold());
                for (i, option) in question.options.iter().enumerate() {
                    println!("   {}. {}", i + 1, option);
                }
                let hint = if question.multi {
                    "(elige uno o varios números, separados por comas)"
                } else {
                    "(elige un número)"
                };
                println!("   {}", hint.dark_grey());
            }
            BotEvent::Finished => finished = true,
        }
    }
    finished
}
