//! Keyboard demo entry point

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli_console::{InteractiveConsole, TextCanvas};
use keyboard_core::TextBuffer;
use services_keyboard::{KeyboardSettings, KeyboardWidget};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Drive the d-pad keyboard from a terminal
///
/// Keys: w/a/s/d move, e confirm, E confirm with shift, b back, B delete,
/// q quit. Several keys may be entered on one line.
///
/// The screen is redrawn after every input line. A validation message times
/// out on its own, but the change only shows on the next redraw; an empty
/// line redraws without sending input.
#[derive(Debug, Parser)]
#[command(name = "keyboard-demo", version)]
struct Args {
    /// Header shown above the text field
    #[arg(long)]
    header: Option<String>,

    /// Minimum text length accepted by ENTER
    #[arg(long)]
    min_length: Option<usize>,

    /// Buffer capacity in bytes, terminator included
    #[arg(long, default_value_t = 32)]
    capacity: usize,

    /// Initial text, shown as a placeholder replaced by the first key
    #[arg(long)]
    default_text: Option<String>,

    /// Settings file (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print without ANSI reverse video
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => KeyboardSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => KeyboardSettings::new(),
    };
    if let Some(header) = args.header.clone() {
        settings.header = header;
    }
    if let Some(min_length) = args.min_length {
        settings.minimum_length = min_length;
    }

    let buffer = match &args.default_text {
        Some(text) => TextBuffer::with_text(text, args.capacity),
        None => TextBuffer::with_capacity(args.capacity),
    }
    .map_err(|e| anyhow::anyhow!("invalid buffer: {}", e))?;

    let widget = KeyboardWidget::new();
    widget.apply_settings(&settings);

    let done = Arc::new(AtomicBool::new(false));
    let done_flag = Arc::clone(&done);
    widget.bind(
        buffer,
        move |text: &str| {
            println!("submitted: {}", text);
            done_flag.store(true, Ordering::SeqCst);
        },
        args.default_text.is_some(),
    );

    info!(capacity = args.capacity, "keyboard demo started");
    let mut console = InteractiveConsole::new(widget);
    let stdout = io::stdout();
    draw(&console, args.plain, &mut stdout.lock())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let outcome = console.process_line(&line);
        if outcome.quit || done.load(Ordering::SeqCst) {
            break;
        }
        draw(&console, args.plain, &mut stdout.lock())?;
    }

    info!(events = console.event_log().len(), "keyboard demo finished");
    Ok(())
}

fn draw<C, W>(console: &InteractiveConsole<C>, plain: bool, out: &mut W) -> Result<()>
where
    C: services_keyboard::Clock,
    W: Write,
{
    let mut canvas = TextCanvas::new();
    console.widget().render(&mut canvas);
    if plain {
        for line in canvas.lines() {
            writeln!(out, "{}", line)?;
        }
    } else {
        write!(out, "{}", canvas.to_ansi())?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_help_explains_redraw_timing() {
        let help = Args::command().render_long_help().to_string();
        assert!(help.contains("only shows on the next redraw"));
        assert!(help.contains("an empty line redraws"));
    }
}
