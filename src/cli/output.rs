//! Colored terminal output for packaging commands.
//!
//! Status lines go to stdout and respect `--quiet`; errors go to stderr and
//! are always shown.

use std::io::{self, Write};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Width of the label column in [`OutputManager::field`] lines.
const FIELD_WIDTH: usize = 12;

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose, self.quiet)
    }
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// `✓ message` in green.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.status(tagged(Color::Green, "✓", message, None))
    }

    /// `warning: message`, with the whole line in yellow.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.status(tagged(Color::Yellow, "warning:", message, Some(Color::Yellow)))
    }

    /// `error: message` on stderr, shown even in quiet mode.
    pub fn error(&self, message: &str) {
        let stderr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = stderr.buffer();
        let written = fill(&mut buffer, Color::Red, "error:", message, Some(Color::Red)).is_ok()
            && stderr.print(&buffer).is_ok();
        if !written {
            // stderr is gone; stdout is the only place left
            println!("error: {}", message);
        }
    }

    /// `→ message`, only with `--verbose`.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.status(tagged(Color::Blue, "→", message, None))
    }

    /// Bold cyan title line, e.g. `==> Packaging`.
    pub fn heading(&self, title: &str) -> io::Result<()> {
        self.status(tagged(Color::Cyan, "==>", title, None))
    }

    /// Aligned `label value` line under a heading or success line.
    pub fn field(&self, label: &str, value: &str) -> io::Result<()> {
        self.println(&format!("    {:<width$} {}", label, value, width = FIELD_WIDTH))
    }

    /// Bulleted list under a bold title. Prints nothing for an empty list.
    pub fn list(&self, title: &str, items: &[String]) -> io::Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.println(title)?;
        for item in items {
            self.println(&format!("  • {}", item))?;
        }
        Ok(())
    }

    /// Plain line, suppressed in quiet mode.
    pub fn println(&self, message: &str) -> io::Result<()> {
        self.status(|buffer: &mut Buffer| writeln!(buffer, "{}", message))
    }

    fn status(&self, render: impl FnOnce(&mut Buffer) -> io::Result<()>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut buffer = self.bufwtr.buffer();
        render(&mut buffer)?;
        self.bufwtr.print(&buffer)
    }
}

fn tagged<'a>(
    color: Color,
    tag: &'a str,
    message: &'a str,
    body: Option<Color>,
) -> impl FnOnce(&mut Buffer) -> io::Result<()> + 'a {
    move |buffer| fill(buffer, color, tag, message, body)
}

fn fill(
    buffer: &mut Buffer,
    color: Color,
    tag: &str,
    message: &str,
    body: Option<Color>,
) -> io::Result<()> {
    buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(buffer, "{}", tag)?;
    buffer.reset()?;
    if let Some(body) = body {
        buffer.set_color(ColorSpec::new().set_fg(Some(body)))?;
    }
    writeln!(buffer, " {}", message)?;
    buffer.reset()
}
