//! ANSI styling, banner, progress bar and cursor state.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";
const GRAY: &str = "\x1b[90m";

const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";

const LOGO: [&str; 6] = [
    "███████╗██╗  ██╗██╗██╗     ██╗     ███████╗ ██╗    ██╗███████╗",
    "██╔════╝██║ ██╔╝██║██║     ██║     ██╔════╝ ██║    ██║██╔════╝",
    "███████╗█████╔╝ ██║██║     ██║     ███████╗ ██║ █╗ ██║███████╗",
    "╚════██║██╔═██╗ ██║██║     ██║     ╚════██║ ██║███╗██║╚════██║",
    "███████║██║  ██╗██║███████╗███████╗███████║ ╚███╔███╔╝███████║",
    "╚══════╝╚═╝  ╚═╝╚═╝╚══════╝╚══════╝╚══════╝  ╚══╝╚══╝ ╚══════╝",
];

const TAGLINE: &str = "agent skills for AI";

const PROGRESS_WIDTH: usize = 30;
const PROGRESS_LABELS: [&str; 5] = [
    "reading manifests",
    "resolving skills",
    "copying files",
    "writing to disk",
    "verifying",
];

static CURSOR_HIDDEN: AtomicBool = AtomicBool::new(false);

/// Colors applied to output, or plain text when disabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
    animate: bool,
}

impl Palette {
    pub fn new(color: bool, animate: bool) -> Self {
        Self {
            color,
            animate: color && animate,
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self::new(false, false)
    }

    pub fn animates(&self) -> bool {
        self.animate
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    pub fn gray(&self, text: &str) -> String {
        self.paint(GRAY, text)
    }
}

/// Keep at most `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Left-align `text` in a column `width` characters wide.
pub fn pad_right(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

pub fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Hide the terminal cursor until [`restore_cursor`] runs.
pub fn hide_cursor() {
    if !CURSOR_HIDDEN.swap(true, Ordering::SeqCst) {
        let mut out = io::stdout();
        let _ = out.write_all(HIDE_CURSOR.as_bytes());
        let _ = out.flush();
    }
}

/// Show the cursor again if this process hid it. Safe to call from any exit path.
pub fn restore_cursor() {
    if CURSOR_HIDDEN.swap(false, Ordering::SeqCst) {
        let mut out = io::stdout();
        let _ = out.write_all(SHOW_CURSOR.as_bytes());
        let _ = out.flush();
    }
}

/// Hides the cursor for its lifetime.
pub struct CursorGuard;

impl CursorGuard {
    pub fn hide() -> Self {
        hide_cursor();
        Self
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        restore_cursor();
    }
}

fn colorize_logo_line(palette: &Palette, line: &str) -> String {
    if !palette.color {
        return line.to_string();
    }
    let mut out = String::new();
    for ch in line.chars() {
        match ch {
            '█' => {
                out.push_str(CYAN);
                out.push(ch);
            }
            ' ' => {
                out.push_str(RESET);
                out.push(ch);
            }
            _ => {
                out.push_str(GRAY);
                out.push(ch);
            }
        }
    }
    out.push_str(RESET);
    out
}

/// Print the static banner.
pub fn print_banner<W: Write>(out: &mut W, palette: &Palette) -> io::Result<()> {
    writeln!(out)?;
    for line in LOGO {
        writeln!(out, "  {}", colorize_logo_line(palette, line))?;
    }
    writeln!(out, "\n  {}\n", palette.dim(TAGLINE))
}

/// Render the install progress bar, ending on the installed count.
///
/// Animates frame by frame when the palette allows it, otherwise prints
/// only the final line.
pub fn play_install_progress<W: Write>(
    out: &mut W,
    palette: &Palette,
    installed: usize,
) -> io::Result<()> {
    let summary = format!("{installed} skill{} installed", plural(installed));
    if !palette.animates() {
        return writeln!(out, "  {}", palette.green(&summary));
    }

    let _cursor = CursorGuard::hide();
    for i in 0..=PROGRESS_WIDTH {
        let filled = "━".repeat(i);
        let empty = "╌".repeat(PROGRESS_WIDTH - i);
        let pct = i * 100 / PROGRESS_WIDTH;
        let label_idx = (i * PROGRESS_LABELS.len() / PROGRESS_WIDTH).min(PROGRESS_LABELS.len() - 1);
        write!(
            out,
            "\r\x1b[2K  {}{} {} {}",
            palette.cyan(&filled),
            palette.gray(&empty),
            palette.dim(&format!("{pct:>3}%")),
            palette.dim(PROGRESS_LABELS[label_idx]),
        )?;
        out.flush()?;
        std::thread::sleep(Duration::from_millis(25));
    }

    writeln!(
        out,
        "\r\x1b[2K  {} {}",
        palette.green(&"━".repeat(PROGRESS_WIDTH)),
        palette.bold(&summary)
    )
}
