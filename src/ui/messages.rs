//! Status lines shown by the session shell and the CLI commands.
//! Every helper writes to the given output so the shell can be driven
//! from tests without a terminal.

use ansi_term::{Colour, Style};
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static STYLED: AtomicBool = AtomicBool::new(false);

/// Turn ANSI styling of icons and headers on or off for the process.
/// Off unless the output is a terminal.
pub fn set_styled(on: bool) {
    STYLED.store(on, Ordering::Relaxed);
}

fn styled() -> bool {
    STYLED.load(Ordering::Relaxed)
}

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn line<W: Write + ?Sized, T: fmt::Display>(
    out: &mut W,
    style: Style,
    icon: &str,
    msg: T,
) -> io::Result<()> {
    if styled() {
        writeln!(out, "{} {}", style.paint(icon), msg)
    } else {
        writeln!(out, "{icon} {msg}")
    }
}

pub fn info<W: Write + ?Sized, T: fmt::Display>(out: &mut W, msg: T) -> io::Result<()> {
    line(out, Colour::Blue.bold(), ICON_INFO, msg)
}

pub fn success<W: Write + ?Sized, T: fmt::Display>(out: &mut W, msg: T) -> io::Result<()> {
    line(out, Colour::Green.bold(), ICON_OK, msg)
}

pub fn warning<W: Write + ?Sized, T: fmt::Display>(out: &mut W, msg: T) -> io::Result<()> {
    line(out, Colour::Yellow.bold(), ICON_WARN, msg)
}

pub fn error<W: Write + ?Sized, T: fmt::Display>(out: &mut W, msg: T) -> io::Result<()> {
    line(out, Colour::Red.bold(), ICON_ERR, msg)
}

/// Section header
pub fn header<W: Write + ?Sized, T: fmt::Display>(out: &mut W, msg: T) -> io::Result<()> {
    let text = format!("====================== {msg}");
    if styled() {
        writeln!(out, "{}", Colour::Blue.bold().paint(text))
    } else {
        writeln!(out, "{text}")
    }
}
