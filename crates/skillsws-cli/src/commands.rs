//! Command implementations: listing, the interactive picker and installs.

use std::fmt;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use skillsws_skills::{InstallPipeline, InstallSink, resolve_selection};
use skillsws_types::{InstallReport, InstallTarget, SelectionSet, SkillDescriptor, TargetOrigin};

use crate::term::{Palette, pad_right, play_install_progress, truncate_chars};

const NAME_WIDTH: usize = 24;
const LIST_DESC_WIDTH: usize = 55;
const PICKER_DESC_WIDTH: usize = 50;

/// `skills-ws list`: name and truncated description per skill.
pub fn print_list<W: Write>(out: &mut W, palette: &Palette, catalog: &[SkillDescriptor]) -> io::Result<()> {
    for skill in catalog {
        writeln!(
            out,
            "  {}{}",
            palette.green(&pad_right(&skill.name, NAME_WIDTH)),
            palette.dim(truncate_chars(&skill.description, LIST_DESC_WIDTH))
        )?;
    }
    writeln!(
        out,
        "\n  {}\n",
        palette.dim(&format!("{} skills | skills-ws install <name>", catalog.len()))
    )
}

/// `skills-ws list --json`: the catalog as a JSON array.
pub fn print_json<W: Write>(out: &mut W, catalog: &[SkillDescriptor]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, catalog).context("Failed to serialize catalog")?;
    writeln!(out)?;
    Ok(())
}

/// Numbered listing shown before the selection prompt.
pub fn print_picker<W: Write>(out: &mut W, palette: &Palette, catalog: &[SkillDescriptor]) -> io::Result<()> {
    for (i, skill) in catalog.iter().enumerate() {
        writeln!(
            out,
            "  {} {}{}",
            palette.gray(&format!("{:>2}", i + 1)),
            palette.green(&pad_right(&skill.name, NAME_WIDTH)),
            palette.dim(truncate_chars(&skill.description, PICKER_DESC_WIDTH))
        )?;
    }
    Ok(())
}

/// Prompt for a selection and read one line of input.
///
/// Blocks until a line arrives. End of input yields an empty answer.
pub fn read_answer<R: BufRead, W: Write>(input: &mut R, out: &mut W, palette: &Palette) -> io::Result<String> {
    writeln!(
        out,
        "\n  {}",
        palette.yellow("Enter numbers or names (comma-separated), or 'all':")
    )?;
    write!(out, "  {}", palette.cyan("> "))?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}

/// Gather a selection interactively: list, prompt, resolve.
pub fn gather_selection<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    palette: &Palette,
    catalog: &[SkillDescriptor],
) -> io::Result<SelectionSet> {
    print_picker(out, palette, catalog)?;
    let answer = read_answer(input, out, palette)?;
    Ok(resolve_selection(&answer, catalog))
}

/// Streams install progress to the terminal.
///
/// The sink callbacks cannot fail, so the first write error is kept and
/// later output is dropped. [`TerminalSink::finish`] hands the error back.
pub struct TerminalSink<'a, W: Write> {
    out: &'a mut W,
    palette: Palette,
    error: Option<io::Error>,
}

impl<'a, W: Write> TerminalSink<'a, W> {
    pub fn new(out: &'a mut W, palette: Palette) -> Self {
        Self {
            out,
            palette,
            error: None,
        }
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(args) {
            tracing::warn!(error = %e, "Failed to write install progress");
            self.error = Some(e);
        }
    }

    /// The first write error, if any.
    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<W: Write> InstallSink for TerminalSink<'_, W> {
    fn target_resolved(&mut self, target: &InstallTarget) {
        let path = self.palette.dim(&target.path().display().to_string());
        let note = match target.origin() {
            TargetOrigin::Created => format!(" {}", self.palette.gray("(created)")),
            TargetOrigin::Existing => String::new(),
        };
        self.emit(format_args!("\n  {path}{note}\n\n"));
    }

    fn skill_skipped(&mut self, name: &str) {
        let tag = self.palette.yellow("skip");
        let why = self.palette.dim("(not found)");
        self.emit(format_args!("  {tag} {name} {why}\n"));
    }

    fn skill_in_place(&mut self, name: &str) {
        let tag = self.palette.gray("=");
        let why = self.palette.dim("(already in place)");
        self.emit(format_args!("  {tag} {name} {why}\n"));
    }
}

/// Run `selection` through the pipeline and print the outcome.
///
/// Skills are installed even when progress output fails; the write error
/// is returned once the batch is done.
pub fn run_install<W: Write>(
    out: &mut W,
    palette: &Palette,
    pipeline: &InstallPipeline,
    selection: &SelectionSet,
) -> Result<InstallReport> {
    if selection.is_empty() {
        writeln!(out, "  {}", palette.dim("Nothing selected."))?;
        return Ok(InstallReport::default());
    }

    let (result, written) = {
        let mut sink = TerminalSink::new(out, *palette);
        let result = pipeline.execute(selection, &mut sink);
        (result, sink.finish())
    };
    let report = result?;
    written.context("Failed to write install progress")?;

    print_report(out, palette, &report)?;
    Ok(report)
}

fn print_report<W: Write>(out: &mut W, palette: &Palette, report: &InstallReport) -> io::Result<()> {
    play_install_progress(out, palette, report.installed_count())?;
    writeln!(out)?;
    for name in &report.installed {
        writeln!(out, "  {} {name}", palette.green("+"))?;
    }
    writeln!(out, "\n  {}\n", palette.dim("skills.ws"))
}
