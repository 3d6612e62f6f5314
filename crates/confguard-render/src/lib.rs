//! Text rendering of policy test results.
//!
//! Failures render red, warnings yellow, and engine errors magenta so a rule
//! that failed to evaluate never masquerades as an ordinary finding. Colors
//! sit behind a flag; with color disabled the text is byte-for-byte stable.

use confguard_types::{Violation, ViolationKind};
use std::io::{self, Write};

const RED: &str = "\u{1b}[31m";
const YELLOW: &str = "\u{1b}[33m";
const MAGENTA: &str = "\u{1b}[35m";
const RESET: &str = "\u{1b}[0m";

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub color: bool,
}

/// Print the file-name header shown before a source's results.
pub fn write_source_header(out: &mut dyn Write, source: &str) -> io::Result<()> {
    writeln!(out, "{source}")
}

pub fn write_failures(
    out: &mut dyn Write,
    violations: &[Violation],
    opts: RenderOptions,
) -> io::Result<()> {
    write_violations(out, violations, RED, opts)
}

pub fn write_warnings(
    out: &mut dyn Write,
    violations: &[Violation],
    opts: RenderOptions,
) -> io::Result<()> {
    write_violations(out, violations, YELLOW, opts)
}

fn write_violations(
    out: &mut dyn Write,
    violations: &[Violation],
    base_color: &str,
    opts: RenderOptions,
) -> io::Result<()> {
    for violation in violations {
        if opts.color {
            let color = match violation.kind {
                ViolationKind::RuleReported => base_color,
                ViolationKind::EngineError => MAGENTA,
            };
            writeln!(out, "  {color}{}{RESET}", violation.message)?;
        } else {
            writeln!(out, "  {}", violation.message)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(violations: &[Violation], color: bool) -> String {
        let mut out = Vec::new();
        write_failures(&mut out, violations, RenderOptions { color }).expect("render");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn plain_output_is_indented_messages() {
        let violations = vec![
            Violation::reported("data.main.deny", "first"),
            Violation::reported("data.main.deny_other", "second"),
        ];
        assert_eq!(rendered(&violations, false), "  first\n  second\n");
    }

    #[test]
    fn colored_failures_are_red() {
        let violations = vec![Violation::reported("data.main.deny", "bad")];
        assert_eq!(rendered(&violations, true), "  \u{1b}[31mbad\u{1b}[0m\n");
    }

    #[test]
    fn engine_errors_render_distinctly() {
        let violations = vec![
            Violation::reported("data.main.deny", "bad"),
            Violation::engine_error("data.main.deny_broken", "error evaluating"),
        ];
        let output = rendered(&violations, true);
        assert!(output.contains("\u{1b}[31mbad"));
        assert!(output.contains("\u{1b}[35merror evaluating"));
    }

    #[test]
    fn warnings_are_yellow() {
        let violations = vec![Violation::reported("data.main.warn", "careful")];
        let mut out = Vec::new();
        write_warnings(&mut out, &violations, RenderOptions { color: true }).expect("render");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  \u{1b}[33mcareful\u{1b}[0m\n"
        );
    }

    #[test]
    fn header_is_the_bare_source_name() {
        let mut out = Vec::new();
        write_source_header(&mut out, "deployment.yaml").expect("render");
        assert_eq!(String::from_utf8(out).unwrap(), "deployment.yaml\n");
    }
}
