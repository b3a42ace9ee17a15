pub mod types;

pub use types::Outcome;

use crate::size::Size;
use colored::{ColoredString, Colorize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write job summary: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Print the outcome to the terminal and, when a path is given, append it to
/// the job summary file.
#[instrument(skip(outcome), fields(pr = %outcome.pull_request, size = %outcome.size))]
pub fn output(outcome: &Outcome, summary_path: Option<&Path>) -> Result<(), ReportError> {
    print_terminal_report(outcome);
    match summary_path {
        None => Ok(()),
        Some(path) => {
            debug!(path = %path.display(), "appending job summary");
            append_summary(outcome, path)
        }
    }
}

/// Print a failure to stdout as a workflow command so the runner annotates it.
pub fn annotate_failure(message: &str) {
    println!("{}", error_command(message));
}

/// PR octo/widgets#42: 120 changed lines → size/L
///   - size/M
///   + size/L
fn print_terminal_report(outcome: &Outcome) {
    println!(
        "PR {}: {} changed lines → {}",
        outcome.pull_request,
        outcome.changed_lines,
        colorize_size(outcome.size)
    );
    for label in outcome.removed_labels() {
        println!("  {} {}", "-".red(), label);
    }
    match outcome.added_label() {
        Some(label) => println!("  {} {}", "+".green(), label),
        None => println!("  Label already up to date."),
    }
}

fn render_markdown(outcome: &Outcome) -> String {
    let mut md = String::new();
    md.push_str(&format!("### Pull request size: {}\n\n", outcome.size));
    md.push_str(&format!(
        "**{}** changed lines in {}\n\n",
        outcome.changed_lines, outcome.pull_request
    ));

    match outcome.added_label() {
        None => md.push_str(&format!("`{}` was already applied.\n", outcome.size.label())),
        Some(label) => {
            for removed in outcome.removed_labels() {
                md.push_str(&format!("- removed `{}`\n", removed));
            }
            md.push_str(&format!("- added `{}`\n", label));
        }
    }
    md.push('\n');
    md
}

fn append_summary(outcome: &Outcome, path: &Path) -> Result<(), ReportError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(render_markdown(outcome).as_bytes())?;
    Ok(())
}

fn error_command(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{escaped}")
}

fn colorize_size(size: Size) -> ColoredString {
    let label = size.label();
    match size {
        Size::XS | Size::S => label.green().bold(),
        Size::M => label.cyan().bold(),
        Size::L => label.yellow().bold(),
        Size::XL | Size::XXL => label.red().bold(),
        Size::Unknown => label.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Reconciliation;
    use crate::pr::PullRequestId;

    fn test_outcome(reconciliation: Reconciliation) -> Outcome {
        Outcome {
            pull_request: PullRequestId {
                owner: "octo".to_string(),
                repo: "widgets".to_string(),
                number: 42,
            },
            changed_lines: 640,
            size: Size::XL,
            reconciliation,
        }
    }

    #[test]
    fn test_markdown_lists_label_changes() {
        let md = render_markdown(&test_outcome(Reconciliation::Relabeled {
            removed: vec!["size/L".to_string()],
            added: "size/XL".to_string(),
        }));
        assert!(md.starts_with("### Pull request size: XL\n"));
        assert!(md.contains("**640** changed lines in octo/widgets#42"));
        assert!(md.contains("- removed `size/L`\n- added `size/XL`\n"));
    }

    #[test]
    fn test_markdown_when_already_labeled() {
        let md = render_markdown(&test_outcome(Reconciliation::AlreadyLabeled));
        assert!(md.contains("`size/XL` was already applied."));
        assert!(!md.contains("removed"));
    }

    #[test]
    fn test_summary_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");
        std::fs::write(&path, "# Earlier step\n").unwrap();

        let outcome = test_outcome(Reconciliation::AlreadyLabeled);
        output(&outcome, Some(&path)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# Earlier step\n### Pull request size: XL"));
    }

    #[test]
    fn test_error_command_escapes_newlines() {
        assert_eq!(
            error_command("100% broken\nsee logs"),
            "::error::100%25 broken%0Asee logs"
        );
    }
}
