//! `nodeforge --version`.

use console::Term;

use crate::descriptor::DESCRIPTOR;
use crate::error::CliResult;

/// Print version, authors and description to stdout.
pub fn execute() -> CliResult<()> {
    let term = Term::stdout();
    for line in render() {
        term.write_line(&line)?;
    }
    Ok(())
}

fn render() -> Vec<String> {
    vec![
        DESCRIPTOR.title(),
        format!("Authors: {}", DESCRIPTOR.authors_line()),
        DESCRIPTOR.description.to_string(),
    ]
}
