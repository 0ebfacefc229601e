use crate::check::check;
use crate::error::Result;
use crate::state::IndexState;
use std::fmt::Write as _;

/// Run the consistency checks on the selected index.
pub async fn handle_check_index(state: &IndexState) -> Result<String> {
    let (path, index) = state.current().await?;
    let findings = check(&index);

    if findings.is_empty() {
        return Ok(format!(
            "No consistency problems found in {} ({} entries).\n",
            path.display(),
            index.len()
        ));
    }

    let mut output = format!(
        "{} consistency problem(s) in {}:\n\n",
        findings.len(),
        path.display()
    );
    for finding in &findings {
        let _ = writeln!(output, "  • {}", finding);
    }
    Ok(output)
}
