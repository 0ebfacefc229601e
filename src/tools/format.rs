//! Text rendering shared by the tool handlers.

use crate::entry::DocEntry;
use crate::envelope::Envelope;
use crate::index::SearchIndex;
use std::fmt::Write as _;
use std::path::Path;

/// Longest headline shown in one-line entry listings.
const HEADLINE_CHARS: usize = 80;

/// Truncates to at most `max` characters, appending an ellipsis when cut.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

fn envelope_label(envelope: &Envelope) -> String {
    match envelope {
        Envelope::Json => "JSON document".to_string(),
        Envelope::Script(variable) => format!("script assignment (var {})", variable),
    }
}

/// Summary block: source, shape, counts per category and per page.
pub(crate) fn format_summary(path: &Path, index: &SearchIndex) -> String {
    let summary = index.summary();
    let mut output = String::new();

    let _ = writeln!(output, "Search index: {}", path.display());
    let _ = writeln!(output, "Format: {}", envelope_label(index.envelope()));
    let _ = writeln!(output, "Entries: {}", summary.entries);

    if !summary.by_category.is_empty() {
        output.push_str("\nBy category:\n");
        for (category, count) in &summary.by_category {
            let label = if category.is_empty() { "(empty)" } else { category };
            let _ = writeln!(output, "  • {}: {}", label, count);
        }
    }

    if !summary.pages.is_empty() {
        let _ = writeln!(output, "\nPages ({}):", summary.pages.len());
        for (page, count) in &summary.pages {
            let _ = writeln!(output, "  • {} ({} entries)", page, count);
        }
    }

    output
}

/// One line per entry: position, category, title, location and headline.
pub(crate) fn entry_line(position: usize, entry: &DocEntry) -> String {
    let mut line = format!(
        "{:>4}. [{}] {} -> {}",
        position,
        entry.category,
        entry.title,
        display_location(&entry.location)
    );
    if let Some(headline) = entry.headline() {
        let _ = write!(line, "\n        {}", truncate(headline, HEADLINE_CHARS));
    }
    line
}

/// Full entry with its complete text.
pub(crate) fn entry_detail(position: usize, entry: &DocEntry) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "#{} {}", position, entry.title);
    let _ = writeln!(output, "Location: {}", display_location(&entry.location));
    let _ = writeln!(output, "Page: {}", entry.page);
    let _ = writeln!(output, "Category: {}", entry.category);

    let text = entry.text.trim_end();
    if text.is_empty() {
        output.push_str("\n(no text)\n");
    } else {
        let _ = writeln!(output, "\n{}", text);
    }
    output
}

/// The site root has an empty location; show it as `/`.
fn display_location(location: &str) -> &str {
    if location.is_empty() { "/" } else { location }
}
