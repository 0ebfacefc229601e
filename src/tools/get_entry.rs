//! Exact lookup of entries by location or title.

use crate::error::Result;
use crate::state::IndexState;
use crate::tools::format::entry_detail;
use anyhow::bail;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetEntryRequest {
    /// Exact location, e.g. "api/#RadiationDetectorDSP.BiquadFilter"
    #[serde(default)]
    pub location: Option<String>,
    /// Exact title, e.g. "RadiationDetectorDSP.rc_filter". Returns every overload.
    #[serde(default)]
    pub title: Option<String>,
}

/// Look up entries by exact location and/or title. Both given means both must match.
pub async fn handle_get_entry(state: &IndexState, request: GetEntryRequest) -> Result<String> {
    let wanted = match (&request.location, &request.title) {
        (Some(location), Some(title)) => format!("location '{}' and title '{}'", location, title),
        (Some(location), None) => format!("location '{}'", location),
        (None, Some(title)) => format!("title '{}'", title),
        (None, None) => bail!("Provide a location or a title to look up"),
    };

    let (_, index) = state.current().await?;
    let matches: Vec<_> = index
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            request
                .location
                .as_ref()
                .is_none_or(|location| &entry.location == location)
        })
        .filter(|(_, entry)| request.title.as_ref().is_none_or(|title| &entry.title == title))
        .collect();

    if matches.is_empty() {
        bail!("No entry with {}", wanted);
    }

    let details: Vec<_> = matches
        .into_iter()
        .map(|(position, entry)| entry_detail(position, entry))
        .collect();
    Ok(details.join("\n---\n\n"))
}
