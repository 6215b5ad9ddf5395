//! `phoenix-scout analyze` and `phoenix-scout recent`.

use anyhow::Context;

use ps_domain::summary::{MatchAnalysisPayload, MatchSummaryRow};

use crate::state::AppState;

const PREVIEW_CHARS: usize = 80;

/// Run the workflow (all datasets, or one match) and print what it stored.
pub async fn analyze(state: &AppState, match_id: Option<String>, json: bool) -> anyhow::Result<()> {
    if !json {
        println!(
            "Running {} match analyses via Letta",
            state.config.analysis.program_name
        );
    }

    let results = match match_id {
        Some(id) => {
            let payload = state
                .worker
                .run_one(&id)
                .await
                .with_context(|| format!("analyzing match {id}"))?
                .with_context(|| {
                    format!(
                        "no dataset for match {id} in {}",
                        state.config.dataset.dir.display()
                    )
                })?;
            vec![payload]
        }
        None => {
            let report = state.worker.run_all().await.context("analysis run failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            for failure in &report.failures {
                eprintln!("! {} failed: {}", failure.match_id, failure.error);
            }
            report.results
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("Generated {} summaries:", results.len());
    for payload in &results {
        println!("{}", result_line(payload));
    }

    println!("\nLatest stored summaries:");
    let latest = state
        .store
        .recent(state.config.analysis.query_limit)
        .await
        .context("fetching recent summaries")?;
    for row in &latest {
        println!("{}", row_line(row));
    }
    Ok(())
}

/// Print the newest `limit` stored rows.
pub async fn recent(state: &AppState, limit: usize, json: bool) -> anyhow::Result<()> {
    let rows = state
        .store
        .recent(limit)
        .await
        .context("fetching recent summaries")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No stored summaries.");
    } else {
        for row in &rows {
            println!("{}", row_line(row));
        }
    }
    Ok(())
}

fn result_line(payload: &MatchAnalysisPayload) -> String {
    format!(
        "• {} ({}) - {}",
        payload.match_id,
        payload.match_date,
        preview(&payload.summary, PREVIEW_CHARS)
    )
}

fn row_line(row: &MatchSummaryRow) -> String {
    format!("• {} -> {}", row.match_id, row.summary)
}

/// First `max` characters of `text`, with `…` appended when cut.
fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_on_char_boundaries() {
        assert_eq!(preview("short", 80), "short");
        assert_eq!(preview("abcdef", 3), "abc…");
        assert_eq!(preview("ééééé", 2), "éé…");
        let exact = "x".repeat(80);
        assert_eq!(preview(&exact, 80), exact);
    }
}
