//! Prompts and the response schema for the summarization agent.

use serde_json::{json, Value};

use ps_domain::dataset::MatchDataset;

/// `response_format` for the summarization agent: a strict JSON schema
/// with `summary`, 2-4 `recommendations`, and 1-3 `risk_notes`.
pub fn match_summary_response_format() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "match_summary",
            "schema": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "summary": {
                        "type": "string",
                        "description": "Concise narrative (120 words max) capturing what mattered in the match."
                    },
                    "recommendations": {
                        "type": "array",
                        "description": "Actionable coaching or training adjustments (2-4 items).",
                        "minItems": 2,
                        "maxItems": 4,
                        "items": { "type": "string" }
                    },
                    "risk_notes": {
                        "type": "array",
                        "description": "Emerging risks, injuries, or trends to monitor (1-3 items).",
                        "minItems": 1,
                        "maxItems": 3,
                        "items": { "type": "string" }
                    }
                },
                "required": ["summary", "recommendations", "risk_notes"]
            }
        }
    })
}

pub fn build_summarization_system_prompt(program_name: &str, team_id: &str) -> String {
    [
        format!("You are the performance analytics assistant for the {program_name} basketball program."),
        format!("Your job is to translate scouting documents into quick tactical insights for the coaching staff of team {team_id}."),
        "Only respond with JSON that obeys the provided schema.".to_owned(),
        "Be practical and reference recurring trends when relevant.".to_owned(),
    ]
    .join(" ")
}

pub fn build_summarization_user_prompt(program_name: &str, dataset: &MatchDataset) -> String {
    [
        format!(
            "Summarize the match played on {} against {}.",
            dataset.metadata.date, dataset.metadata.opponent
        ),
        "Highlight the decisive sequences, successful adjustments, and metrics that drove the result.".to_owned(),
        "Call out 2-4 targeted recommendations for the next practice or game plan.".to_owned(),
        "Flag any injuries, fatigue indicators, or strategic risks worth monitoring.".to_owned(),
        format!(
            "Consult the {program_name} namespace documents (metadata, player bios, coach strategies, events, metrics)."
        ),
    ]
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_all_three_fields() {
        let format = match_summary_response_format();
        assert_eq!(format["type"], "json_schema");
        let schema = &format["json_schema"]["schema"];
        assert_eq!(
            schema["required"],
            json!(["summary", "recommendations", "risk_notes"])
        );
        assert_eq!(schema["properties"]["recommendations"]["minItems"], 2);
        assert_eq!(schema["properties"]["risk_notes"]["maxItems"], 3);
        assert_eq!(schema["additionalProperties"], false);
    }

    #[test]
    fn system_prompt_names_team_and_demands_json() {
        let prompt = build_summarization_system_prompt("Phoenix Rivals", "phx-varsity");
        assert!(prompt.contains("coaching staff of team phx-varsity"));
        assert!(prompt.contains("Only respond with JSON"));
        assert!(prompt.starts_with("You are the performance analytics assistant for the Phoenix Rivals"));
    }
}
