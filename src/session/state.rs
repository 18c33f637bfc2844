//! Canonical session state and payload normalisation
//!
//! The normaliser is a total function: any decoded payload - missing keys,
//! wrong types, garbage - maps to a complete, well-typed SessionState.
//! Coercion is done with exhaustive type-checked branches, never by catching
//! errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Maximum number of strategic assumptions kept
pub const MAX_ASSUMPTIONS: usize = 5;

/// Conversation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Objective,
    Scope,
    Advantage,
    Draft,
    Refine,
}

impl Phase {
    /// All phases in conversation order
    pub const ALL: [Phase; 5] = [Phase::Objective, Phase::Scope, Phase::Advantage, Phase::Draft, Phase::Refine];

    /// Parse a wire value; anything unrecognized is None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "objective" => Some(Phase::Objective),
            "scope" => Some(Phase::Scope),
            "advantage" => Some(Phase::Advantage),
            "draft" => Some(Phase::Draft),
            "refine" => Some(Phase::Refine),
            _ => None,
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Objective => "Objective",
            Phase::Scope => "Scope",
            Phase::Advantage => "Advantage",
            Phase::Draft => "Draft",
            Phase::Refine => "Refine",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::Objective => "objective",
            Phase::Scope => "scope",
            Phase::Advantage => "advantage",
            Phase::Draft => "draft",
            Phase::Refine => "refine",
        };
        write!(f, "{}", s)
    }
}

/// Canonical session state - one per active conversation
///
/// Replaced wholesale whenever a reply carries a valid state payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// What the business is trying to achieve
    pub objective: String,

    /// Who the business is focused on
    pub scope: String,

    /// Why customers choose this business
    pub advantage: String,

    /// Assumptions the strategy rests on (at most MAX_ASSUMPTIONS)
    pub strategic_assumptions: Vec<String>,

    /// Active phase, defaulting to objective
    pub current_phase: Phase,

    /// Advisory: the question the coach plans to ask next
    pub next_question: String,

    /// Draft strategy statement
    pub draft_statement: String,

    /// Refined strategy statement
    pub refined_statement: String,
}

impl SessionState {
    /// Normalise an arbitrary decoded payload into a canonical state
    ///
    /// Never fails: scalars are stringified (null becomes empty), the
    /// assumptions field accepts a list or a single scalar, blank entries are
    /// dropped and the list is truncated, and an invalid phase falls back to
    /// objective. Unknown keys are ignored.
    pub fn from_payload(payload: &Value) -> Self {
        debug!("SessionState::from_payload: called");
        let phase_raw = as_str(payload.get("current_phase"));
        let current_phase = Phase::parse(phase_raw.trim()).unwrap_or_default();

        Self {
            objective: as_str(payload.get("objective")).trim().to_string(),
            scope: as_str(payload.get("scope")).trim().to_string(),
            advantage: as_str(payload.get("advantage")).trim().to_string(),
            strategic_assumptions: as_list_str(payload.get("strategic_assumptions")),
            current_phase,
            next_question: as_str(payload.get("next_question")).trim().to_string(),
            draft_statement: as_str(payload.get("draft_statement")).trim().to_string(),
            refined_statement: as_str(payload.get("refined_statement")).trim().to_string(),
        }
    }

    /// True once either statement field has content
    pub fn has_statement(&self) -> bool {
        !self.draft_statement.is_empty() || !self.refined_statement.is_empty()
    }
}

/// Coerce a scalar JSON value into a string
///
/// Strings pass through; null and missing become empty; numbers and booleans
/// are stringified; containers (which make no sense as scalars here) become
/// empty rather than JSON-dumped.
fn as_str(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => String::new(),
    }
}

/// Coerce a JSON value into a bounded list of trimmed strings
///
/// Accepts a list (each element stringified and trimmed, blanks dropped) or a
/// single scalar (wrapped into a one-element list). Truncates to
/// MAX_ASSUMPTIONS, preserving insertion order.
fn as_list_str(value: Option<&Value>) -> Vec<String> {
    let mut out: Vec<String> = match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| as_str(Some(v)).trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(scalar) => {
            let s = as_str(Some(scalar)).trim().to_string();
            if s.is_empty() { Vec::new() } else { vec![s] }
        }
    };
    out.truncate(MAX_ASSUMPTIONS);
    out
}

/// Snapshot of the finished strategy
///
/// Created the first time normalisation yields a non-empty draft or refined
/// statement and overwritten by later snapshots; cleared only on session
/// reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStrategy {
    pub draft: String,
    pub refined: String,
    pub assumptions: Vec<String>,
}

impl FinalStrategy {
    /// Snapshot from a normalised state, if it carries a statement
    ///
    /// Either statement being non-empty is enough; see DESIGN.md for the
    /// policy choice.
    pub fn from_state(state: &SessionState) -> Option<Self> {
        if !state.has_statement() {
            return None;
        }
        debug!("FinalStrategy::from_state: snapshotting");
        Some(Self {
            draft: state.draft_statement.clone(),
            refined: state.refined_statement.clone(),
            assumptions: state.strategic_assumptions.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_phase_parse() {
        assert_eq!(Phase::parse("objective"), Some(Phase::Objective));
        assert_eq!(Phase::parse("refine"), Some(Phase::Refine));
        assert_eq!(Phase::parse("Objective"), None);
        assert_eq!(Phase::parse("done"), None);
        assert_eq!(Phase::parse(""), None);
    }

    #[test]
    fn test_phase_display_round_trip() {
        for phase in Phase::ALL {
            assert_eq!(Phase::parse(&phase.to_string()), Some(phase));
        }
    }

    #[test]
    fn test_phase_serde_snake_case() {
        let json = serde_json::to_string(&Phase::Advantage).unwrap();
        assert_eq!(json, "\"advantage\"");
    }

    #[test]
    fn test_from_payload_full() {
        let payload = json!({
            "objective": "  Double revenue in 12 months  ",
            "scope": "SMB retailers",
            "advantage": "fastest onboarding",
            "strategic_assumptions": ["churn stays under 5%", "  ", "hiring plan holds"],
            "current_phase": "draft",
            "next_question": "Ready to draft?",
            "draft_statement": "We will...",
            "refined_statement": "",
        });

        let state = SessionState::from_payload(&payload);
        assert_eq!(state.objective, "Double revenue in 12 months");
        assert_eq!(state.scope, "SMB retailers");
        assert_eq!(state.current_phase, Phase::Draft);
        assert_eq!(
            state.strategic_assumptions,
            vec!["churn stays under 5%".to_string(), "hiring plan holds".to_string()]
        );
        assert_eq!(state.draft_statement, "We will...");
        assert!(state.refined_statement.is_empty());
    }

    #[test]
    fn test_from_payload_empty_and_garbage() {
        let state = SessionState::from_payload(&json!({}));
        assert_eq!(state, SessionState::default());
        assert_eq!(state.current_phase, Phase::Objective);

        let state = SessionState::from_payload(&json!({
            "objective": 42,
            "scope": true,
            "advantage": null,
            "strategic_assumptions": {"not": "a list"},
            "current_phase": ["draft"],
            "draft_statement": {"nested": "object"},
        }));
        assert_eq!(state.objective, "42");
        assert_eq!(state.scope, "true");
        assert!(state.advantage.is_empty());
        assert!(state.strategic_assumptions.is_empty());
        assert_eq!(state.current_phase, Phase::Objective);
        assert!(state.draft_statement.is_empty());
    }

    #[test]
    fn test_from_payload_unknown_phase_falls_back() {
        for bad in ["done", "DRAFT", "phase-2", ""] {
            let state = SessionState::from_payload(&json!({ "current_phase": bad }));
            assert_eq!(state.current_phase, Phase::Objective, "phase {:?}", bad);
        }
    }

    #[test]
    fn test_from_payload_assumptions_scalar_wrapped() {
        let state = SessionState::from_payload(&json!({ "strategic_assumptions": "one big bet" }));
        assert_eq!(state.strategic_assumptions, vec!["one big bet".to_string()]);

        let state = SessionState::from_payload(&json!({ "strategic_assumptions": "   " }));
        assert!(state.strategic_assumptions.is_empty());
    }

    #[test]
    fn test_from_payload_assumptions_truncated_in_order() {
        let payload = json!({ "strategic_assumptions": ["a", "b", "c", "d", "e", "f", "g"] });
        let state = SessionState::from_payload(&payload);
        assert_eq!(state.strategic_assumptions.len(), MAX_ASSUMPTIONS);
        assert_eq!(state.strategic_assumptions, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_from_payload_assumptions_mixed_types() {
        let payload = json!({ "strategic_assumptions": ["growth", 7, null, true, ""] });
        let state = SessionState::from_payload(&payload);
        assert_eq!(state.strategic_assumptions, vec!["growth", "7", "true"]);
    }

    #[test]
    fn test_from_payload_ignores_unknown_keys() {
        let payload = json!({ "objective": "x", "confidence": 0.9, "debug_notes": "ignore me" });
        let state = SessionState::from_payload(&payload);
        assert_eq!(state.objective, "x");
    }

    #[test]
    fn test_final_strategy_draft_only() {
        let state = SessionState::from_payload(&json!({ "draft_statement": "D" }));
        let fs = FinalStrategy::from_state(&state).expect("draft alone should snapshot");
        assert_eq!(fs.draft, "D");
        assert_eq!(fs.refined, "");
        assert!(fs.assumptions.is_empty());
    }

    #[test]
    fn test_final_strategy_refined_only() {
        let state = SessionState::from_payload(&json!({ "refined_statement": "R" }));
        let fs = FinalStrategy::from_state(&state).unwrap();
        assert_eq!(fs.refined, "R");
    }

    #[test]
    fn test_final_strategy_none_without_statement() {
        let state = SessionState::from_payload(&json!({ "objective": "x" }));
        assert!(FinalStrategy::from_state(&state).is_none());
    }
}
