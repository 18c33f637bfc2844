//! Phase tracker derivation
//!
//! A pure, stateless projection of the canonical state into per-phase
//! completion flags. Recomputed on every render - nothing here is cached, so
//! the tracker can never drift from SessionState.

use super::state::{Phase, SessionState};

/// One step of the five-phase tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseStep {
    pub phase: Phase,
    pub label: &'static str,
    /// Completed: the backing text field is non-empty
    pub done: bool,
    /// Active phase for highlighting
    pub current: bool,
}

/// Derive the tracker steps from the current state
///
/// Objective/scope/advantage are done iff their text field is non-empty after
/// trimming. Draft and refine are never reported done here - their completion
/// is only observable through the FinalStrategy snapshot.
pub fn phase_tracker(state: &SessionState) -> Vec<PhaseStep> {
    Phase::ALL
        .iter()
        .map(|&phase| {
            let done = match phase {
                Phase::Objective => !state.objective.trim().is_empty(),
                Phase::Scope => !state.scope.trim().is_empty(),
                Phase::Advantage => !state.advantage.trim().is_empty(),
                Phase::Draft | Phase::Refine => false,
            };
            PhaseStep {
                phase,
                label: phase.label(),
                done,
                current: phase == state.current_phase,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tracker_fresh_state() {
        let state = SessionState::default();
        let steps = phase_tracker(&state);

        assert_eq!(steps.len(), 5);
        assert!(steps.iter().all(|s| !s.done));
        assert!(steps[0].current, "objective should be active by default");
        assert!(steps[1..].iter().all(|s| !s.current));
    }

    #[test]
    fn test_tracker_done_flags_follow_fields() {
        let state = SessionState::from_payload(&json!({
            "objective": "grow",
            "scope": "   ",
            "advantage": "speed",
            "current_phase": "advantage",
        }));
        let steps = phase_tracker(&state);

        assert!(steps[0].done);
        assert!(!steps[1].done, "whitespace-only scope is not done");
        assert!(steps[2].done);
        assert!(steps[2].current);
    }

    #[test]
    fn test_draft_and_refine_never_done() {
        let state = SessionState::from_payload(&json!({
            "draft_statement": "We will win by...",
            "refined_statement": "We will win by being focused.",
            "current_phase": "refine",
        }));
        let steps = phase_tracker(&state);

        assert!(!steps[3].done);
        assert!(!steps[4].done);
        assert!(steps[4].current);
    }

    #[test]
    fn test_tracker_idempotent() {
        let state = SessionState::from_payload(&json!({
            "objective": "grow",
            "current_phase": "scope",
        }));

        let first = phase_tracker(&state);
        let second = phase_tracker(&state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_exactly_one_current() {
        for phase in Phase::ALL {
            let state = SessionState {
                current_phase: phase,
                ..Default::default()
            };
            let steps = phase_tracker(&state);
            assert_eq!(steps.iter().filter(|s| s.current).count(), 1);
        }
    }
}
