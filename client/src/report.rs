//! JSON rendering of turn results for tool surfaces

use serde_json::{Value, json};

use crate::error::TurnFailure;
use crate::executor::TurnReport;

impl TurnReport {
    pub fn to_json(&self) -> Value {
        json!({
            "success": true,
            "action": self.action,
            "turn_number": self.turn_number,
            "outcome": self.outcome,
            "pre_state": self.pre_state,
            "post_state": self.post_state,
        })
    }
}

impl TurnFailure {
    /// `pre_state` is present only when it was captured before failing
    pub fn to_json(&self) -> Value {
        let mut value = json!({
            "success": false,
            "error": self.error.to_string(),
            "kind": self.kind().as_str(),
        });
        if let Some(pre_state) = &self.pre_state {
            value["pre_state"] = json!(pre_state);
        }
        value
    }
}

/// Render either side of a turn result
pub fn turn_result_json(result: &Result<TurnReport, TurnFailure>) -> Value {
    match result {
        Ok(report) => report.to_json(),
        Err(failure) => failure.to_json(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use kanto_battle::{TurnOutcome, TurnSnapshot};
    use kanto_structure::{RawStructureBuilder, decode};

    use super::*;
    use crate::error::TurnError;
    use crate::executor::TurnAction;

    fn snapshot(player_hp: u16, opponent_hp: u16) -> TurnSnapshot {
        let player = decode(&RawStructureBuilder::new(1, 2).species(4).hp(player_hp, 39).build()).unwrap();
        let opponent =
            decode(&RawStructureBuilder::new(3, 4).species(19).hp(opponent_hp, 120).build()).unwrap();
        TurnSnapshot::capture(1, &player, &opponent)
    }

    #[test]
    fn test_success_json() {
        let pre = snapshot(39, 120);
        let post = snapshot(33, 40);
        let report = TurnReport {
            action: TurnAction::Attack { move_index: 2 },
            outcome: TurnOutcome::between(&pre, &post),
            turn_number: 3,
            pre_state: pre,
            post_state: post,
        };

        let json = turn_result_json(&Ok(report));
        assert_eq!(json["success"], true);
        assert_eq!(json["turn_number"], 3);
        assert_eq!(json["action"]["type"], "attack");
        assert_eq!(json["action"]["move_index"], 2);
        assert_eq!(json["outcome"]["damage_dealt"], 80);
        assert_eq!(json["outcome"]["damage_received"], 6);
        assert_eq!(json["outcome"]["opponent_fainted"], false);
        assert_eq!(json["post_state"]["opponent_hp"], 40);
    }

    #[test]
    fn test_failure_json() {
        let failure = TurnFailure::new(
            TurnError::Validation {
                what: "move index",
                value: 5,
                min: 1,
                max: 4,
            },
            None,
        );
        let json = turn_result_json(&Err(failure));
        assert_eq!(json["success"], false);
        assert_eq!(json["kind"], "validation");
        assert_eq!(json["error"], "invalid move index 5 (must be 1-4)");
        assert!(json.get("pre_state").is_none());
    }

    #[test]
    fn test_timeout_json_carries_pre_state() {
        let failure = TurnFailure::new(
            TurnError::ResolutionTimeout(Duration::from_secs(15)),
            Some(snapshot(39, 120)),
        );
        let json = failure.to_json();
        assert_eq!(json["kind"], "timeout");
        assert_eq!(json["pre_state"]["opponent_hp"], 120);
        assert_eq!(json["pre_state"]["player_status"], "healthy");
    }
}
