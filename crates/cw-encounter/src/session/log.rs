//! Combat log storage and export.

use chrono::{DateTime, Utc};
use cw_mechanics::{ActionOutcome, CombatantId, InitiativeResult};
use serde::{Deserialize, Serialize};

/// Something that happened during an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogKind {
    /// The encounter began.
    Started {
        /// Number of combatants seeded.
        combatants: usize,
    },
    /// Initiative was rolled.
    Initiative {
        /// Per-combatant results.
        results: Vec<InitiativeResult>,
    },
    /// A combatant's turn came up.
    Turn {
        /// Who is up.
        actor_id: CombatantId,
        /// Their name.
        actor_name: String,
    },
    /// An action was resolved.
    Action {
        /// The resolution.
        outcome: ActionOutcome,
    },
    /// Nobody had shots left and the session is waiting for initiative.
    RoundOver,
    /// The encounter ended.
    Stopped,
}

/// A timestamped log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Round the entry belongs to.
    pub round: u32,
    /// What happened.
    pub kind: LogKind,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

/// A chronological log of an encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: Vec<LogEntry>,
}

impl CombatLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event for the given round.
    pub fn record(&mut self, round: u32, kind: LogKind) {
        self.entries.push(LogEntry {
            round,
            kind,
            timestamp: Utc::now(),
        });
    }

    /// Get all entries.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent initiative results, if any were rolled.
    pub fn last_initiative(&self) -> Option<&[InitiativeResult]> {
        self.entries.iter().rev().find_map(|e| match &e.kind {
            LogKind::Initiative { results } => Some(results.as_slice()),
            _ => None,
        })
    }

    /// Export the log as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Combat Log\n\n");
        for entry in &self.entries {
            match &entry.kind {
                LogKind::Started { combatants } => {
                    out.push_str(&format!("*Fight started with {combatants} combatants.*\n\n"));
                }
                LogKind::Initiative { results } => {
                    out.push_str(&format!("## Round {}\n\n", entry.round));
                    for r in results {
                        out.push_str(&format!(
                            "- **{}**: rolled {} + Speed {} = shot {}\n",
                            r.name, r.roll, r.speed, r.resulting_shot
                        ));
                    }
                    out.push('\n');
                }
                LogKind::Turn { actor_name, .. } => {
                    out.push_str(&format!("**{actor_name}** is up.\n\n"));
                }
                LogKind::Action { outcome } => {
                    out.push_str(&format!("> {}\n\n", outcome.narrative));
                }
                LogKind::RoundOver => {
                    out.push_str("*Round over.*\n\n");
                }
                LogKind::Stopped => {
                    out.push_str("*Fight stopped.*\n\n");
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initiative(name: &str, shot: i32) -> InitiativeResult {
        InitiativeResult {
            combatant_id: CombatantId::from_u128(1),
            name: name.to_string(),
            roll: 3,
            speed: shot - 3,
            resulting_shot: shot,
        }
    }

    #[test]
    fn record_and_len() {
        let mut log = CombatLog::new();
        assert!(log.is_empty());
        log.record(1, LogKind::Started { combatants: 2 });
        log.record(1, LogKind::Stopped);
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[1].kind, LogKind::Stopped);
    }

    #[test]
    fn last_initiative_is_most_recent() {
        let mut log = CombatLog::new();
        assert!(log.last_initiative().is_none());
        log.record(1, LogKind::Initiative { results: vec![initiative("A", 9)] });
        log.record(2, LogKind::Initiative { results: vec![initiative("A", 11)] });
        assert_eq!(log.last_initiative().unwrap()[0].resulting_shot, 11);
    }

    #[test]
    fn markdown_export() {
        let mut log = CombatLog::new();
        log.record(1, LogKind::Started { combatants: 1 });
        log.record(1, LogKind::Initiative { results: vec![initiative("Jack", 12)] });
        log.record(
            1,
            LogKind::Turn {
                actor_id: CombatantId::from_u128(1),
                actor_name: "Jack".to_string(),
            },
        );
        log.record(1, LogKind::Stopped);
        let md = log.export_markdown();
        assert!(md.starts_with("# Combat Log"));
        assert!(md.contains("## Round 1"));
        assert!(md.contains("**Jack**: rolled 3 + Speed 9 = shot 12"));
        assert!(md.contains("**Jack** is up."));
        assert!(md.contains("*Fight stopped.*"));
    }

    #[test]
    fn serde_tags_entries() {
        let mut log = CombatLog::new();
        log.record(1, LogKind::RoundOver);
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"type\":\"round_over\""));
        let back: CombatLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
