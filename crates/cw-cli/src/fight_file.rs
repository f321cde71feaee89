//! The TOML fight file the CLI runs encounters from.
//!
//! ```toml
//! [fight]
//! id = "6f1c…"
//! name = "Temple Rooftop"
//! solo_mode = true
//!
//! [encounter]
//! seed = 7
//! round_end = "await_initiative"
//!
//! [ruleset]
//! initiative_mode = "accumulate"
//!
//! [[combatants]]
//! name = "Kar Fai"
//! type = "PC"
//! attack = 15
//! defense = 14
//! damage = 10
//! toughness = 7
//! speed = 8
//! ```

use std::collections::HashSet;
use std::path::Path;

use cw_encounter::{EncounterConfig, FightRecord, RoundEnd, StaticRoster};
use cw_mechanics::{CharacterType, Combatant, CombatantId, CombatantKind, Ruleset, StatBlock};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct FightFile {
    pub fight: FightSection,
    #[serde(default)]
    pub encounter: EncounterSection,
    #[serde(default)]
    pub ruleset: Ruleset,
    #[serde(default)]
    pub combatants: Vec<CombatantEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FightSection {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_solo_mode")]
    pub solo_mode: bool,
}

fn default_solo_mode() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct EncounterSection {
    pub seed: Option<u64>,
    pub round_end: Option<RoundEnd>,
}

#[derive(Debug, Deserialize)]
pub struct CombatantEntry {
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub character_type: CharacterType,
    #[serde(default)]
    pub kind: CombatantKind,
    pub owner: Option<Uuid>,
    #[serde(flatten)]
    pub stats: StatBlock,
}

impl FightFile {
    /// Read and validate a fight file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        Self::parse(&content).map_err(|e| format!("{}: {e}", path.display()))
    }

    /// Parse and validate fight file contents.
    pub fn parse(content: &str) -> Result<Self, String> {
        let file: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        file.ruleset.validate().map_err(|e| e.to_string())?;

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for entry in &file.combatants {
            if !names.insert(entry.name.to_lowercase()) {
                return Err(format!("duplicate combatant name '{}'", entry.name));
            }
            if let Some(id) = entry.id.filter(|id| !ids.insert(*id)) {
                return Err(format!("duplicate combatant id {id} on '{}'", entry.name));
            }
        }
        Ok(file)
    }

    /// Final ids in entry order. Entries without an id are numbered from 1
    /// in file order, skipping any number already taken by an explicit id,
    /// so ids stay stable between runs and never collide.
    pub fn combatant_ids(&self) -> Vec<CombatantId> {
        let explicit: HashSet<Uuid> = self.combatants.iter().filter_map(|e| e.id).collect();
        let mut next: u128 = 1;
        self.combatants
            .iter()
            .map(|entry| match entry.id {
                Some(id) => CombatantId(id),
                None => {
                    while explicit.contains(&Uuid::from_u128(next)) {
                        next += 1;
                    }
                    let id = CombatantId::from_u128(next);
                    next += 1;
                    id
                }
            })
            .collect()
    }

    /// Combatants with ids filled in by [`FightFile::combatant_ids`].
    pub fn combatants(&self) -> Vec<Combatant> {
        self.combatants
            .iter()
            .zip(self.combatant_ids())
            .map(|(entry, id)| {
                let combatant =
                    Combatant::new(id, entry.name.clone(), entry.character_type, entry.stats)
                        .with_kind(entry.kind);
                match entry.owner {
                    Some(owner) => combatant.with_owner(owner),
                    None => combatant,
                }
            })
            .collect()
    }

    /// The fight record described by the file.
    pub fn fight_record(&self) -> FightRecord {
        FightRecord {
            id: self.fight.id,
            name: self.fight.name.clone(),
            solo_mode: self.fight.solo_mode,
            participant_ids: self.combatants().iter().map(|c| c.id).collect(),
        }
    }

    /// Session configuration for new sessions.
    pub fn config(&self) -> EncounterConfig {
        let mut config = EncounterConfig::default().with_ruleset(self.ruleset.clone());
        if let Some(seed) = self.encounter.seed {
            config = config.with_seed(seed);
        }
        if let Some(round_end) = self.encounter.round_end {
            config = config.with_round_end(round_end);
        }
        config
    }

    /// A roster holding this file's fight.
    pub fn roster(&self) -> StaticRoster {
        StaticRoster::new().with_fight(self.fight_record(), self.combatants())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_encounter::Roster;

    const SAMPLE: &str = r#"
[fight]
id = "00000000-0000-0000-0000-000000000063"
name = "Docks"

[encounter]
seed = 5
round_end = "stop"

[ruleset]
action_cost = 2

[[combatants]]
name = "Jack"
type = "PC"
attack = 14
speed = 7

[[combatants]]
name = "Goon"
type = "mook"
kind = "vehicle"
defense = 11
"#;

    #[test]
    fn parse_sample() {
        let file = FightFile::parse(SAMPLE).unwrap();
        assert!(file.fight.solo_mode);
        let combatants = file.combatants();
        assert_eq!(combatants.len(), 2);
        assert_eq!(combatants[0].id, CombatantId::from_u128(1));
        assert_eq!(combatants[0].stats.attack, 14);
        assert_eq!(combatants[0].stats.speed, 7);
        assert_eq!(combatants[1].character_type, CharacterType::Mook);
        assert_eq!(combatants[1].kind, CombatantKind::Vehicle);
        assert_eq!(combatants[1].stats.defense, 11);

        let config = file.config();
        assert_eq!(config.seed, 5);
        assert_eq!(config.round_end, RoundEnd::Stop);
        assert_eq!(config.ruleset.action_cost, 2);

        assert_eq!(file.fight_record().participant_ids.len(), 2);
    }

    #[test]
    fn rejects_duplicate_names() {
        let dup = format!("{SAMPLE}\n[[combatants]]\nname = \"jack\"\n");
        assert!(FightFile::parse(&dup).unwrap_err().contains("duplicate"));
    }

    #[test]
    fn generated_ids_skip_explicit_ones() {
        let file = FightFile::parse(
            r#"
[fight]
id = "00000000-0000-0000-0000-000000000063"
name = "Docks"

[[combatants]]
name = "Jack"

[[combatants]]
name = "Goon"
id = "00000000-0000-0000-0000-000000000001"

[[combatants]]
name = "Boss Lo"
"#,
        )
        .unwrap();
        let ids = file.combatant_ids();
        assert_eq!(
            ids,
            vec![
                CombatantId::from_u128(2),
                CombatantId::from_u128(1),
                CombatantId::from_u128(3),
            ]
        );

        let roster = file.roster();
        let fight = roster.fight(file.fight.id).unwrap();
        let names: Vec<String> = roster
            .combatants(&fight)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Jack", "Goon", "Boss Lo"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let dup = format!(
            "{SAMPLE}\n[[combatants]]\nname = \"Twin A\"\nid = \"00000000-0000-0000-0000-0000000000a1\"\n\
             \n[[combatants]]\nname = \"Twin B\"\nid = \"00000000-0000-0000-0000-0000000000a1\"\n"
        );
        assert!(FightFile::parse(&dup).unwrap_err().contains("duplicate combatant id"));
    }

    #[test]
    fn rejects_bad_ruleset() {
        let bad = SAMPLE.replace("action_cost = 2", "action_cost = -1");
        assert!(FightFile::parse(&bad).is_err());
    }
}
