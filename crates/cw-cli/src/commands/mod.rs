pub mod act;
pub mod advance;
pub mod log;
pub mod roll;
pub mod start;
pub mod status;
pub mod stop;

use std::path::Path;

use cw_encounter::{
    Access, EncounterError, EncounterService, EncounterSession, JsonFileStore, Roster,
    StaticRoster,
};
use cw_mechanics::{CombatantId, CombatantRegistry};
use serde::Serialize;
use uuid::Uuid;

use crate::Role;
use crate::fight_file::FightFile;

/// Everything a command needs: the service, the fight and who is asking.
pub struct Context {
    pub service: EncounterService<JsonFileStore, StaticRoster>,
    pub fight_id: Uuid,
    pub fight_name: String,
    pub access: Access,
    pub json: bool,
}

impl Context {
    /// Load the fight file and open the session store.
    pub fn open(
        file: &Path,
        state: &Path,
        role: Role,
        user: Option<Uuid>,
        json: bool,
    ) -> Result<Self, String> {
        let fight = FightFile::load(file)?;
        let user_id = user.unwrap_or(Uuid::nil());
        let access = match role {
            Role::Gm => Access::gamemaster(user_id),
            Role::Player => Access::player(user_id),
            Role::Admin => Access::admin(user_id),
        };
        tracing::debug!(fight = %fight.fight.id, state = %state.display(), "opening fight");

        Ok(Self {
            service: EncounterService::new(
                JsonFileStore::new(state),
                fight.roster(),
                fight.config(),
            ),
            fight_id: fight.fight.id,
            fight_name: fight.fight.name,
            access,
            json,
        })
    }

    /// The fight's session as currently stored.
    pub fn session(&self) -> Result<EncounterSession, String> {
        self.service
            .session(self.fight_id, &self.access)
            .map_err(describe)
    }

    /// Resolve a combatant name (case-insensitive) to its id.
    pub fn resolve(&self, name: &str) -> Result<CombatantId, String> {
        let roster = self.service.roster();
        let registry: CombatantRegistry = roster
            .fight(self.fight_id)
            .map(|fight| roster.combatants(&fight))
            .unwrap_or_default()
            .into_iter()
            .collect();
        registry
            .find_by_name(name)
            .map(|c| c.id)
            .ok_or_else(|| format!("no combatant named '{name}'"))
    }
}

/// Render an encounter error with its API status code.
pub fn describe(err: EncounterError) -> String {
    format!("{err} ({})", err.status_code())
}

/// Print a payload as pretty JSON.
pub fn print_json(value: &impl Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
