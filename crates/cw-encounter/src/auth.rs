//! Role checks for encounter operations.
//!
//! Gamemasters and admins may do anything. Members may look at the fight
//! and act with combatants they own.

use cw_mechanics::Combatant;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EncounterError, EncounterResult};

/// What the calling user is allowed to do in a fight's campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Access {
    /// The calling user.
    pub user_id: Option<Uuid>,
    /// Whether the user belongs to the campaign.
    pub is_member: bool,
    /// Whether the user runs the campaign.
    pub is_gamemaster: bool,
    /// Whether the user is a site admin.
    pub is_admin: bool,
}

impl Access {
    /// Access for the campaign's gamemaster.
    pub fn gamemaster(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            is_member: true,
            is_gamemaster: true,
            is_admin: false,
        }
    }

    /// Access for a player in the campaign.
    pub fn player(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            is_member: true,
            is_gamemaster: false,
            is_admin: false,
        }
    }

    /// Access for a site admin.
    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            is_member: false,
            is_gamemaster: false,
            is_admin: true,
        }
    }

    /// Whether the user may change the encounter's flow.
    pub fn can_manage(&self) -> bool {
        self.is_gamemaster || self.is_admin
    }

    /// Whether the user may see the encounter.
    pub fn can_view(&self) -> bool {
        self.is_member || self.can_manage()
    }

    /// Whether the user may take an action as this combatant.
    pub fn can_act_as(&self, combatant: &Combatant) -> bool {
        if self.can_manage() {
            return true;
        }
        self.is_member && self.user_id.is_some() && combatant.owner_id == self.user_id
    }

    /// Fail with `NotAuthorized` unless the user may view.
    pub fn require_view(&self) -> EncounterResult<()> {
        if self.can_view() {
            Ok(())
        } else {
            Err(refuse("campaign membership required".to_string()))
        }
    }

    /// Fail with `NotAuthorized` unless the user may manage.
    pub fn require_manage(&self) -> EncounterResult<()> {
        if self.can_manage() {
            Ok(())
        } else {
            Err(refuse("gamemaster or admin required".to_string()))
        }
    }

    /// Fail with `NotAuthorized` unless the user may act as the combatant.
    pub fn require_act_as(&self, combatant: &Combatant) -> EncounterResult<()> {
        if self.can_act_as(combatant) {
            Ok(())
        } else {
            Err(refuse(format!("cannot act as {}", combatant.name)))
        }
    }
}

fn refuse(reason: String) -> EncounterError {
    tracing::warn!(%reason, "request refused");
    EncounterError::NotAuthorized(reason)
}
