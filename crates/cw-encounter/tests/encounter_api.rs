//! Integration tests for the encounter service.

use cw_encounter::{
    Access, AdvanceOutcome, EncounterConfig, EncounterError, EncounterService, FightRecord,
    JsonFileStore, MemoryStore, SessionState, StaticRoster,
};
use cw_mechanics::{CharacterType, Combatant, CombatantId, StatBlock};
use tempfile::TempDir;
use uuid::Uuid;

const GM: u128 = 1000;
const PLAYER: u128 = 2000;

fn hero() -> Combatant {
    Combatant::new(
        CombatantId::from_u128(1),
        "Kar Fai",
        CharacterType::Pc,
        StatBlock {
            attack: 15,
            defense: 14,
            damage: 10,
            toughness: 7,
            speed: 8,
        },
    )
    .with_owner(Uuid::from_u128(PLAYER))
}

fn boss() -> Combatant {
    Combatant::new(
        CombatantId::from_u128(2),
        "Gao Zhang",
        CharacterType::Boss,
        StatBlock {
            attack: 16,
            defense: 15,
            damage: 12,
            toughness: 8,
            speed: 7,
        },
    )
}

fn fight_id() -> Uuid {
    Uuid::from_u128(77)
}

fn roster(solo_mode: bool) -> StaticRoster {
    let fight = FightRecord {
        id: fight_id(),
        name: "Temple Rooftop".to_string(),
        solo_mode,
        participant_ids: vec![hero().id, boss().id],
    };
    StaticRoster::new().with_fight(fight, vec![hero(), boss()])
}

fn service(solo_mode: bool) -> EncounterService<MemoryStore, StaticRoster> {
    EncounterService::new(MemoryStore::new(), roster(solo_mode), EncounterConfig::default())
}

fn gm() -> Access {
    Access::gamemaster(Uuid::from_u128(GM))
}

fn player() -> Access {
    Access::player(Uuid::from_u128(PLAYER))
}

#[test]
fn full_request_cycle() {
    let mut svc = service(true);

    let status = svc.start(fight_id(), &gm()).unwrap();
    assert!(status.running);
    assert_eq!(status.round, 1);

    let initiative = svc.roll_initiative(fight_id(), &gm()).unwrap();
    assert_eq!(initiative.len(), 2);
    assert_eq!(initiative[0].name, "Kar Fai");
    assert!(initiative.iter().all(|i| i.shot == i.roll as i32 + i.speed));

    let advanced = svc.advance(fight_id(), &gm()).unwrap();
    let AdvanceOutcome::Actor(actor) = advanced.outcome else {
        panic!("expected an actor, got {:?}", advanced.outcome);
    };
    assert_eq!(advanced.status.current_actor.as_ref().map(|a| a.id), Some(actor));

    let target = if actor == hero().id { boss().id } else { hero().id };
    let action = svc
        .action(fight_id(), "attack", actor, Some(target), &gm())
        .unwrap();
    assert!(!action.narrative.is_empty());
    assert_eq!(action.hit, action.damage.is_some());

    let stopped = svc.stop(fight_id(), &gm()).unwrap();
    assert_eq!(stopped.state, SessionState::Stopped);
    let again = svc.stop(fight_id(), &gm()).unwrap();
    assert_eq!(again.state, SessionState::Stopped);
}

#[test]
fn start_requires_solo_mode() {
    let mut svc = service(false);
    let err = svc.start(fight_id(), &gm()).unwrap_err();
    assert!(matches!(err, EncounterError::NotApplicable(_)));
    assert_eq!(err.status_code(), 422);
}

#[test]
fn unknown_fight_is_not_applicable() {
    let mut svc = service(true);
    assert!(matches!(
        svc.start(Uuid::from_u128(5), &gm()),
        Err(EncounterError::NotApplicable(_))
    ));
}

#[test]
fn advance_before_start_is_not_running() {
    let mut svc = service(true);
    let err = svc.advance(fight_id(), &gm()).unwrap_err();
    assert!(matches!(err, EncounterError::NotRunning));
    assert_eq!(err.status_code(), 409);
}

#[test]
fn status_before_start() {
    let svc = service(true);
    let status = svc.status(fight_id(), &player()).unwrap();
    assert_eq!(status.state, SessionState::NotStarted);
    assert!(!status.running);
    assert!(status.current_actor.is_none());
}

#[test]
fn players_cannot_manage() {
    let mut svc = service(true);
    for result in [
        svc.start(fight_id(), &player()).map(|_| ()),
        svc.advance(fight_id(), &player()).map(|_| ()),
        svc.stop(fight_id(), &player()).map(|_| ()),
    ] {
        assert!(matches!(result, Err(EncounterError::NotAuthorized(_))));
    }
}

#[test]
fn players_act_only_as_own_combatants() {
    let mut svc = service(true);
    svc.start(fight_id(), &gm()).unwrap();

    let defend = svc
        .action(fight_id(), "defend", hero().id, None, &player())
        .unwrap();
    assert!(defend.narrative.contains("Kar Fai"));

    let err = svc
        .action(fight_id(), "attack", boss().id, Some(hero().id), &player())
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
}

#[test]
fn outsiders_see_nothing() {
    let svc = service(true);
    let err = svc.status(fight_id(), &Access::default()).unwrap_err();
    assert!(matches!(err, EncounterError::NotAuthorized(_)));
}

#[test]
fn bad_action_type_rejected() {
    let mut svc = service(true);
    svc.start(fight_id(), &gm()).unwrap();
    let err = svc
        .action(fight_id(), "cartwheel", hero().id, None, &gm())
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn unknown_target_leaves_state_untouched() {
    let mut svc = service(true);
    svc.start(fight_id(), &gm()).unwrap();
    let before = svc.session(fight_id(), &gm()).unwrap();
    let err = svc
        .action(
            fight_id(),
            "attack",
            hero().id,
            Some(CombatantId::from_u128(99)),
            &gm(),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    let after = svc.session(fight_id(), &gm()).unwrap();
    assert_eq!(after.registry(), before.registry());
}

#[test]
fn sessions_persist_across_service_instances() {
    let dir = TempDir::new().unwrap();
    let config = EncounterConfig::default().with_seed(1234);

    let mut first = EncounterService::new(JsonFileStore::new(dir.path()), roster(true), config.clone());
    first.start(fight_id(), &gm()).unwrap();
    let advanced = first.advance(fight_id(), &gm()).unwrap();

    let second = EncounterService::new(JsonFileStore::new(dir.path()), roster(true), config);
    let status = second.status(fight_id(), &gm()).unwrap();
    assert!(status.running);
    assert_eq!(status, advanced.status);
}

#[test]
fn same_seed_same_fight() {
    let run = || {
        let mut svc = EncounterService::new(
            MemoryStore::new(),
            roster(true),
            EncounterConfig::default().with_seed(99),
        );
        svc.start(fight_id(), &gm()).unwrap();
        let mut narratives = Vec::new();
        for _ in 0..4 {
            if let AdvanceOutcome::Actor(actor) = svc.advance(fight_id(), &gm()).unwrap().outcome {
                let target = if actor == hero().id { boss().id } else { hero().id };
                let out = svc
                    .action(fight_id(), "attack", actor, Some(target), &gm())
                    .unwrap();
                narratives.push(out.narrative);
            }
        }
        narratives
    };
    assert_eq!(run(), run());
}

#[test]
fn repeated_start_leaves_dice_stream_alone() {
    let rolls = |starts: usize| {
        let mut svc = EncounterService::new(
            MemoryStore::new(),
            roster(true),
            EncounterConfig::default().with_seed(5),
        );
        for _ in 0..starts {
            svc.start(fight_id(), &gm()).unwrap();
        }
        let session = svc.session(fight_id(), &gm()).unwrap();
        (session, svc.roll_initiative(fight_id(), &gm()).unwrap())
    };
    let (once, once_rolls) = rolls(1);
    let (thrice, thrice_rolls) = rolls(3);
    assert_eq!(once.log().len(), thrice.log().len());
    assert_eq!(once_rolls, thrice_rolls);
}
