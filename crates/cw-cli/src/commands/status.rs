use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use cw_encounter::StatusPayload;
use cw_mechanics::Combatant;

use super::{Context, print_json};

pub fn run(ctx: &Context) -> Result<(), String> {
    let session = ctx.session()?;
    let status = StatusPayload::from_session(&session);

    if ctx.json {
        return print_json(&status);
    }

    println!(
        "  {} [{}] round {}",
        ctx.fight_name.bold(),
        status.state.to_string().dimmed(),
        status.round
    );
    if let Some(actor) = &status.current_actor {
        println!("  Up: {}", actor.name);
    }

    let registry = session.registry();
    if registry.is_empty() {
        println!("  No combatants in play.");
        return Ok(());
    }

    // Turn order first, then everyone who cannot act this round.
    let order = session.turn_order();
    let mut rows: Vec<&Combatant> = order.iter().filter_map(|id| registry.get(*id)).collect();
    rows.extend(registry.iter().filter(|c| !order.contains(&c.id)));

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Name", "Type", "Shot", "Wounds", "Conditions"]);
    for c in rows {
        let marker = if status.current_actor.as_ref().is_some_and(|a| a.id == c.id) {
            ">"
        } else {
            ""
        };
        let conditions = if c.wounds.conditions.is_empty() {
            "—".to_string()
        } else {
            c.wounds
                .conditions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![
            marker.to_string(),
            c.name.clone(),
            c.character_type.to_string(),
            c.current_shots.to_string(),
            c.wounds.wounds.to_string(),
            conditions,
        ]);
    }

    println!("{table}");
    Ok(())
}
