use comfy_table::{ContentArrangement, Table};
use cw_encounter::InitiativePayload;

use super::{Context, describe, print_json};

pub fn run(ctx: &mut Context) -> Result<(), String> {
    let results = ctx
        .service
        .roll_initiative(ctx.fight_id, &ctx.access)
        .map_err(describe)?;

    if ctx.json {
        return print_json(&results);
    }

    println!("{}", initiative_table(&results));
    Ok(())
}

/// Initiative results, highest shot first.
pub fn initiative_table(results: &[InitiativePayload]) -> Table {
    let mut sorted: Vec<&InitiativePayload> = results.iter().collect();
    sorted.sort_by(|a, b| b.shot.cmp(&a.shot).then_with(|| b.speed.cmp(&a.speed)));

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Roll", "Speed", "Shot"]);
    for r in sorted {
        table.add_row(vec![
            r.name.clone(),
            r.roll.to_string(),
            r.speed.to_string(),
            r.shot.to_string(),
        ]);
    }
    table
}
