use colored::Colorize;
use cw_encounter::InitiativePayload;

use super::{Context, describe, print_json};

pub fn run(ctx: &mut Context) -> Result<(), String> {
    let status = ctx
        .service
        .start(ctx.fight_id, &ctx.access)
        .map_err(describe)?;

    if ctx.json {
        return print_json(&status);
    }

    println!(
        "  {} {} (round {})",
        "Started".green().bold(),
        ctx.fight_name,
        status.round
    );

    let session = ctx.session()?;
    if let Some(results) = session.log().last_initiative() {
        let rows: Vec<InitiativePayload> = results.iter().map(InitiativePayload::from).collect();
        println!("{}", super::roll::initiative_table(&rows));
    }
    Ok(())
}
