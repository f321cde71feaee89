use colored::Colorize;
use cw_encounter::AdvanceOutcome;

use super::{Context, describe, print_json};

pub fn run(ctx: &mut Context) -> Result<(), String> {
    let advanced = ctx
        .service
        .advance(ctx.fight_id, &ctx.access)
        .map_err(describe)?;

    if ctx.json {
        return print_json(&advanced);
    }

    let round = advanced.status.round;
    match advanced.outcome {
        AdvanceOutcome::Actor(id) => {
            let name = advanced
                .status
                .current_actor
                .map(|a| a.name)
                .unwrap_or_else(|| id.to_string());
            println!("  Round {round}: {name} is up.");
        }
        AdvanceOutcome::RoundOver => {
            println!(
                "  Round {round} is over. Run {} for the next round.",
                "cw roll".bold()
            );
        }
        AdvanceOutcome::Stopped => {
            println!("  {} Nobody is left standing to act.", "Fight over.".bold());
        }
    }
    Ok(())
}
