use colored::Colorize;
use cw_mechanics::ActionType;

use super::{Context, describe, print_json};

pub fn run(
    ctx: &mut Context,
    action: &str,
    actor: &str,
    target: Option<&str>,
) -> Result<(), String> {
    let actor_id = ctx.resolve(actor)?;
    let target_id = target.map(|name| ctx.resolve(name)).transpose()?;

    let payload = ctx
        .service
        .action(ctx.fight_id, action, actor_id, target_id, &ctx.access)
        .map_err(describe)?;

    if ctx.json {
        return print_json(&payload);
    }

    let marker = match payload.action_type {
        ActionType::Defend => "DEFEND".cyan().bold(),
        ActionType::Attack if payload.hit => "HIT".red().bold(),
        ActionType::Attack => "MISS".dimmed(),
    };
    println!("  {marker} {}", payload.narrative);
    Ok(())
}
