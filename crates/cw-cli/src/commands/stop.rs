use colored::Colorize;

use super::{Context, describe, print_json};

pub fn run(ctx: &mut Context) -> Result<(), String> {
    let status = ctx
        .service
        .stop(ctx.fight_id, &ctx.access)
        .map_err(describe)?;

    if ctx.json {
        return print_json(&status);
    }

    println!("  {} {} ({})", "Stopped".yellow().bold(), ctx.fight_name, status.state);
    Ok(())
}
