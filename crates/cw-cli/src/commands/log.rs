use cw_encounter::LogKind;

use super::{Context, print_json};

pub fn run(ctx: &Context, markdown: bool) -> Result<(), String> {
    let session = ctx.session()?;
    let log = session.log();

    if markdown {
        print!("{}", log.export_markdown());
        return Ok(());
    }
    if ctx.json {
        return print_json(&log.entries());
    }
    if log.is_empty() {
        println!("  No events recorded.");
        return Ok(());
    }

    for entry in log.entries() {
        let line = match &entry.kind {
            LogKind::Started { combatants } => format!("started with {combatants} combatants"),
            LogKind::Initiative { results } => {
                let shots: Vec<String> = results
                    .iter()
                    .map(|r| format!("{} {}", r.name, r.resulting_shot))
                    .collect();
                format!("initiative: {}", shots.join(", "))
            }
            LogKind::Turn { actor_name, .. } => format!("{actor_name} is up"),
            LogKind::Action { outcome } => outcome.narrative.clone(),
            LogKind::RoundOver => "round over".to_string(),
            LogKind::Stopped => "stopped".to_string(),
        };
        println!(
            "  [{}] round {}: {line}",
            entry.timestamp.format("%H:%M:%S"),
            entry.round
        );
    }
    Ok(())
}
