use anyhow::Result;
use tokenswap_core::swap::{CombatEvent, SwapMode, SwapReport};

use super::context::AppContext;

pub async fn swap(ctx: &AppContext, mode: SwapMode) -> Result<()> {
    let report = ctx.swap_service().swap_all(mode).await?;
    print_report(&report);
    Ok(())
}

pub async fn combat(ctx: &AppContext, event: CombatEvent) -> Result<()> {
    let report = ctx.swap_service().handle_combat_event(event).await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &SwapReport) {
    println!(
        "Swapped to {} models: {} updated, {} skipped",
        report.mode,
        report.updated.len(),
        report.skipped.len()
    );
    for update in &report.updated {
        println!("  {} -> {}", update.token_name, update.path);
    }
    for skipped in &report.skipped {
        println!("  {} skipped: {}", skipped.actor_id, skipped.reason);
    }
}
