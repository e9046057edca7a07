//! Battle Status Example
//!
//! Connects to the emulator and prints what the agent can see: battle
//! status, own party and the opponent's HUD view.

use anyhow::Result;
use kanto_client::BattleAgent;

#[tokio::main]
async fn main() -> Result<()> {
    let agent = BattleAgent::connect_default().await?;

    let status = agent.get_battle_status().await;
    println!("=== Battle ===");
    println!("Active: {} ({})", status.active, status.kind);
    println!("Can flee: {}", status.can_flee);
    println!(
        "Opponents: {} alive of {}",
        status.opponent_alive_count, status.opponent_party_count
    );

    println!("\n=== Party ===");
    let party = agent.get_party().await?;
    for entry in &party.entries {
        let record = &entry.record;
        let marker = if entry.slot == party.active_slot { "*" } else { " " };
        println!(
            "{}{} {:<12} Lv.{:<3} {:>3}/{:<3} {}",
            marker,
            entry.slot,
            record.species_name,
            record.level,
            record.current_hp,
            record.max_hp,
            record.status
        );
        for slot in &record.moves {
            println!("      {} ({} PP)", slot.name, slot.pp);
        }
    }

    if status.active {
        println!("\n=== Opponent ===");
        let view = agent.get_opponent_view().await?;
        println!(
            "{} Lv.{} {}% ({}) {}",
            view.species_name,
            view.level,
            view.hp_percentage,
            view.hp_bar_color.as_str(),
            view.status
        );
    }

    Ok(())
}
