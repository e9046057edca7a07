//! Auto Battle Example
//!
//! Waits for a battle, then attacks with the first move every turn. When
//! the active creature faints, the first healthy party member is sent in.
//! Each turn result is printed as JSON.

use anyhow::Result;
use kanto_client::{BattleAgent, Transition, turn_result_json};

#[tokio::main]
async fn main() -> Result<()> {
    let mut agent = BattleAgent::connect_default().await?;

    loop {
        println!("Waiting for a battle...");
        if !agent.wait_for_battle_start(None).await {
            continue;
        }

        if let Some(Transition::Started) = agent.detect_transition().await {
            let status = agent.get_battle_status().await;
            println!("Battle started ({})", status.kind);
        }

        while agent.get_battle_status().await.active {
            let active = agent.get_active_combatant().await;

            let result = if active.is_ok() {
                agent.execute_attack(1).await
            } else {
                let party = agent.get_party().await?;
                let Some(slot) = party.switch_candidates().next().map(|e| e.slot) else {
                    println!("No one left to send in");
                    break;
                };
                agent.execute_switch(slot).await
            };

            println!("{}", serde_json::to_string_pretty(&turn_result_json(&result))?);
        }

        agent.detect_transition().await;
        println!("Battle over");
    }
}
