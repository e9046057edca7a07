//! Drives menu cursors with button presses

use std::time::Duration;

use kanto_battle::{
    BattleMenuOption, Button, GridPosition, ListPosition, Menu, plan_grid, plan_list,
};
use tokio::time::sleep;

use crate::address::{Address, AddressMap};
use crate::bus::MemoryBus;
use crate::config::Timings;
use crate::error::{TransportError, TurnError};

/// Full navigate-and-verify cycles tried on the party list
pub const LIST_ATTEMPTS: u32 = 3;

/// Moves the battle, move and party menu cursors
pub struct Navigator<'a, B: ?Sized> {
    bus: &'a B,
    map: &'a AddressMap,
    timings: &'a Timings,
}

impl<'a, B: MemoryBus + ?Sized> Navigator<'a, B> {
    pub fn new(bus: &'a B, map: &'a AddressMap, timings: &'a Timings) -> Self {
        Self { bus, map, timings }
    }

    fn cursor_address(&self, menu: Menu) -> Address {
        let battle = &self.map.battle;
        match menu {
            Menu::Battle => battle.battle_menu_cursor,
            Menu::Move => battle.move_menu_cursor,
            Menu::Party => battle.party_menu_cursor,
        }
    }

    async fn read_cursor(&self, menu: Menu) -> Option<u8> {
        let address = self.cursor_address(menu);
        match self.bus.read_u8(address.get()).await {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::warn!(menu = %menu, %address, error = %e, "Failed to read cursor, assuming default");
                None
            }
        }
    }

    /// Cursor of a 2×2 grid menu, position 1 if unreadable
    pub async fn grid_position(&self, menu: Menu) -> GridPosition {
        self.read_cursor(menu)
            .await
            .map(GridPosition::from_raw)
            .unwrap_or_default()
    }

    /// Party menu cursor, row 0 if unreadable
    pub async fn list_position(&self) -> ListPosition {
        self.read_cursor(Menu::Party)
            .await
            .map(ListPosition::from_raw)
            .unwrap_or_default()
    }

    /// Press once, then wait `settle`
    pub async fn press_and_wait(&self, button: Button, settle: Duration) -> Result<(), TransportError> {
        tracing::debug!(button = %button, "Pressing");
        self.bus.press(button).await?;
        sleep(settle).await;
        Ok(())
    }

    pub async fn press(&self, button: Button) -> Result<(), TransportError> {
        self.press_and_wait(button, self.timings.press_settle).await
    }

    pub async fn press_sequence(&self, buttons: &[Button]) -> Result<(), TransportError> {
        for &button in buttons {
            self.press(button).await?;
        }
        Ok(())
    }

    /// Move a grid cursor to `target`. Grid moves are not re-verified.
    pub async fn navigate_grid(&self, menu: Menu, target: GridPosition) -> Result<(), TransportError> {
        let current = self.grid_position(menu).await;
        let presses = plan_grid(current, target);
        tracing::debug!(
            menu = %menu,
            from = current.get(),
            to = target.get(),
            presses = presses.len(),
            "Navigating grid"
        );
        self.press_sequence(&presses).await
    }

    /// Highlight and confirm a top-level battle menu entry
    pub async fn select_battle_option(&self, option: BattleMenuOption) -> Result<(), TransportError> {
        self.navigate_grid(Menu::Battle, option.position()).await?;
        self.press_and_wait(Button::A, self.timings.menu_open_wait(option))
            .await
    }

    /// Move the party cursor to `target`, re-reading it after each pass.
    ///
    /// Gives up after [`LIST_ATTEMPTS`] passes that did not land on the
    /// target.
    pub async fn navigate_party(&self, target: ListPosition) -> Result<(), TurnError> {
        let mut observed = self.list_position().await;

        for attempt in 1..=LIST_ATTEMPTS {
            if observed == target {
                return Ok(());
            }

            let presses = plan_list(observed, target);
            tracing::debug!(
                attempt,
                from = %observed,
                to = %target,
                presses = presses.len(),
                "Navigating party list"
            );
            self.press_sequence(&presses).await?;
            sleep(self.timings.party_verify_settle).await;

            observed = self.list_position().await;
            if observed == target {
                return Ok(());
            }
            tracing::warn!(attempt, expected = %target, observed = %observed, "Party cursor missed target");
        }

        Err(TurnError::CursorDesync {
            target,
            observed,
            attempts: LIST_ATTEMPTS,
        })
    }
}
