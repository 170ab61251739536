//! Player col balances.
//!
//! Credits always apply; debits are floor-guarded so a balance can never go
//! negative, no matter how many purchases or wagers race against it.

use serde::{Deserialize, Serialize};

use crate::store::{ContestedStore, StoreError, UpdateOutcome};

/// Persisted currency balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub col: u64,
}

/// Stands up a wallet with an opening balance. First-writer-wins.
pub fn open_wallet<S: ContestedStore<Wallet>>(
    store: &S,
    player_key: &str,
    opening_col: u64,
) -> Result<UpdateOutcome<Wallet>, StoreError> {
    store.insert_if_absent(player_key, Wallet { col: opening_col })
}

/// Guarded increment. Creates the wallet on first credit.
pub fn credit<S: ContestedStore<Wallet>>(
    store: &S,
    player_key: &str,
    amount: u64,
) -> Result<Wallet, StoreError> {
    loop {
        if let Some(wallet) = store
            .update_if(player_key, |_| true, |w| w.col += amount)?
            .applied()
        {
            return Ok(wallet);
        }
        // No wallet yet; try to create it with the credited amount. A loser
        // of this race goes back around and increments the winner's record.
        if let Some(wallet) = store
            .insert_if_absent(player_key, Wallet { col: amount })?
            .applied()
        {
            return Ok(wallet);
        }
    }
}

/// Floor-guarded decrement: applies only while the balance covers `amount`.
pub fn try_debit<S: ContestedStore<Wallet>>(
    store: &S,
    player_key: &str,
    amount: u64,
) -> Result<UpdateOutcome<Wallet>, StoreError> {
    store.update_if(player_key, |w| w.col >= amount, |w| w.col -= amount)
}
