//! Marketplace listings.
//!
//! A listing's stock is a contested resource: two buyers racing for the last
//! unit resolve through the floor-guarded decrement, and the loser is told
//! the item already sold rather than seeing an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{ContestedStore, StoreError, UpdateOutcome};
use crate::wallet::{credit, try_debit, Wallet};

/// Persisted market listing. Serialized in camelCase for the dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Uuid,
    pub seller: String,
    pub item_name: String,
    pub price: u64,
    pub stock: u32,
    pub listed_at: DateTime<Utc>,
}

impl Listing {
    pub fn new(seller: &str, item_name: &str, price: u64, stock: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            seller: seller.to_string(),
            item_name: item_name.to_string(),
            price,
            stock,
            listed_at: now,
        }
    }

    pub fn key(&self) -> String {
        listing_key(&self.id)
    }
}

pub fn listing_key(id: &Uuid) -> String {
    format!("listing:{id}")
}

/// How a purchase attempt resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    /// Stock decremented, buyer debited, seller credited.
    Purchased { listing: Listing, total_price: u64 },
    /// The buyer's balance did not cover the price. Nothing applied.
    InsufficientFunds,
    /// A concurrent buyer took the remaining stock (or the listing is
    /// gone). The buyer was refunded.
    AlreadySold,
}

/// Publishes a listing. The v4 id makes collisions practically impossible,
/// but the write is still first-writer-wins for form.
pub fn create_listing<S: ContestedStore<Listing>>(
    store: &S,
    listing: Listing,
) -> Result<UpdateOutcome<Listing>, StoreError> {
    let key = listing.key();
    store.insert_if_absent(&key, listing)
}

/// Buys `quantity` units from a listing.
///
/// Debits the buyer first, then takes stock; a lost stock race refunds the
/// debit. The seller is only credited after stock was actually taken.
pub fn buy<L, W>(
    listings: &L,
    wallets: &W,
    listing_id: &Uuid,
    buyer: &str,
    quantity: u32,
) -> Result<PurchaseOutcome, StoreError>
where
    L: ContestedStore<Listing>,
    W: ContestedStore<Wallet>,
{
    let key = listing_key(listing_id);
    let Some(listing) = listings.read(&key)? else {
        return Ok(PurchaseOutcome::AlreadySold);
    };
    let total_price = listing.price * quantity as u64;

    if !try_debit(wallets, buyer, total_price)?.is_applied() {
        return Ok(PurchaseOutcome::InsufficientFunds);
    }

    let outcome = listings.update_if(
        &key,
        |l| l.stock >= quantity,
        |l| l.stock -= quantity,
    )?;

    match outcome {
        UpdateOutcome::Applied(updated) => {
            credit(wallets, &updated.seller, total_price)?;
            Ok(PurchaseOutcome::Purchased {
                listing: updated,
                total_price,
            })
        }
        UpdateOutcome::GuardFailed => {
            // Lost the stock race after paying; give the col back.
            credit(wallets, buyer, total_price)?;
            Ok(PurchaseOutcome::AlreadySold)
        }
    }
}

/// Removes a listing, but only for its own seller and only once.
pub fn delist<S: ContestedStore<Listing>>(
    store: &S,
    listing_id: &Uuid,
    seller: &str,
) -> Result<UpdateOutcome<Listing>, StoreError> {
    store.remove_if(&listing_key(listing_id), |l| l.seller == seller)
}
