//! End-to-end walkthrough of the booking ledger against the in-memory
//! treasury and a manual clock.
//!
//! Run with `RUST_LOG=info cargo run -p agenda-core --example agenda_demo`.

use std::sync::Arc;

use agenda_core::{AgendaLedger, InMemoryTreasury, ManualClock};
use agenda_types::account::AccountId;
use agenda_types::config::AgendaConfig;
use agenda_types::money::Amount;
use chrono::{TimeDelta, Utc};

const PRICE: Amount = 1_000_000_000_000_000_000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    agenda_observe::tracing_setup::init_tracing()?;

    let owner = AccountId::new();
    let booker = AccountId::new();
    let now = Utc::now();

    let config = AgendaConfig {
        owner,
        price_of_service: PRICE,
        duration: TimeDelta::minutes(40),
        cancellable_before: TimeDelta::minutes(60),
        first_bookable_at: now + TimeDelta::minutes(1),
        last_bookable_at: now + TimeDelta::minutes(1) + TimeDelta::hours(4),
    };

    let clock = Arc::new(ManualClock::new(now));
    let treasury = Arc::new(InMemoryTreasury::new());
    let ledger = AgendaLedger::new(config, Arc::clone(&treasury), Arc::clone(&clock))?;
    let mut events = ledger.subscribe();

    let slots = ledger.available_time_slots().await;
    println!("{} slots available, first at {}", slots.len(), slots[0]);

    // Reserve and confirm the last slot, cancel it again.
    let slot = *slots.last().expect("grid is never empty");
    ledger.book(booker, slot, PRICE).await?;
    ledger.confirm_booking(owner, slot).await?;
    ledger.cancel_booking(booker, slot).await?;
    println!("refunded booker balance: {}", treasury.balance_of(&booker));

    // Book the first slot; its cancellation window is already closed, so the
    // owner can withdraw the payment right away.
    let first = slots[0];
    ledger.book(booker, first, PRICE).await?;
    ledger.withdraw(owner, PRICE).await?;
    println!("owner balance after withdrawal: {}", treasury.balance_of(&owner));

    while let Ok(event) = events.try_recv() {
        println!("event: {}", serde_json::to_string(&event)?);
    }

    Ok(())
}
