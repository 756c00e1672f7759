#![doc(test(attr(deny(warnings))))]

//! Cashflow Core projects a seller's bank balance forward from upstream records
//! (vendor bills, customer income, recurring charges, credit cards, marketplace
//! payouts) and derives how much can be spent safely without cutting into a
//! reserve floor.

pub mod cli;
pub mod config;
pub mod errors;
pub mod projection;
pub mod sources;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow Core tracing initialized.");
    });
}
