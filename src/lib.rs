#![doc(test(attr(deny(warnings))))]

//! Plan Core tracks household budget rules, ledger entries, assets and net-worth
//! snapshots, and projects future wealth from recurring cash flows.

pub mod cli;
pub mod config;
pub mod core;
pub mod ledger;
pub mod simulation;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Plan Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
