//! This module implements the observability for the deployer. It exposes
//! functions which represent events that are meaningful to the system. These
//! functions are called when the corresponding events occur and log them.

use {
    crate::{
        cli,
        domain::{Action, Confirmation, Roster},
    },
    alloy::primitives::{Address, TxHash},
};

/// Setup the observability. The log arguments configure the tracing
/// framework.
pub fn init(args: &cli::Args) {
    ::observe::tracing::initialize(&::observe::Config::new(
        &args.log,
        args.stderr_threshold,
        args.use_json_logs,
    ));
}

/// Setup the observability with the default configuration. Used when the
/// arguments could not be parsed, so that the failure is logged like any
/// other.
pub fn init_default() {
    ::observe::tracing::initialize(&::observe::Config::default());
}

/// Observe the connection to the node.
pub fn connected(chain_id: u64, sender: Address) {
    tracing::info!(chain_id, %sender, "connected to node");
}

/// Observe that the game is about to be deployed.
pub fn deploying(roster: &Roster) {
    tracing::debug!(%roster, "deploying game");
}

/// Observe the deployed game.
pub fn deployed(address: Address) {
    tracing::info!(%address, "contract deployed");
}

/// Observe that a transaction was accepted by the node.
pub fn sent(action: Action, tx: TxHash) {
    tracing::debug!(%action, ?tx, "sent transaction");
}

/// Observe that a transaction was mined.
pub fn confirmed(action: Action, confirmation: &Confirmation) {
    tracing::debug!(
        %action,
        tx = ?confirmation.tx_hash,
        block = ?confirmation.block_number,
        gas_used = confirmation.gas_used,
        "transaction confirmed"
    );
}

/// Observe the `count`th minted NFT of this run.
pub fn minted(count: usize) {
    tracing::info!("Minted NFT #{count}");
}

/// Observe that the whole script ran.
pub fn done() {
    tracing::info!("done deploying and minting");
}

/// Observe that the run failed. The error chain is written in full.
pub fn failed(err: &anyhow::Error) {
    tracing::error!("{err:?}");
}
