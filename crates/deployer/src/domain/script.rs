//! The deployment script: deploy the game, play a few fixed turns against it
//! and read back one token's metadata.
//!
//! Every step waits for the previous one. A transaction is confirmed before
//! the next one is sent, and the first failure ends the script.

use {
    crate::{domain::Roster, infra::observe},
    alloy::primitives::{Address, TxHash, U256},
    std::fmt::{self, Display, Formatter},
};

/// A state-changing call against the deployed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Mint { character_index: u8 },
    AttackBoss,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mint { character_index } => write!(f, "mintCharacterNFT({character_index})"),
            Self::AttackBoss => write!(f, "attackBoss()"),
        }
    }
}

/// The calls issued after deployment, in order.
pub const SEQUENCE: [Action; 6] = [
    Action::Mint { character_index: 0 },
    Action::AttackBoss,
    Action::AttackBoss,
    Action::Mint { character_index: 1 },
    Action::Mint { character_index: 1 },
    Action::Mint { character_index: 2 },
];

/// Token whose metadata URI is read once the sequence is done.
pub const METADATA_TOKEN_ID: u64 = 1;

/// Character selectors minted by [`SEQUENCE`].
pub fn minted_characters() -> impl Iterator<Item = u8> {
    SEQUENCE.into_iter().filter_map(|action| match action {
        Action::Mint { character_index } => Some(character_index),
        Action::AttackBoss => None,
    })
}

/// A mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Deploys new game instances.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Deployer: Send + Sync {
    /// Deploys the game for `roster` and waits until the deployment is
    /// confirmed.
    async fn deploy(&self, roster: &Roster) -> anyhow::Result<Box<dyn Game>>;
}

/// A deployed game instance.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Game: Send + Sync {
    fn address(&self) -> Address;

    /// Sends a mint transaction without waiting for it to be mined.
    async fn mint_character_nft(&self, character_index: u8) -> anyhow::Result<TxHash>;

    /// Sends an attack transaction without waiting for it to be mined.
    async fn attack_boss(&self) -> anyhow::Result<TxHash>;

    /// Waits until `tx` is mined. A reverted transaction is an error.
    async fn confirm(&self, tx: TxHash) -> anyhow::Result<Confirmation>;

    async fn token_uri(&self, token_id: U256) -> anyhow::Result<String>;
}

/// The step of the script that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Deploy,
    Send(Action),
    Confirm(Action),
    TokenUri(u64),
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deploy => write!(f, "deployment"),
            Self::Send(action) => write!(f, "sending {action}"),
            Self::Confirm(action) => write!(f, "confirming {action}"),
            Self::TokenUri(token_id) => write!(f, "tokenURI({token_id})"),
        }
    }
}

/// The operation failed. The step is only there to make the log useful.
#[derive(Debug, thiserror::Error)]
#[error("{step} failed")]
pub struct Error {
    step: Step,
    #[source]
    source: anyhow::Error,
}

impl Error {
    pub fn step(&self) -> Step {
        self.step
    }

    fn at(step: Step) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self { step, source }
    }
}

/// What a successful run did.
#[derive(Debug)]
pub struct Report {
    pub address: Address,
    pub confirmations: Vec<Confirmation>,
}

/// Runs the whole script against a game deployed by `deployer`.
pub async fn execute(deployer: &dyn Deployer, roster: &Roster) -> Result<Report, Error> {
    observe::deploying(roster);
    let game = deployer
        .deploy(roster)
        .await
        .map_err(Error::at(Step::Deploy))?;
    let address = game.address();
    observe::deployed(address);

    let mut confirmations = Vec::with_capacity(SEQUENCE.len());
    let mut minted = 0;
    for action in SEQUENCE {
        let tx = match action {
            Action::Mint { character_index } => game.mint_character_nft(character_index).await,
            Action::AttackBoss => game.attack_boss().await,
        }
        .map_err(Error::at(Step::Send(action)))?;
        observe::sent(action, tx);

        let confirmation = game
            .confirm(tx)
            .await
            .map_err(Error::at(Step::Confirm(action)))?;
        observe::confirmed(action, &confirmation);
        if let Action::Mint { .. } = action {
            minted += 1;
            observe::minted(minted);
        }
        confirmations.push(confirmation);
    }

    // Read but never logged.
    let _uri = game
        .token_uri(U256::from(METADATA_TOKEN_ID))
        .await
        .map_err(Error::at(Step::TokenUri(METADATA_TOKEN_ID)))?;

    observe::done();
    Ok(Report {
        address,
        confirmations,
    })
}
