//! The [`Deployer`] and [`Game`] implementations backed by an Ethereum node.

use {
    crate::{
        domain::{Confirmation, Deployer, Fighter, Game, Roster},
        infra::observe,
    },
    alloy::{
        contract::RawCallBuilder,
        network::ReceiptResponse as _,
        primitives::{Address, TxHash, U256},
        providers::{PendingTransactionBuilder, Provider},
    },
    anyhow::{Context, Result},
    contracts::{Artifact, alloy::PixiCats},
    ethrpc::AlloyProvider,
    std::time::Duration,
};

/// How long to wait for transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmations {
    /// Blocks that must be mined on top of (and including) the transaction's
    /// block.
    pub required: u64,
    /// Gives up waiting after this long. Waits forever without one.
    pub timeout: Option<Duration>,
}

impl Default for Confirmations {
    fn default() -> Self {
        Self {
            required: 1,
            timeout: None,
        }
    }
}

/// An Ethereum node reached through a provider that signs for `sender`.
pub struct Chain {
    provider: AlloyProvider,
    sender: Address,
    artifact: Artifact,
    confirmations: Confirmations,
}

impl Chain {
    pub async fn connect(
        provider: AlloyProvider,
        sender: Address,
        artifact: Artifact,
        confirmations: Confirmations,
    ) -> Result<Self> {
        let chain_id = provider
            .get_chain_id()
            .await
            .context("could not fetch current chain id")?;
        observe::connected(chain_id, sender);
        Ok(Self {
            provider,
            sender,
            artifact,
            confirmations,
        })
    }
}

#[async_trait::async_trait]
impl Deployer for Chain {
    async fn deploy(&self, roster: &Roster) -> Result<Box<dyn Game>> {
        let code = self.artifact.deployment_code(&constructor_args(roster));
        let pending = RawCallBuilder::new_raw_deploy(self.provider.clone(), code)
            .from(self.sender)
            .send()
            .await
            .context("failed to send deployment transaction")?;

        let confirmation = confirm(&self.provider, *pending.tx_hash(), self.confirmations).await?;
        let address = confirmation
            .contract_address
            .context("deployment receipt has no contract address")?;

        Ok(Box::new(DeployedGame {
            instance: PixiCats::Instance::new(address, self.provider.clone()),
            sender: self.sender,
            confirmations: self.confirmations,
        }))
    }
}

struct DeployedGame {
    instance: PixiCats::Instance,
    sender: Address,
    confirmations: Confirmations,
}

#[async_trait::async_trait]
impl Game for DeployedGame {
    fn address(&self) -> Address {
        *self.instance.address()
    }

    async fn mint_character_nft(&self, character_index: u8) -> Result<TxHash> {
        let pending = self
            .instance
            .mintCharacterNFT(U256::from(character_index))
            .from(self.sender)
            .send()
            .await
            .context("mintCharacterNFT")?;
        Ok(*pending.tx_hash())
    }

    async fn attack_boss(&self) -> Result<TxHash> {
        let pending = self
            .instance
            .attackBoss()
            .from(self.sender)
            .send()
            .await
            .context("attackBoss")?;
        Ok(*pending.tx_hash())
    }

    async fn confirm(&self, tx: TxHash) -> Result<Confirmation> {
        let confirmation = confirm(self.instance.provider(), tx, self.confirmations).await?;
        Ok(confirmation.into())
    }

    async fn token_uri(&self, token_id: U256) -> Result<String> {
        self.instance
            .tokenURI(token_id)
            .call()
            .await
            .context("tokenURI")
    }
}

/// The parts of a successful receipt the deployer cares about.
struct Mined {
    tx_hash: TxHash,
    block_number: Option<u64>,
    gas_used: u64,
    contract_address: Option<Address>,
}

impl From<Mined> for Confirmation {
    fn from(mined: Mined) -> Self {
        Self {
            tx_hash: mined.tx_hash,
            block_number: mined.block_number,
            gas_used: mined.gas_used,
        }
    }
}

async fn confirm(
    provider: &AlloyProvider,
    tx: TxHash,
    confirmations: Confirmations,
) -> Result<Mined> {
    let receipt = PendingTransactionBuilder::new(provider.root().clone(), tx)
        .with_required_confirmations(confirmations.required)
        .with_timeout(confirmations.timeout)
        .get_receipt()
        .await
        .with_context(|| format!("failed to get receipt of {tx:?}"))?;
    anyhow::ensure!(receipt.status(), "transaction {tx:?} reverted");

    Ok(Mined {
        tx_hash: receipt.transaction_hash(),
        block_number: receipt.block_number(),
        gas_used: receipt.gas_used(),
        contract_address: receipt.contract_address(),
    })
}

fn constructor_args(roster: &Roster) -> PixiCats::PixiCats::constructorCall {
    let field = |get: fn(&Fighter) -> String| -> Vec<String> {
        roster.characters.iter().map(get).collect()
    };
    let stat = |get: fn(&Fighter) -> u64| -> Vec<U256> {
        roster
            .characters
            .iter()
            .map(|character| U256::from(get(character)))
            .collect()
    };

    PixiCats::PixiCats::constructorCall {
        characterNames: field(|character| character.name.clone()),
        characterImageURIs: field(|character| character.image_uri.clone()),
        characterHp: stat(|character| character.hp),
        characterAttackDmg: stat(|character| character.attack_damage),
        bossName: roster.boss.name.clone(),
        bossImageURI: roster.boss.image_uri.clone(),
        bossHp: U256::from(roster.boss.hp),
        bossAttackDamage: U256::from(roster.boss.attack_damage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_args_keep_roster_order() {
        let args = constructor_args(&Roster::default());

        assert_eq!(
            args.characterNames,
            ["Bawler Cat", "Mr. Meowington", "Yogi Cat"]
        );
        assert_eq!(
            args.characterImageURIs,
            [
                "https://i.imgur.com/U3r98Ym.jpg",
                "https://i.imgur.com/o7kkFES.jpg",
                "https://i.imgur.com/cnRyNcm.jpg",
            ]
        );
        assert_eq!(
            args.characterHp,
            [U256::from(100), U256::from(300), U256::from(400)]
        );
        assert_eq!(
            args.characterAttackDmg,
            [U256::from(200), U256::from(100), U256::from(100)]
        );
        assert_eq!(args.bossName, "Evil Dog");
        assert_eq!(args.bossImageURI, "https://i.imgur.com/GpGSo8x.jpg");
        assert_eq!(args.bossHp, U256::from(10_000));
        assert_eq!(args.bossAttackDamage, U256::from(100));
    }

    #[test]
    fn waits_for_one_confirmation_without_timeout_by_default() {
        assert_eq!(
            Confirmations::default(),
            Confirmations {
                required: 1,
                timeout: None,
            }
        );
    }
}
