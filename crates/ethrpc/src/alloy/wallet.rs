use {
    alloy::{
        primitives::B256,
        signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    },
    anyhow::{Context, Result},
    std::fmt::{self, Display, Formatter},
};

/// Mnemonic of the prefunded accounts of Hardhat and Anvil development nodes.
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// The account transactions are sent from.
#[derive(Clone, PartialEq, Eq)]
pub enum Account {
    PrivateKey(B256),
    Mnemonic { phrase: String, index: u32 },
}

impl Account {
    /// Account `index` of the development mnemonic.
    pub fn dev(index: u32) -> Self {
        Self::Mnemonic {
            phrase: DEV_MNEMONIC.to_string(),
            index,
        }
    }

    pub fn signer(&self) -> Result<PrivateKeySigner> {
        match self {
            Self::PrivateKey(key) => {
                PrivateKeySigner::from_bytes(key).context("invalid private key")
            }
            Self::Mnemonic { phrase, index } => MnemonicBuilder::<English>::default()
                .phrase(phrase.as_str())
                .index(*index)
                .with_context(|| format!("invalid derivation index {index}"))?
                .build()
                .context("could not derive key from mnemonic"),
        }
    }
}

// Never print key material.
impl Display for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrivateKey(_) => write!(f, "private key (SECRET)"),
            Self::Mnemonic { phrase, index } if phrase == DEV_MNEMONIC => {
                write!(f, "development mnemonic, index {index}")
            }
            Self::Mnemonic { index, .. } => write!(f, "mnemonic (SECRET), index {index}"),
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
