use {
    crate::infra::blockchain::Confirmations,
    alloy::primitives::B256,
    ethrpc::alloy::Account,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
        time::Duration,
    },
    url::Url,
};

/// Deploys the PixiCats game and plays a few turns against it.
#[derive(clap::Parser)]
pub struct Args {
    /// The log filter.
    #[clap(long, env, default_value = "warn,deployer=info,ethrpc=info")]
    pub log: String,

    /// At which log level logs should be printed to stderr instead of stdout.
    #[clap(long, env)]
    pub stderr_threshold: Option<tracing::Level>,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,

    /// The node RPC API endpoint.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Hex encoded private key of the deploying account.
    #[clap(long, env, conflicts_with = "mnemonic")]
    pub private_key: Option<B256>,

    /// BIP-39 mnemonic to derive the deploying account from. Defaults to the
    /// mnemonic of the prefunded Hardhat and Anvil development accounts.
    #[clap(long, env)]
    pub mnemonic: Option<String>,

    /// Derivation index of the deploying account.
    #[clap(long, env, default_value = "0")]
    pub mnemonic_index: u32,

    /// Path to the Hardhat artifact of the compiled game contract.
    #[clap(long, env, default_value = contracts::artifact::DEFAULT_PATH)]
    pub artifact: PathBuf,

    /// Path to a TOML roster file replacing the built-in characters and boss.
    #[clap(long, env)]
    pub roster: Option<PathBuf>,

    /// Number of confirmations to wait for after each transaction.
    #[clap(long, env, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    pub confirmations: u64,

    /// Give up waiting for a transaction after this long, e.g. `2m`. Waits
    /// forever by default.
    #[clap(long, env, value_parser = humantime::parse_duration)]
    pub confirmation_timeout: Option<Duration>,
}

impl Args {
    pub fn account(&self) -> Account {
        match (&self.private_key, &self.mnemonic) {
            (Some(key), _) => Account::PrivateKey(*key),
            (None, Some(phrase)) => Account::Mnemonic {
                phrase: phrase.clone(),
                index: self.mnemonic_index,
            },
            (None, None) => Account::dev(self.mnemonic_index),
        }
    }

    pub fn confirmations(&self) -> Confirmations {
        Confirmations {
            required: self.confirmations,
            timeout: self.confirmation_timeout,
        }
    }
}

impl Display for Args {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log,
            stderr_threshold,
            use_json_logs,
            node_url,
            private_key: _,
            mnemonic: _,
            mnemonic_index: _,
            artifact,
            roster,
            confirmations,
            confirmation_timeout,
        } = self;

        writeln!(f, "log: {log}")?;
        writeln!(f, "stderr_threshold: {stderr_threshold:?}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "account: {}", self.account())?;
        writeln!(f, "artifact: {}", artifact.display())?;
        match roster {
            Some(roster) => writeln!(f, "roster: {}", roster.display())?,
            None => writeln!(f, "roster: built-in")?,
        }
        writeln!(f, "confirmations: {confirmations}")?;
        writeln!(f, "confirmation_timeout: {confirmation_timeout:?}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn defaults_target_a_local_dev_node() {
        let args = Args::try_parse_from(["deployer"]).unwrap();

        assert_eq!(args.node_url.as_str(), "http://localhost:8545/");
        assert_eq!(args.account(), Account::dev(0));
        assert_eq!(
            args.artifact,
            PathBuf::from("artifacts/contracts/PixiCats.sol/PixiCats.json")
        );
        assert_eq!(args.roster, None);
        assert_eq!(args.confirmations(), Confirmations::default());
    }

    #[test]
    fn parses_private_key_and_timeout() {
        let args = Args::try_parse_from([
            "deployer",
            "--private-key",
            KEY,
            "--confirmation-timeout",
            "2m",
            "--confirmations",
            "3",
        ])
        .unwrap();

        assert_eq!(args.account(), Account::PrivateKey(KEY.parse().unwrap()));
        assert_eq!(
            args.confirmations(),
            Confirmations {
                required: 3,
                timeout: Some(Duration::from_secs(120)),
            }
        );
    }

    #[test]
    fn rejects_key_and_mnemonic_together() {
        let result = Args::try_parse_from([
            "deployer",
            "--private-key",
            KEY,
            "--mnemonic",
            ethrpc::alloy::DEV_MNEMONIC,
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_confirmations() {
        assert!(Args::try_parse_from(["deployer", "--confirmations", "0"]).is_err());
    }

    #[test]
    fn display_redacts_the_key() {
        let args = Args::try_parse_from(["deployer", "--private-key", KEY]).unwrap();
        let shown = args.to_string();

        assert!(!shown.contains(&KEY[2..]));
        assert!(shown.contains("account: private key (SECRET)"));
    }
}
