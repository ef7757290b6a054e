use {
    crate::{
        cli,
        domain::{Report, Roster, script},
        infra::{self, Chain, observe},
    },
    anyhow::Result,
    clap::Parser,
    contracts::Artifact,
    std::process::ExitCode,
};

/// How the process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// The single error boundary of the deployer: any failure is logged and
/// turns into [`Outcome::Failure`].
pub fn conclude<T>(result: Result<T>) -> Outcome {
    match result {
        Ok(_) => Outcome::Success,
        Err(err) => {
            observe::failed(&err);
            Outcome::Failure
        }
    }
}

/// Parses `args`, runs the deployment script and reports how it went.
pub async fn start(args: impl IntoIterator<Item = String>) -> ExitCode {
    let args = match parse(args) {
        Ok(Some(args)) => args,
        Ok(None) => return Outcome::Success.into(),
        Err(err) => {
            observe::init_default();
            return conclude::<()>(Err(err)).into();
        }
    };
    observe::init(&args);
    tracing::info!("running deployer with validated arguments:\n{}", args);
    conclude(run(&args).await).into()
}

/// Parses the command line. `None` means help was requested and has been
/// printed.
fn parse(args: impl IntoIterator<Item = String>) -> Result<Option<cli::Args>> {
    match cli::Args::try_parse_from(args) {
        Ok(args) => Ok(Some(args)),
        Err(err) if !err.use_stderr() => {
            err.print()?;
            Ok(None)
        }
        Err(err) => Err(anyhow::Error::from(err).context("invalid command line arguments")),
    }
}

async fn run(args: &cli::Args) -> Result<Report> {
    let roster = match &args.roster {
        Some(path) => infra::config::load(path)?,
        None => Roster::default(),
    };
    let artifact = Artifact::load(&args.artifact)?;
    let signer = args.account().signer()?;
    let sender = signer.address();
    let provider = ethrpc::alloy::provider_with_signer(&args.node_url, signer);
    let chain = Chain::connect(provider, sender, artifact, args.confirmations()).await?;

    Ok(script::execute(&chain, &roster).await?)
}

#[cfg(test)]
mod tests {
    use {super::*, anyhow::anyhow};

    #[test]
    fn exit_codes() {
        assert_eq!(conclude(Ok(())).exit_code(), 0);
        assert_eq!(
            conclude::<()>(Err(anyhow!("nonce too low"))).exit_code(),
            1
        );
    }

    #[test]
    fn conflicting_flags_fail_through_the_error_boundary() {
        let result = parse(
            [
                "deployer",
                "--private-key",
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
                "--mnemonic",
                ethrpc::alloy::DEV_MNEMONIC,
            ]
            .map(String::from),
        );

        let kind = match &result {
            Ok(_) => panic!("conflicting flags were accepted"),
            Err(err) => err.downcast_ref::<clap::Error>().map(|err| err.kind()),
        };
        assert_eq!(kind, Some(clap::error::ErrorKind::ArgumentConflict));
        assert_eq!(conclude(result), Outcome::Failure);
    }

    #[test]
    fn help_is_not_a_failure() {
        let result = parse(["deployer", "--help"].map(String::from));

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn missing_artifact_fails_before_touching_the_network() {
        let args = parse(
            [
                "deployer",
                "--artifact",
                "no/such/PixiCats.json",
                "--node-url",
                "http://127.0.0.1:1",
            ]
            .map(String::from),
        )
        .unwrap()
        .unwrap();

        let err = run(&args).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<contracts::artifact::Error>(),
            Some(contracts::artifact::Error::Io { .. })
        ));
    }
}
