//! Loading of the compiled `PixiCats` contract.
//!
//! The deployer does not embed any bytecode. It reads the JSON artifact that
//! `npx hardhat compile` writes next to the contract sources and checks that
//! the ABI in it matches the bindings in [`crate::alloy::PixiCats`] before
//! anything is sent to the network.

use {
    crate::alloy::PixiCats::{self, PixiCats as Bindings},
    alloy::{
        json_abi::JsonAbi,
        primitives::{Bytes, Selector, hex},
        sol_types::{SolCall, SolConstructor},
    },
    serde::Deserialize,
    std::{
        collections::BTreeMap,
        path::{Path, PathBuf},
        str::FromStr,
    },
};

/// Where Hardhat puts the artifact relative to the project root.
pub const DEFAULT_PATH: &str = "artifacts/contracts/PixiCats.sol/PixiCats.json";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read artifact {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed artifact")]
    Json(#[from] serde_json::Error),
    #[error("artifact for {0} requires library linking, which is not supported")]
    UnlinkedLibraries(String),
    #[error("invalid creation bytecode")]
    Bytecode(#[from] hex::FromHexError),
    #[error("artifact for {0} has no creation bytecode, is it an abstract contract or interface?")]
    MissingBytecode(String),
    #[error("constructor of {contract} does not take ({expected})")]
    ConstructorMismatch { contract: String, expected: String },
    #[error("{contract} has no function {signature}")]
    MissingFunction {
        contract: String,
        signature: &'static str,
    },
}

/// The subset of a Hardhat artifact the deployer needs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    contract_name: String,
    abi: JsonAbi,
    bytecode: String,
    #[serde(default)]
    link_references: BTreeMap<String, serde_json::Value>,
}

/// A compiled contract that is ready to be deployed.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl Artifact {
    /// Reads and validates the artifact at `path`.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, Error> {
        let artifact: HardhatArtifact = serde_json::from_str(data)?;
        if !artifact.link_references.is_empty() {
            return Err(Error::UnlinkedLibraries(artifact.contract_name));
        }
        let bytecode = Bytes::from_str(&artifact.bytecode)?;
        if bytecode.is_empty() {
            return Err(Error::MissingBytecode(artifact.contract_name));
        }

        let artifact = Self {
            contract_name: artifact.contract_name,
            abi: artifact.abi,
            bytecode,
        };
        artifact.check_abi()?;
        Ok(artifact)
    }

    /// Creation code for a deployment transaction: the bytecode followed by
    /// the ABI-encoded constructor arguments.
    pub fn deployment_code(&self, args: &Bindings::constructorCall) -> Bytes {
        [self.bytecode.as_ref(), args.abi_encode().as_slice()]
            .concat()
            .into()
    }

    fn check_abi(&self) -> Result<(), Error> {
        let constructor_matches = self.abi.constructor.as_ref().is_some_and(|constructor| {
            constructor
                .inputs
                .iter()
                .map(|param| param.ty.as_str())
                .eq(PixiCats::CONSTRUCTOR_INPUTS)
        });
        if !constructor_matches {
            return Err(Error::ConstructorMismatch {
                contract: self.contract_name.clone(),
                expected: PixiCats::CONSTRUCTOR_INPUTS.join(","),
            });
        }

        let required = [
            (
                Bindings::mintCharacterNFTCall::SIGNATURE,
                Bindings::mintCharacterNFTCall::SELECTOR,
            ),
            (
                Bindings::attackBossCall::SIGNATURE,
                Bindings::attackBossCall::SELECTOR,
            ),
            (
                Bindings::tokenURICall::SIGNATURE,
                Bindings::tokenURICall::SELECTOR,
            ),
        ];
        for (signature, selector) in required {
            let found = self
                .abi
                .functions()
                .any(|function| function.selector() == Selector::from(selector));
            if !found {
                return Err(Error::MissingFunction {
                    contract: self.contract_name.clone(),
                    signature,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::U256, serde_json::json};

    fn abi() -> serde_json::Value {
        let param = |name: &str, ty: &str| {
            json!({ "internalType": ty, "name": name, "type": ty })
        };
        json!([
            {
                "type": "constructor",
                "stateMutability": "nonpayable",
                "inputs": [
                    param("characterNames", "string[]"),
                    param("characterImageURIs", "string[]"),
                    param("characterHp", "uint256[]"),
                    param("characterAttackDmg", "uint256[]"),
                    param("bossName", "string"),
                    param("bossImageURI", "string"),
                    param("bossHp", "uint256"),
                    param("bossAttackDamage", "uint256"),
                ],
            },
            {
                "type": "function",
                "name": "mintCharacterNFT",
                "stateMutability": "nonpayable",
                "inputs": [param("_characterIndex", "uint256")],
                "outputs": [],
            },
            {
                "type": "function",
                "name": "attackBoss",
                "stateMutability": "nonpayable",
                "inputs": [],
                "outputs": [],
            },
            {
                "type": "function",
                "name": "tokenURI",
                "stateMutability": "view",
                "inputs": [param("_tokenId", "uint256")],
                "outputs": [param("", "string")],
            },
        ])
    }

    fn artifact_json(abi: serde_json::Value, bytecode: &str) -> String {
        json!({
            "_format": "hh-sol-artifact-1",
            "contractName": "PixiCats",
            "sourceName": "contracts/PixiCats.sol",
            "abi": abi,
            "bytecode": bytecode,
            "deployedBytecode": "0x",
            "linkReferences": {},
            "deployedLinkReferences": {},
        })
        .to_string()
    }

    fn constructor_args() -> Bindings::constructorCall {
        Bindings::constructorCall {
            characterNames: vec!["Yogi Cat".to_string()],
            characterImageURIs: vec!["https://i.imgur.com/cnRyNcm.jpg".to_string()],
            characterHp: vec![U256::from(400)],
            characterAttackDmg: vec![U256::from(100)],
            bossName: "Evil Dog".to_string(),
            bossImageURI: "https://i.imgur.com/GpGSo8x.jpg".to_string(),
            bossHp: U256::from(10_000),
            bossAttackDamage: U256::from(100),
        }
    }

    #[test]
    fn loads_hardhat_artifact() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), artifact_json(abi(), "0x6080604052")).unwrap();

        let artifact = Artifact::load(file.path()).unwrap();

        assert_eq!(artifact.contract_name, "PixiCats");
        assert_eq!(artifact.bytecode.as_ref(), [0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Artifact::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn rejects_interfaces() {
        let err = Artifact::from_json(&artifact_json(abi(), "0x")).unwrap_err();
        assert!(matches!(err, Error::MissingBytecode(name) if name == "PixiCats"));
    }

    #[test]
    fn rejects_unlinked_libraries() {
        let mut artifact: serde_json::Value =
            serde_json::from_str(&artifact_json(abi(), "0x6080")).unwrap();
        artifact["linkReferences"] = json!({
            "contracts/libraries/Base64.sol": {
                "Base64": [{ "length": 20, "start": 1337 }],
            },
        });

        let err = Artifact::from_json(&artifact.to_string()).unwrap_err();
        assert!(matches!(err, Error::UnlinkedLibraries(_)));
    }

    #[test]
    fn rejects_abi_without_attack() {
        let mut abi = abi();
        abi.as_array_mut()
            .unwrap()
            .retain(|item| item["name"] != "attackBoss");

        let err = Artifact::from_json(&artifact_json(abi, "0x6080")).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingFunction { signature, .. } if signature == "attackBoss()"
        ));
    }

    #[test]
    fn rejects_different_constructor() {
        let mut abi = abi();
        abi[0]["inputs"].as_array_mut().unwrap().pop();

        let err = Artifact::from_json(&artifact_json(abi, "0x6080")).unwrap_err();
        assert!(matches!(err, Error::ConstructorMismatch { .. }));
    }

    #[test]
    fn appends_constructor_arguments() {
        let artifact = Artifact::from_json(&artifact_json(abi(), "0x6080604052")).unwrap();
        let args = constructor_args();

        let code = artifact.deployment_code(&args);

        let encoded = args.abi_encode();
        assert_eq!(&code[..5], artifact.bytecode.as_ref());
        assert_eq!(&code[5..], encoded.as_slice());
        // Dynamic arguments are encoded as 32 byte words.
        assert_eq!(encoded.len() % 32, 0);
    }
}
