// The bindings are generated in a private module so that the public module
// can re-export all items while adding some of its own.
#[allow(non_snake_case)]
mod PixiCatsPrivate {
    alloy::sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        contract PixiCats {
            constructor(
                string[] characterNames,
                string[] characterImageURIs,
                uint256[] characterHp,
                uint256[] characterAttackDmg,
                string bossName,
                string bossImageURI,
                uint256 bossHp,
                uint256 bossAttackDamage
            );

            function mintCharacterNFT(uint256 _characterIndex) external;
            function attackBoss() public;
            function tokenURI(uint256 _tokenId) public view returns (string memory);
        }
    );
}

/// The NFT battle game. Only the surface the deployer drives is bound; the
/// game rules live in the contract.
#[allow(non_snake_case)]
pub mod PixiCats {
    use alloy::providers::DynProvider;

    pub use super::PixiCatsPrivate::*;
    pub type Instance = PixiCats::PixiCatsInstance<DynProvider>;

    /// Solidity types of the constructor parameters, in order.
    pub const CONSTRUCTOR_INPUTS: [&str; 8] = [
        "string[]",
        "string[]",
        "uint256[]",
        "uint256[]",
        "string",
        "string",
        "uint256",
        "uint256",
    ];
}
