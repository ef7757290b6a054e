mod wallet;

pub use wallet::{Account, DEV_MNEMONIC};
use {
    crate::AlloyProvider,
    alloy::{
        network::EthereumWallet,
        providers::{Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
        signers::local::PrivateKeySigner,
    },
    url::Url,
};

/// A provider that signs transactions locally with `signer` before sending
/// them to the node at `url`. Nonce, gas and chain ID are filled in by the
/// provider.
pub fn provider_with_signer(url: &Url, signer: PrivateKeySigner) -> AlloyProvider {
    tracing::debug!(%url, account = %signer.address(), "connecting signing provider");
    let rpc = ClientBuilder::default().http(url.clone());
    let wallet = EthereumWallet::new(signer);

    ProviderBuilder::new()
        .wallet(wallet)
        .connect_client(rpc)
        .erased()
}
