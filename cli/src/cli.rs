use {
    crate::distribution::{parse_distribution_command, process_distribution_command},
    clap::ArgMatches,
    distribution_interface::error::{DistributionError, PdaError, StateError},
    log::debug,
    solana_clap_utils::keypair::DefaultSigner,
    solana_cli_config::Config,
    solana_cli_output::OutputFormat,
    solana_commitment_config::CommitmentConfig,
    solana_pubkey::Pubkey,
    solana_remote_wallet::remote_wallet::RemoteWalletManager,
    solana_rpc_client::nonblocking::rpc_client::RpcClient,
    solana_rpc_client_api::client_error::Error as ClientError,
    solana_signer::{Signer, SignerError},
    std::{error, rc::Rc, sync::Arc, time::Duration},
    thiserror::Error,
};

pub const DEFAULT_RPC_TIMEOUT_SECONDS: &str = "30";
pub const DEFAULT_CONFIRM_TX_TIMEOUT_SECONDS: &str = "5";
/// The distribution program is deployed on devnet, so that is the cluster
/// used when no config file can be read.
pub const DEFAULT_JSON_RPC_URL: &str = "https://api.devnet.solana.com";
/// Keeps warnings from this crate visible unless `RUST_LOG` says otherwise.
pub const DEFAULT_LOG_FILTER: &str = concat!(env!("CARGO_CRATE_NAME"), "=warn");

pub type CliSigners = Vec<Box<dyn Signer>>;
pub type ProcessResult = Result<String, Box<dyn error::Error>>;

#[derive(Debug, PartialEq, Eq)]
pub enum CliCommand {
    GlobalStatus,
    MinedBlock {
        block_number: u64,
    },
    GetAllBlocks,
    InitGlobal {
        caller: Pubkey,
        start_block: u64,
    },
    UpdateCaller {
        caller: Pubkey,
    },
    MineBlock {
        block_number: u64,
        winner: Pubkey,
        reward_mint: Pubkey,
    },
}

impl CliCommand {
    /// Commands that submit a transaction and therefore need the signer.
    pub fn requires_signer(&self) -> bool {
        matches!(
            self,
            Self::InitGlobal { .. } | Self::UpdateCaller { .. } | Self::MineBlock { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Bad parameter: {0}")]
    BadParameter(String),

    #[error(transparent)]
    ClientError(#[from] ClientError),

    #[error(transparent)]
    AddressDerivation(#[from] PdaError),

    #[error("Account {address} is owned by {owner}, not by the distribution program")]
    InvalidAccountOwner { address: Pubkey, owner: Pubkey },

    #[error("Account {address} could not be decoded: {source}")]
    AccountDecode {
        address: Pubkey,
        #[source]
        source: StateError,
    },

    #[error("Instruction {index} rejected by the distribution program: {error}")]
    Program { index: u8, error: DistributionError },

    #[error("Transaction simulation failed: {0}")]
    SimulationFailed(String),

    #[error("Keypair error: {0}")]
    KeypairError(String),

    #[error("No signer available to pay for the transaction")]
    MissingSigner,

    #[error(transparent)]
    SignerError(#[from] SignerError),
}

pub struct CliCommandInfo {
    pub command: CliCommand,
    pub signers: CliSigners,
}

impl CliCommandInfo {
    pub fn without_signers(command: CliCommand) -> Self {
        Self {
            command,
            signers: vec![],
        }
    }
}

/// Everything one invocation needs, resolved once from the command line and
/// the config file and handed to every operation.
pub struct CliConfig<'a> {
    pub command: CliCommand,
    pub json_rpc_url: String,
    pub signers: Vec<&'a dyn Signer>,
    pub program_id: Pubkey,
    pub commitment: CommitmentConfig,
    pub output_format: OutputFormat,
    pub rpc_timeout: Duration,
    pub confirm_transaction_initial_timeout: Duration,
}

impl CliConfig<'_> {
    /// The first signer pays fees and signs as admin or caller.
    pub fn fee_payer(&self) -> Result<Pubkey, CliError> {
        self.signers
            .first()
            .map(|signer| signer.pubkey())
            .ok_or(CliError::MissingSigner)
    }
}

/// Loads the CLI config file, falling back to devnet defaults when there is no
/// file or it cannot be read.
pub fn load_config(config_file: Option<&str>) -> Config {
    config_file
        .and_then(|config_file| match Config::load(config_file) {
            Ok(config) => Some(config),
            Err(err) => {
                debug!("Not using config file {config_file}: {err}");
                None
            }
        })
        .unwrap_or_else(|| Config {
            json_rpc_url: DEFAULT_JSON_RPC_URL.to_string(),
            ..Config::default()
        })
}

pub fn parse_command(
    matches: &ArgMatches<'_>,
    default_signer: &DefaultSigner,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> Result<CliCommandInfo, CliError> {
    parse_distribution_command(matches, default_signer, wallet_manager)
}

pub async fn process_command(config: &CliConfig<'_>) -> ProcessResult {
    debug!(
        "Using RPC URL {} and program {}",
        config.json_rpc_url, config.program_id
    );
    let rpc_client = Arc::new(RpcClient::new_with_timeouts_and_commitment(
        config.json_rpc_url.to_string(),
        config.rpc_timeout,
        config.commitment,
        config.confirm_transaction_initial_timeout,
    ));
    process_distribution_command(&rpc_client, config, &config.command).await
}
