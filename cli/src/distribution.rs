use {
    crate::{
        cli::{CliCommand, CliCommandInfo, CliConfig, CliError, ProcessResult},
        query::{fetch_all_mined_info, fetch_global_info, fetch_mined_info},
        send::send_instructions,
    },
    clap::{App, AppSettings, Arg, ArgMatches, SubCommand},
    distribution_interface::{
        constants::REWARD_TOKEN_MINT,
        instruction::{initialize, mine_block_instructions, update_caller_address},
        pda::{find_global_address, find_mined_info_address, get_reward_token_account},
        state::{GlobalInfo, MinedInfo},
    },
    log::{debug, info, warn},
    serde::{Deserialize, Serialize},
    solana_clap_utils::{
        input_parsers::{pubkey_of, value_of},
        input_validators::{is_parsable, is_valid_pubkey},
        keypair::DefaultSigner,
    },
    solana_cli_output::{OutputFormat, QuietDisplay, VerboseDisplay},
    solana_instruction::Instruction,
    solana_pubkey::Pubkey,
    solana_remote_wallet::remote_wallet::RemoteWalletManager,
    solana_rpc_client::nonblocking::rpc_client::RpcClient,
    solana_signature::Signature,
    std::{fmt, rc::Rc, sync::Arc},
};

/// Largest integer a JSON consumer using IEEE-754 doubles reads exactly.
pub const MAX_SAFE_JSON_INTEGER: u64 = 9_007_199_254_740_991;

// ── Output Structs ──────────────────────────────────────────────────
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliGlobalInfo {
    pub address: String,
    pub admin: String,
    pub caller: String,
    pub current_reward: u64,
    pub halved_times: u64,
    pub last_halved_block_number: u64,
    pub last_mine_time: i64,
}

impl CliGlobalInfo {
    pub fn new(address: &Pubkey, global: &GlobalInfo) -> Self {
        Self {
            address: address.to_string(),
            admin: global.admin.to_string(),
            caller: global.caller.to_string(),
            current_reward: global.current_reward,
            halved_times: global.halved_times,
            last_halved_block_number: global.last_halved_block_number,
            last_mine_time: global.last_mine_time,
        }
    }

    fn integers(&self) -> [(&'static str, u64); 4] {
        [
            ("currentReward", self.current_reward),
            ("halvedTimes", self.halved_times),
            ("lastHalvedBlockNumber", self.last_halved_block_number),
            ("lastMineTime", self.last_mine_time.unsigned_abs()),
        ]
    }
}

impl QuietDisplay for CliGlobalInfo {}
impl VerboseDisplay for CliGlobalInfo {}

impl fmt::Display for CliGlobalInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Global Info")?;
        writeln!(f, "  Address:                  {}", self.address)?;
        writeln!(f, "  Admin:                    {}", self.admin)?;
        writeln!(f, "  Caller:                   {}", self.caller)?;
        writeln!(f, "  Current Reward:           {}", self.current_reward)?;
        writeln!(f, "  Halved Times:             {}", self.halved_times)?;
        writeln!(f, "  Last Halved Block Number: {}", self.last_halved_block_number)?;
        writeln!(f, "  Last Mine Time:           {}", self.last_mine_time)?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliMinedInfo {
    pub address: String,
    pub winner_address: String,
    pub block_number: u64,
    pub reward_sent: u64,
    pub time_stamp: i64,
}

impl CliMinedInfo {
    pub fn new(address: &Pubkey, mined_info: &MinedInfo) -> Self {
        Self {
            address: address.to_string(),
            winner_address: mined_info.winner_address.to_string(),
            block_number: mined_info.block_number,
            reward_sent: mined_info.reward_sent,
            time_stamp: mined_info.time_stamp,
        }
    }

    fn integers(&self) -> [(&'static str, u64); 3] {
        [
            ("blockNumber", self.block_number),
            ("rewardSent", self.reward_sent),
            ("timeStamp", self.time_stamp.unsigned_abs()),
        ]
    }
}

impl QuietDisplay for CliMinedInfo {}
impl VerboseDisplay for CliMinedInfo {}

impl fmt::Display for CliMinedInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Block {}", self.block_number)?;
        writeln!(f, "  Address:      {}", self.address)?;
        writeln!(f, "  Winner:       {}", self.winner_address)?;
        writeln!(f, "  Reward Sent:  {}", self.reward_sent)?;
        writeln!(f, "  Time Stamp:   {}", self.time_stamp)?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliMinedInfoList {
    pub blocks: Vec<CliMinedInfo>,
}

impl QuietDisplay for CliMinedInfoList {}
impl VerboseDisplay for CliMinedInfoList {}

impl fmt::Display for CliMinedInfoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.blocks.is_empty() {
            return writeln!(f, "No mined blocks found");
        }
        writeln!(f, "{} mined block(s)", self.blocks.len())?;
        for block in &self.blocks {
            writeln!(f)?;
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

/// Printed by the status queries when the address holds no account.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliAccountNotFound {
    pub address: String,
    pub account_type: String,
}

impl QuietDisplay for CliAccountNotFound {}
impl VerboseDisplay for CliAccountNotFound {}

impl fmt::Display for CliAccountNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "No {} account found at {}", self.account_type, self.address)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliSignature {
    pub signature: String,
}

impl CliSignature {
    pub fn new(signature: &Signature) -> Self {
        Self {
            signature: signature.to_string(),
        }
    }
}

impl QuietDisplay for CliSignature {}
impl VerboseDisplay for CliSignature {}

impl fmt::Display for CliSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Signature: {}", self.signature)
    }
}

/// Whether `value` survives a round trip through a double-based JSON reader.
pub fn fits_json_number(value: u64) -> bool {
    value <= MAX_SAFE_JSON_INTEGER
}

fn warn_json_precision(output_format: &OutputFormat, fields: &[(&'static str, u64)]) {
    if !matches!(output_format, OutputFormat::Json | OutputFormat::JsonCompact) {
        return;
    }
    for (name, value) in fields {
        if !fits_json_number(*value) {
            warn!(
                "{name} = {value} is above 2^53 - 1; JavaScript JSON readers will lose \
                 precision"
            );
        }
    }
}

// ── Subcommand Definition (clap) ────────────────────────────────────
pub trait DistributionSubCommands {
    fn distribution_subcommands(self) -> Self;
}

impl DistributionSubCommands for App<'_, '_> {
    fn distribution_subcommands(self) -> Self {
        self.setting(AppSettings::SubcommandRequiredElseHelp)
            .subcommand(
                SubCommand::with_name("global_status")
                    .about("Display the program's global account"),
            )
            .subcommand(
                SubCommand::with_name("mined_block")
                    .about("Display the record of one mined block")
                    .arg(
                        Arg::with_name("block_number")
                            .long("block_number")
                            .short("n")
                            .value_name("BLOCK_NUMBER")
                            .takes_value(true)
                            .required(true)
                            .validator(is_parsable::<u64>)
                            .help("Block number to look up"),
                    ),
            )
            .subcommand(
                SubCommand::with_name("get_all_blocks")
                    .about("Display the records of every mined block"),
            )
            .subcommand(
                SubCommand::with_name("init_global")
                    .about("Create the global account. The signer becomes the admin")
                    .arg(pubkey!(
                        Arg::with_name("caller")
                            .long("caller")
                            .short("c")
                            .value_name("CALLER_ADDRESS")
                            .required(true),
                        "Address allowed to submit mined blocks."
                    ))
                    .arg(
                        Arg::with_name("start_block")
                            .long("start_block")
                            .short("s")
                            .value_name("BLOCK_NUMBER")
                            .takes_value(true)
                            .required(true)
                            .validator(is_parsable::<u64>)
                            .help("Block number the reward schedule starts from"),
                    ),
            )
            .subcommand(
                SubCommand::with_name("update_caller")
                    .about("Replace the caller address. Must be signed by the admin")
                    .arg(pubkey!(
                        Arg::with_name("caller")
                            .long("caller")
                            .short("c")
                            .value_name("CALLER_ADDRESS")
                            .required(true),
                        "New address allowed to submit mined blocks."
                    )),
            )
            .subcommand(
                SubCommand::with_name("mine_block")
                    .about("Record a mined block and pay its reward. Must be signed by the caller")
                    .arg(
                        Arg::with_name("block_number")
                            .long("block_number")
                            .short("b")
                            .value_name("BLOCK_NUMBER")
                            .takes_value(true)
                            .required(true)
                            .validator(is_parsable::<u64>)
                            .help("Block number being rewarded"),
                    )
                    .arg(pubkey!(
                        Arg::with_name("winner")
                            .long("winner")
                            .short("w")
                            .value_name("WINNER_ADDRESS")
                            .required(true),
                        "Wallet receiving the block reward."
                    ))
                    .arg(pubkey!(
                        Arg::with_name("reward_mint")
                            .long("reward_mint")
                            .value_name("MINT_ADDRESS"),
                        "Reward token mint [default: the program's reward mint]."
                    )),
            )
    }
}

// ── Argument Parsing ────────────────────────────────────────────────
fn required_pubkey(matches: &ArgMatches<'_>, name: &str) -> Result<Pubkey, CliError> {
    pubkey_of(matches, name).ok_or_else(|| CliError::BadParameter(format!("missing --{name}")))
}

fn required_u64(matches: &ArgMatches<'_>, name: &str) -> Result<u64, CliError> {
    value_of(matches, name).ok_or_else(|| CliError::BadParameter(format!("missing --{name}")))
}

pub fn parse_distribution_command(
    matches: &ArgMatches<'_>,
    default_signer: &DefaultSigner,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> Result<CliCommandInfo, CliError> {
    let command = match matches.subcommand() {
        ("global_status", Some(_)) => CliCommand::GlobalStatus,
        ("mined_block", Some(matches)) => CliCommand::MinedBlock {
            block_number: required_u64(matches, "block_number")?,
        },
        ("get_all_blocks", Some(_)) => CliCommand::GetAllBlocks,
        ("init_global", Some(matches)) => CliCommand::InitGlobal {
            caller: required_pubkey(matches, "caller")?,
            start_block: required_u64(matches, "start_block")?,
        },
        ("update_caller", Some(matches)) => CliCommand::UpdateCaller {
            caller: required_pubkey(matches, "caller")?,
        },
        ("mine_block", Some(matches)) => CliCommand::MineBlock {
            block_number: required_u64(matches, "block_number")?,
            winner: required_pubkey(matches, "winner")?,
            reward_mint: pubkey_of(matches, "reward_mint").unwrap_or(REWARD_TOKEN_MINT),
        },
        (name, _) => {
            return Err(CliError::BadParameter(format!(
                "unknown subcommand: {name}"
            )))
        }
    };

    if !command.requires_signer() {
        return Ok(CliCommandInfo::without_signers(command));
    }
    let signer = default_signer
        .signer_from_path(matches, wallet_manager)
        .map_err(|err| CliError::KeypairError(err.to_string()))?;
    Ok(CliCommandInfo {
        command,
        signers: vec![signer],
    })
}

// ── Command Processing ──────────────────────────────────────────────
pub async fn process_distribution_command(
    rpc_client: &Arc<RpcClient>,
    config: &CliConfig<'_>,
    command: &CliCommand,
) -> ProcessResult {
    match command {
        CliCommand::GlobalStatus => process_global_status(rpc_client, config).await,
        CliCommand::MinedBlock { block_number } => {
            process_mined_block(rpc_client, config, *block_number).await
        }
        CliCommand::GetAllBlocks => process_get_all_blocks(rpc_client, config).await,
        CliCommand::InitGlobal {
            caller,
            start_block,
        } => process_init_global(rpc_client, config, caller, *start_block).await,
        CliCommand::UpdateCaller { caller } => {
            process_update_caller(rpc_client, config, caller).await
        }
        CliCommand::MineBlock {
            block_number,
            winner,
            reward_mint,
        } => process_mine_block(rpc_client, config, *block_number, winner, reward_mint).await,
    }
}

async fn process_global_status(rpc_client: &Arc<RpcClient>, config: &CliConfig<'_>) -> ProcessResult {
    let (address, _) = find_global_address(&config.program_id)?;
    match fetch_global_info(rpc_client, &config.program_id, config.commitment).await? {
        Some(global) => {
            let global = CliGlobalInfo::new(&address, &global);
            warn_json_precision(&config.output_format, &global.integers());
            Ok(config.output_format.formatted_string(&global))
        }
        None => Ok(config.output_format.formatted_string(&CliAccountNotFound {
            address: address.to_string(),
            account_type: "global".to_string(),
        })),
    }
}

async fn process_mined_block(
    rpc_client: &Arc<RpcClient>,
    config: &CliConfig<'_>,
    block_number: u64,
) -> ProcessResult {
    let (address, _) = find_mined_info_address(block_number, &config.program_id)?;
    match fetch_mined_info(rpc_client, block_number, &config.program_id, config.commitment).await? {
        Some(mined_info) => {
            let mined_info = CliMinedInfo::new(&address, &mined_info);
            warn_json_precision(&config.output_format, &mined_info.integers());
            Ok(config.output_format.formatted_string(&mined_info))
        }
        None => Ok(config.output_format.formatted_string(&CliAccountNotFound {
            address: address.to_string(),
            account_type: format!("mined info (block {block_number})"),
        })),
    }
}

async fn process_get_all_blocks(rpc_client: &Arc<RpcClient>, config: &CliConfig<'_>) -> ProcessResult {
    let accounts = fetch_all_mined_info(rpc_client, &config.program_id, config.commitment).await?;
    let mut blocks: Vec<CliMinedInfo> = accounts
        .iter()
        .map(|(address, mined_info)| CliMinedInfo::new(address, mined_info))
        .collect();
    blocks.sort_by_key(|block| block.block_number);
    for block in &blocks {
        warn_json_precision(&config.output_format, &block.integers());
    }
    Ok(config
        .output_format
        .formatted_string(&CliMinedInfoList { blocks }))
}

async fn process_init_global(
    rpc_client: &Arc<RpcClient>,
    config: &CliConfig<'_>,
    caller: &Pubkey,
    start_block: u64,
) -> ProcessResult {
    let admin = config.fee_payer()?;
    info!("Initializing global account: admin {admin}, caller {caller}, start block {start_block}");
    let instruction = initialize(&admin, caller, start_block, &config.program_id)?;
    let signature = send_instructions(rpc_client, config, &[instruction], false).await?;
    Ok(config
        .output_format
        .formatted_string(&CliSignature::new(&signature)))
}

async fn process_update_caller(
    rpc_client: &Arc<RpcClient>,
    config: &CliConfig<'_>,
    caller: &Pubkey,
) -> ProcessResult {
    let admin = config.fee_payer()?;
    info!("Updating caller to {caller}");
    let instruction = update_caller_address(&admin, caller, &config.program_id)?;
    let signature = send_instructions(rpc_client, config, &[instruction], false).await?;
    Ok(config
        .output_format
        .formatted_string(&CliSignature::new(&signature)))
}

/// Looks up the winner's reward token account and returns the instructions
/// that reward block `block_number` to `winner`.
pub async fn build_mine_block_instructions(
    rpc_client: &RpcClient,
    config: &CliConfig<'_>,
    block_number: u64,
    winner: &Pubkey,
    reward_mint: &Pubkey,
) -> Result<Vec<Instruction>, CliError> {
    let caller = config.fee_payer()?;
    let winner_token_account = get_reward_token_account(winner, reward_mint);
    let existing_owner = rpc_client
        .get_account_with_commitment(&winner_token_account, config.commitment)
        .await?
        .value
        .map(|account| account.owner);
    debug!(
        "Winner token account {winner_token_account} owner: {}",
        existing_owner.map_or_else(|| "none".to_string(), |owner| owner.to_string())
    );

    Ok(mine_block_instructions(
        &caller,
        winner,
        block_number,
        reward_mint,
        existing_owner.as_ref(),
        &config.program_id,
    )?)
}

async fn process_mine_block(
    rpc_client: &Arc<RpcClient>,
    config: &CliConfig<'_>,
    block_number: u64,
    winner: &Pubkey,
    reward_mint: &Pubkey,
) -> ProcessResult {
    let instructions =
        build_mine_block_instructions(rpc_client, config, block_number, winner, reward_mint)
            .await?;
    info!("Mining block {block_number} for {winner}");
    let signature = send_instructions(rpc_client, config, &instructions, true).await?;
    Ok(config
        .output_format
        .formatted_string(&CliSignature::new(&signature)))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::clap_app::get_clap_app,
        assert_matches::assert_matches,
        distribution_interface::id,
        serde_json::{json, Value},
        solana_commitment_config::CommitmentConfig,
        solana_keypair::{write_keypair_file, Keypair},
        solana_rpc_client::mock_sender::Mocks,
        solana_rpc_client_api::request::RpcRequest,
        solana_signer::Signer,
        std::time::Duration,
        test_case::test_case,
    };

    const TOKEN_2022: Pubkey = solana_pubkey::pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

    fn mock_config<'a>(command: CliCommand, signer: &'a dyn Signer) -> CliConfig<'a> {
        CliConfig {
            command,
            json_rpc_url: "succeeds".to_string(),
            signers: vec![signer],
            program_id: id(),
            commitment: CommitmentConfig::confirmed(),
            output_format: OutputFormat::Display,
            rpc_timeout: Duration::from_secs(30),
            confirm_transaction_initial_timeout: Duration::from_secs(5),
        }
    }

    fn account_info_mock(owner: Option<&Pubkey>) -> Arc<RpcClient> {
        let value = owner.map_or(Value::Null, |owner| {
            json!({
                "lamports": 2_074_080,
                "data": ["", "base64"],
                "owner": owner.to_string(),
                "executable": false,
                "rentEpoch": 0,
                "space": 0,
            })
        });
        let mut mocks = Mocks::default();
        mocks.insert(
            RpcRequest::GetAccountInfo,
            json!({ "context": { "slot": 1 }, "value": value }),
        );
        Arc::new(RpcClient::new_mock_with_mocks("succeeds".to_string(), mocks))
    }

    fn make_tmp_path(name: &str) -> String {
        let out_dir = std::env::var("FARF_DIR").unwrap_or_else(|_| "farf".to_string());
        let keypair = Keypair::new();
        let path = format!("{}/tmp/{}-{}", out_dir, name, keypair.pubkey());
        let _ignored = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    fn parse(args: &[&str], default_keypair_file: &str) -> Result<CliCommandInfo, CliError> {
        let app = get_clap_app("test", "desc", "version");
        let matches = app.get_matches_from_safe(args).unwrap();
        let default_signer = DefaultSigner::new("keypair", default_keypair_file);
        parse_distribution_command(&matches, &default_signer, &mut None)
    }

    #[test]
    fn test_parse_queries() {
        assert_eq!(
            parse(&["test", "global_status"], "").unwrap().command,
            CliCommand::GlobalStatus
        );
        assert_eq!(
            parse(&["test", "mined_block", "-n", "42"], "").unwrap().command,
            CliCommand::MinedBlock { block_number: 42 }
        );
        assert_eq!(
            parse(&["test", "mined_block", "--block_number", "7"], "")
                .unwrap()
                .command,
            CliCommand::MinedBlock { block_number: 7 }
        );
        let info = parse(&["test", "get_all_blocks"], "").unwrap();
        assert_eq!(info.command, CliCommand::GetAllBlocks);
        assert!(info.signers.is_empty());
    }

    #[test]
    fn test_parse_transaction_commands() {
        let default_keypair = Keypair::new();
        let keypair_file = format!("{}/keypair.json", make_tmp_path("distribution_parse"));
        write_keypair_file(&default_keypair, &keypair_file).unwrap();
        let caller = Pubkey::new_from_array([7; 32]);
        let caller_string = caller.to_string();

        let info = parse(
            &["test", "init_global", "-c", &caller_string, "-s", "100"],
            &keypair_file,
        )
        .unwrap();
        assert_eq!(
            info.command,
            CliCommand::InitGlobal {
                caller,
                start_block: 100
            }
        );
        assert_eq!(info.signers.len(), 1);
        assert_eq!(info.signers[0].pubkey(), default_keypair.pubkey());

        let info = parse(
            &["test", "update_caller", "--caller", &caller_string],
            &keypair_file,
        )
        .unwrap();
        assert_eq!(info.command, CliCommand::UpdateCaller { caller });

        let info = parse(
            &["test", "mine_block", "-b", "42", "-w", &caller_string],
            &keypair_file,
        )
        .unwrap();
        assert_eq!(
            info.command,
            CliCommand::MineBlock {
                block_number: 42,
                winner: caller,
                reward_mint: REWARD_TOKEN_MINT,
            }
        );

        let mint = Pubkey::new_from_array([9; 32]);
        let info = parse(
            &[
                "test",
                "mine_block",
                "--block_number",
                "42",
                "--winner",
                &caller_string,
                "--reward_mint",
                &mint.to_string(),
            ],
            &keypair_file,
        )
        .unwrap();
        assert_matches!(
            info.command,
            CliCommand::MineBlock { reward_mint, .. } if reward_mint == mint
        );
    }

    #[test]
    fn test_parse_missing_keypair() {
        let caller = Pubkey::new_from_array([7; 32]).to_string();
        assert_matches!(
            parse(
                &["test", "update_caller", "-c", &caller],
                "/nonexistent/keypair.json"
            ),
            Err(CliError::KeypairError(_))
        );
    }

    #[test_case(&["test", "mined_block", "-n", "forty-two"]; "non numeric block number")]
    #[test_case(&["test", "mined_block"]; "missing block number")]
    #[test_case(&["test", "init_global", "-s", "1"]; "missing caller")]
    #[test_case(&["test", "update_caller", "-c", "not-a-pubkey"]; "invalid caller")]
    #[test_case(&["test", "mine_block", "-b", "1"]; "missing winner")]
    #[test_case(&["test"]; "missing subcommand")]
    fn test_rejected_arguments(args: &[&str]) {
        let app = get_clap_app("test", "desc", "version");
        assert!(app.get_matches_from_safe(args).is_err());
    }

    #[test]
    fn test_cli_global_info_json() {
        let global = GlobalInfo {
            admin: Pubkey::new_from_array([0xA; 32]),
            caller: Pubkey::new_from_array([0xB; 32]),
            current_reward: 1_000,
            halved_times: 2,
            last_halved_block_number: 500,
            last_mine_time: 1_700_000_000,
        };
        let address = Pubkey::new_from_array([1; 32]);
        let value = serde_json::to_value(CliGlobalInfo::new(&address, &global)).unwrap();
        assert_eq!(value["admin"], global.admin.to_string());
        assert_eq!(value["currentReward"], 1_000);
        assert_eq!(value["halvedTimes"], 2);
        assert_eq!(value["lastHalvedBlockNumber"], 500);
        assert_eq!(value["lastMineTime"], 1_700_000_000);
    }

    #[test]
    fn test_cli_mined_info_list_display() {
        assert_eq!(
            CliMinedInfoList::default().to_string(),
            "No mined blocks found\n"
        );

        let mined_info = MinedInfo {
            winner_address: Pubkey::new_from_array([4; 32]),
            block_number: 42,
            reward_sent: 50,
            time_stamp: 1_700_000_000,
        };
        let list = CliMinedInfoList {
            blocks: vec![CliMinedInfo::new(&Pubkey::new_from_array([1; 32]), &mined_info)],
        };
        let text = list.to_string();
        assert!(text.starts_with("1 mined block(s)\n"));
        assert!(text.contains("Block 42"));

        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["blocks"][0]["blockNumber"], 42);
        assert_eq!(value["blocks"][0]["rewardSent"], 50);
        assert_eq!(value["blocks"][0]["timeStamp"], 1_700_000_000);
    }

    #[test_case(0, true)]
    #[test_case(MAX_SAFE_JSON_INTEGER, true)]
    #[test_case(9_007_199_254_740_992, false)]
    #[test_case(u64::MAX, false)]
    fn test_fits_json_number(value: u64, expected: bool) {
        assert_eq!(fits_json_number(value), expected);
    }

    #[test_case(Some(TOKEN_2022), 1; "existing token account")]
    #[test_case(None, 2; "missing token account")]
    #[test_case(Some(Pubkey::new_from_array([9; 32])), 2; "foreign owner")]
    #[tokio::test]
    async fn test_build_mine_block_instructions(owner: Option<Pubkey>, expected: usize) {
        let caller = Keypair::new();
        let winner = Pubkey::new_from_array([3; 32]);
        let config = mock_config(CliCommand::GlobalStatus, &caller);
        let rpc_client = account_info_mock(owner.as_ref());

        let instructions =
            build_mine_block_instructions(&rpc_client, &config, 42, &winner, &REWARD_TOKEN_MINT)
                .await
                .unwrap();
        assert_eq!(instructions.len(), expected);
        let mine = instructions.last().unwrap();
        assert_eq!(mine.program_id, id());
        assert_eq!(mine.accounts[0].pubkey, caller.pubkey());
        if expected == 2 {
            assert_ne!(instructions[0].program_id, id());
        }
    }

    #[tokio::test]
    async fn test_process_mine_block() {
        let caller = Keypair::new();
        let command = CliCommand::MineBlock {
            block_number: 42,
            winner: Pubkey::new_from_array([3; 32]),
            reward_mint: REWARD_TOKEN_MINT,
        };
        let config = mock_config(command, &caller);
        let rpc_client = account_info_mock(None);

        let output = process_distribution_command(&rpc_client, &config, &config.command)
            .await
            .unwrap();
        assert!(output.starts_with("Signature: "), "{output}");
    }

    #[tokio::test]
    async fn test_process_global_status_missing() {
        let caller = Keypair::new();
        let config = mock_config(CliCommand::GlobalStatus, &caller);
        let rpc_client = account_info_mock(None);

        let output = process_distribution_command(&rpc_client, &config, &config.command)
            .await
            .unwrap();
        assert!(output.starts_with("No global account found"), "{output}");
    }
}
