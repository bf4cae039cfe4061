use {
    clap::{crate_description, crate_name, crate_version, value_t_or_exit, ArgMatches},
    distribution_cli::{
        clap_app::get_clap_app,
        cli::{
            load_config, parse_command, process_command, CliCommandInfo, CliConfig, CliSigners,
            DEFAULT_LOG_FILTER,
        },
    },
    log::debug,
    solana_clap_utils::{input_parsers::pubkey_of, keypair::DefaultSigner},
    solana_cli_config::ConfigInput,
    solana_cli_output::OutputFormat,
    solana_remote_wallet::remote_wallet::RemoteWalletManager,
    std::{error, rc::Rc, time::Duration},
};

pub fn parse_args<'a>(
    matches: &ArgMatches<'_>,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> Result<(CliConfig<'a>, CliSigners), Box<dyn error::Error>> {
    let config = load_config(matches.value_of("config_file"));
    let (_, json_rpc_url) = ConfigInput::compute_json_rpc_url_setting(
        matches.value_of("json_rpc_url").unwrap_or(""),
        &config.json_rpc_url,
    );
    let (_, default_signer_path) = ConfigInput::compute_keypair_path_setting(
        matches.value_of("keypair").unwrap_or(""),
        &config.keypair_path,
    );
    let (_, commitment) = ConfigInput::compute_commitment_config(
        matches.value_of("commitment").unwrap_or(""),
        &config.commitment,
    );

    let rpc_timeout = value_t_or_exit!(matches, "rpc_timeout", u64);
    let confirm_transaction_initial_timeout =
        value_t_or_exit!(matches, "confirm_transaction_initial_timeout", u64);
    let program_id = pubkey_of(matches, "program_id").unwrap_or_else(distribution_interface::id);
    let output_format = OutputFormat::from_matches(matches, "output_format", false);

    let default_signer = DefaultSigner::new("keypair", default_signer_path);
    let CliCommandInfo { command, signers } =
        parse_command(matches, &default_signer, wallet_manager)?;
    debug!("Parsed command: {command:?}");

    Ok((
        CliConfig {
            command,
            json_rpc_url,
            signers: vec![],
            program_id,
            commitment,
            output_format,
            rpc_timeout: Duration::from_secs(rpc_timeout),
            confirm_transaction_initial_timeout: Duration::from_secs(
                confirm_transaction_initial_timeout,
            ),
        },
        signers,
    ))
}

fn main() -> Result<(), Box<dyn error::Error>> {
    agave_logger::setup_with_default(DEFAULT_LOG_FILTER);
    let matches = get_clap_app(crate_name!(), crate_description!(), crate_version!()).get_matches();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(do_main(&matches))
}

async fn do_main(matches: &ArgMatches<'_>) -> Result<(), Box<dyn error::Error>> {
    let mut wallet_manager = None;
    let (mut config, signers) = parse_args(matches, &mut wallet_manager)?;
    config.signers = signers.iter().map(|s| s.as_ref()).collect();
    let result = process_command(&config).await?;
    println!("{result}");
    Ok(())
}
