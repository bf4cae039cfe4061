//! Wraps instructions into a signed transaction, submits it and waits for
//! confirmation. Nothing here retries; every failure ends the command.

use {
    crate::cli::{CliConfig, CliError},
    distribution_interface::error::DistributionError,
    log::{info, warn},
    solana_commitment_config::CommitmentConfig,
    solana_hash::Hash,
    solana_instruction::{error::InstructionError, Instruction},
    solana_pubkey::Pubkey,
    solana_rpc_client::nonblocking::rpc_client::RpcClient,
    solana_rpc_client_api::client_error::Error as ClientError,
    solana_signature::Signature,
    solana_signer::Signer,
    solana_transaction::Transaction,
    solana_transaction_error::TransactionError,
};

/// Builds a transaction paid by the first signer and signs it with all of
/// them against `blockhash`.
pub fn sign_transaction(
    instructions: &[Instruction],
    signers: &[&dyn Signer],
    blockhash: Hash,
) -> Result<Transaction, CliError> {
    let fee_payer = signers.first().ok_or(CliError::MissingSigner)?.pubkey();
    let mut transaction = Transaction::new_with_payer(instructions, Some(&fee_payer));
    transaction.try_sign(signers, blockhash)?;
    Ok(transaction)
}

/// Signs and submits `instructions` as one transaction, then blocks until
/// the cluster reports it `confirmed`.
///
/// With `simulate_first` the signed transaction is simulated before
/// submission. A failed simulation aborts the send and its program logs are
/// logged as warnings.
pub async fn send_instructions(
    rpc_client: &RpcClient,
    config: &CliConfig<'_>,
    instructions: &[Instruction],
    simulate_first: bool,
) -> Result<Signature, CliError> {
    let (blockhash, _) = rpc_client
        .get_latest_blockhash_with_commitment(CommitmentConfig::confirmed())
        .await?;
    let transaction = sign_transaction(instructions, &config.signers, blockhash)?;

    if simulate_first {
        let result = rpc_client.simulate_transaction(&transaction).await?.value;
        let logs = result.logs.unwrap_or_default();
        if let Some(err) = result.err {
            for log in logs {
                warn!("{log}");
            }
            let err = TransactionError::from(err);
            return Err(program_error(&err, instructions, &config.program_id)
                .unwrap_or_else(|| CliError::SimulationFailed(err.to_string())));
        }
        for log in logs {
            info!("{log}");
        }
    }

    let signature = rpc_client
        .send_transaction(&transaction)
        .await
        .map_err(|err| map_client_error(err, instructions, &config.program_id))?;
    info!("Submitted transaction {signature}");

    rpc_client
        .confirm_transaction_with_spinner(&signature, &blockhash, CommitmentConfig::confirmed())
        .await
        .map_err(|err| map_client_error(err, instructions, &config.program_id))?;
    Ok(signature)
}

/// Surfaces the distribution program's own error when it is the one that
/// rejected the transaction.
fn map_client_error(err: ClientError, instructions: &[Instruction], program_id: &Pubkey) -> CliError {
    match err
        .get_transaction_error()
        .and_then(|tx_err| program_error(&tx_err, instructions, program_id))
    {
        Some(cli_err) => cli_err,
        None => {
            warn!("Transaction failed: {err}");
            CliError::ClientError(err)
        }
    }
}

fn program_error(
    err: &TransactionError,
    instructions: &[Instruction],
    program_id: &Pubkey,
) -> Option<CliError> {
    let TransactionError::InstructionError(index, InstructionError::Custom(code)) = err else {
        return None;
    };
    let failed = instructions.get(usize::from(*index))?;
    if failed.program_id != *program_id {
        return None;
    }
    DistributionError::from_custom_code(*code).map(|error| CliError::Program {
        index: *index,
        error,
    })
}
