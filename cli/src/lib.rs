macro_rules! ACCOUNT_STRING {
    () => {
        r#" Address is one of:
  * a base58-encoded public key
  * a path to a keypair file"#
    };
}

macro_rules! pubkey {
    ($arg:expr, $help:expr) => {
        $arg.takes_value(true)
            .validator(is_valid_pubkey)
            .help(concat!($help, ACCOUNT_STRING!()))
    };
}

pub mod clap_app;
pub mod cli;
pub mod distribution;
pub mod query;
pub mod send;
