use clap::{ArgMatches, Command};
use quark_client::{error::Result, Client};

use crate::utils::{parser::command_timeout, printer::Printer};

/// Definition of `enable` command
pub(super) fn command() -> Command {
    Command::new("enable").about("Enable authentication")
}

/// Execute the command
pub(super) async fn execute(client: &mut Client, matches: &ArgMatches) -> Result<()> {
    let resp = client
        .auth_client()
        .auth_enable(command_timeout(matches))
        .await?;
    resp.print();

    Ok(())
}
