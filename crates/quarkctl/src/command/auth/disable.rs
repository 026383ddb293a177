use clap::{ArgMatches, Command};
use quark_client::{error::Result, Client};

use crate::utils::{parser::command_timeout, printer::Printer};

/// Definition of `disable` command
pub(super) fn command() -> Command {
    Command::new("disable").about("Disable authentication")
}

/// Execute the command
pub(super) async fn execute(client: &mut Client, matches: &ArgMatches) -> Result<()> {
    let resp = client
        .auth_client()
        .auth_disable(command_timeout(matches))
        .await?;
    resp.print();

    Ok(())
}
