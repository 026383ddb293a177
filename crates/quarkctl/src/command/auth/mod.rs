use clap::{ArgMatches, Command};
use quark_client::{error::Result, Client};

use crate::handle_matches;

/// Auth disable command
pub(super) mod disable;
/// Auth enable command
pub(super) mod enable;
/// Auth status command
pub(super) mod status;

/// Definition of `auth` command
pub(crate) fn command() -> Command {
    Command::new("auth")
        .about("Auth related commands")
        .subcommand(enable::command())
        .subcommand(disable::command())
        .subcommand(status::command())
}

/// Execute the command
pub(crate) async fn execute(mut client: &mut Client, matches: &ArgMatches) -> Result<()> {
    handle_matches!(matches, client, { enable, disable, status });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommands_should_parse_without_arguments() {
        for args in [["auth", "enable"], ["auth", "disable"], ["auth", "status"]] {
            assert!(
                command().try_get_matches_from(args).is_ok(),
                "the arg {args:?} should be valid"
            );
        }
    }

    #[test]
    fn subcommands_should_reject_positional_arguments() {
        for args in [
            ["auth", "enable", "foo"],
            ["auth", "disable", "foo"],
            ["auth", "status", "foo"],
        ] {
            assert!(
                command().try_get_matches_from(args).is_err(),
                "the arg {args:?} should be invalid"
            );
        }
    }
}
