use std::time::Duration;

use anyhow::{bail, Result};
use clap::ArgMatches;

/// Parse the user name and password from the global `--user` and
/// `--password` options. The `name:password` shorthand in `--user` takes
/// precedence over `--password`.
pub(crate) fn parse_user(matches: &ArgMatches) -> Result<Option<(String, String)>> {
    let Some(user_pw) = matches.get_one::<String>("user") else {
        return Ok(None);
    };
    let mut split = user_pw.split(':');
    let name = split.next().expect("split should yield at least one item");
    if let Some(password) = split.next() {
        return Ok(Some((name.to_owned(), password.to_owned())));
    }
    let Some(password) = matches.get_one::<String>("password") else {
        bail!("password not set in `--user` or `--password`");
    };
    Ok(Some((name.to_owned(), password.clone())))
}

/// The per-call deadline, taken from the global `--command_timeout`
pub(crate) fn command_timeout(matches: &ArgMatches) -> Duration {
    Duration::from_secs(*matches.get_one("command_timeout").expect("Required"))
}
