/// Generate match handler for each command
#[macro_export]
macro_rules! handle_matches {
    ($matches:ident, $client:ident, { $($cmd:ident),* }) => {
        match $matches.subcommand() {
            $(Some((stringify!($cmd), sub_matches)) => {
                $cmd::execute(&mut $client, sub_matches).await?;
            })*
            _ => {},
        }
    };
}
