/// Auth command
pub(crate) mod auth;
