/// Macro definitions
mod macros;
/// Parse definitions
pub(crate) mod parser;
/// Printer definitions
pub(crate) mod printer;
