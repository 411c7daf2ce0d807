use clap::Parser;

/// The model every request is sent to.
pub const MODEL: &str = "models/gemini-pro";
/// One-line usage printed by `-h`/`--help` unless `INNOVATE` is set.
pub const USAGE: &str = "usage: llm [-h|--help] [-V|--version] [ARG|-]...";

/// CLI for `llm`
///
/// `clap`'s own help flag is turned off so that `-h` can be answered by
/// [`crate::help`].
#[derive(Debug, Parser)]
#[command(name = "llm", version, about, disable_help_flag = true)]
pub struct Args {
    /// Print usage, or have the model explain the program when `INNOVATE` is set.
    #[arg(short, long)]
    pub help: bool,
    /// Prompt parts, in order. `-` reads standard input.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub prompt: Vec<String>,
}
