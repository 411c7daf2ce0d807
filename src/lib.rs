//! # `llm`
//! Ask a generative language model from the command line.
//!
//! Each positional argument becomes one part of the prompt, in order. A lone
//! `-` stands for the content of standard input. With no arguments at all,
//! standard input is the whole prompt. The first answer is printed on stdout.
//!
//! ## Usage
//! These are the library crate documentation for `llm`. For usage of the binary see
//! ```shell
//! $ llm --help
//! $ llm "what is" "a monad"
//! $ git diff | llm "write a commit message for this diff:" -
//! ```
//!
//! ## Environment Variables:
//! - `API_KEY`: The API key. If unset or empty, the key is read from `~/.config/llm/key`.
//! - `INNOVATE`: Optional. Any non-empty value makes `--help` ask the model to
//!   explain the program from its own source instead of printing the usage line.
//! - `LLM_BASE_URL`: Optional. Base URL of the Generative Language API.
//! - `RUST_LOG`, `LOG_FORMAT`: Optional. Log filter and format (`pretty` or `json`), logs go to stderr.
//!
//! ## Notes:
//! - Standard input is read at most once. Repeating `-` repeats its content.
//! - The key file is used exactly as stored. Write it without a trailing newline,
//!   e.g. `printf %s "$KEY" > ~/.config/llm/key`.
//! - An empty or unusable answer prints `No response received` on stderr and
//!   still exits successfully.
//!
pub mod cli;
pub mod config;
pub mod credential;
pub mod errors;
pub mod gemini;
pub mod help;
pub mod input;
pub mod logging;
pub mod response;
pub mod session;
