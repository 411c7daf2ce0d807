//! Answering `-h`/`--help`.
//!
//! Usually that is the static [`USAGE`] line. With `INNOVATE` set, the model
//! is handed the program's own source and asked to write the help message.

use tracing::debug;

use crate::cli::USAGE;
use crate::credential::CredentialResolver;
use crate::errors::LlmError;
use crate::gemini::{generate, RequestService};
use crate::input::{PromptPart, PromptSequence};
use crate::response::extract;

/// Instruction sent ahead of the source code.
pub const HELP_PROMPT: &str = "The text that follows is the Rust source code of `llm`, a command line \
program that sends its arguments (or standard input) to a generative language model and prints \
the answer. Write the help message `llm --help` should print: a usage line, what each argument \
and `-` do, how standard input is used, and the environment variables and files it reads. \
Keep it short, plain text, suitable for a terminal.";

/// The source given to the model, embedded at build time.
pub const SOURCE: &str = concat!(
    "// src/main.rs\n",
    include_str!("main.rs"),
    "\n// src/cli.rs\n",
    include_str!("cli.rs"),
    "\n// src/config.rs\n",
    include_str!("config.rs"),
    "\n// src/credential.rs\n",
    include_str!("credential.rs"),
    "\n// src/input.rs\n",
    include_str!("input.rs"),
    "\n// src/session.rs\n",
    include_str!("session.rs"),
);

pub trait HelpComposer {
    fn compose(&self) -> Result<String, LlmError>;
}

/// The one-line usage synopsis.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticHelp;

impl HelpComposer for StaticHelp {
    fn compose(&self) -> Result<String, LlmError> {
        Ok(USAGE.to_string())
    }
}

/// Help written by the model from the program's source.
pub struct GeneratedHelp<'a, S: ?Sized> {
    resolver: &'a CredentialResolver,
    service: &'a S,
}

impl<'a, S: RequestService + ?Sized> GeneratedHelp<'a, S> {
    pub fn new(resolver: &'a CredentialResolver, service: &'a S) -> Self {
        Self { resolver, service }
    }

    /// Exactly two parts: the instruction, then the source.
    pub fn prompt() -> Result<PromptSequence, LlmError> {
        PromptSequence::try_from(vec![PromptPart::text(HELP_PROMPT), PromptPart::text(SOURCE)])
    }
}

impl<S: RequestService + ?Sized> HelpComposer for GeneratedHelp<'_, S> {
    fn compose(&self) -> Result<String, LlmError> {
        let credential = self.resolver.resolve()?;
        debug!(source_len = SOURCE.len(), "asking the model for help text");
        let response = generate(self.service, &credential, &Self::prompt()?)?;
        extract(&response)
    }
}
