//! The two things `llm` does: answer a prompt, or answer `--help`.
//!
//! Both take their I/O handles, and a `connect` function producing the request
//! service, as arguments so the whole flow can run against in-memory buffers.
//! `connect` is only called once a request is actually going to be made.

use std::io::{Read, Write};

use tracing::info;

use crate::config::HelpMode;
use crate::credential::CredentialResolver;
use crate::errors::LlmError;
use crate::gemini::{generate, RequestService};
use crate::help::{GeneratedHelp, HelpComposer, StaticHelp};
use crate::input::InputAssembler;
use crate::response::extract;

/// Ask the model `prompt` and print its answer as one line on `out`.
///
/// `interactive` says whether `stdin` is a terminal. The interactive notice
/// goes to `err`.
pub fn run_prompt<S, C, R, O, E>(
    resolver: &CredentialResolver,
    connect: C,
    prompt: Vec<String>,
    stdin: R,
    interactive: bool,
    out: &mut O,
    err: &mut E,
) -> Result<(), LlmError>
where
    S: RequestService,
    C: FnOnce() -> Result<S, LlmError>,
    R: Read,
    O: Write,
    E: Write,
{
    let credential = resolver.resolve()?;
    let service = connect()?;
    let parts = InputAssembler::new(stdin, interactive, &mut *err).assemble(prompt)?;
    info!(part_count = parts.len(), "querying model");
    let response = generate(&service, &credential, &parts)?;
    let answer = extract(&response)?;
    writeln!(out, "{answer}")?;
    out.flush()?;
    Ok(())
}

/// Print help. Static usage goes to `err`; help written by the model is an
/// answer like any other and goes to `out`.
pub fn run_help<S, C, O, E>(
    mode: HelpMode,
    resolver: &CredentialResolver,
    connect: C,
    out: &mut O,
    err: &mut E,
) -> Result<(), LlmError>
where
    S: RequestService,
    C: FnOnce() -> Result<S, LlmError>,
    O: Write,
    E: Write,
{
    match mode {
        HelpMode::Static => {
            writeln!(err, "{}", StaticHelp.compose()?)?;
        }
        HelpMode::Generated => {
            let service = connect()?;
            let help = GeneratedHelp::new(resolver, &service).compose()?;
            writeln!(out, "{help}")?;
            out.flush()?;
        }
    }
    Ok(())
}
