use std::io;
use std::os::fd::AsRawFd;

use clap::Parser;
use llm::{
    cli::Args,
    config::Config,
    credential::CredentialResolver,
    errors::LlmError,
    gemini::GeminiClient,
    logging,
    session::{run_help, run_prompt},
};
use tracing::debug;

fn main() {
    let args = Args::parse();
    logging::init(&mut io::stderr());

    let res = run(args);
    res.unwrap_or_else(|e| {
        if !e.is_fatal() {
            eprintln!("{}", e);
            return;
        }
        debug!(error = ?e, "exiting after fatal error");
        eprintln!("{}", e);
        std::process::exit(1);
    });
}

fn run(args: Args) -> Result<(), LlmError> {
    let cfg = Config::from_env();
    let resolver = CredentialResolver::from_config(&cfg);
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();

    if args.help {
        return run_help(
            cfg.help_mode,
            &resolver,
            || GeminiClient::from_config(&cfg),
            &mut stdout,
            &mut stderr,
        );
    }

    let stdin = io::stdin();
    // stdin is a terminal, meaning input was not piped in
    let interactive = nix::unistd::isatty(stdin.as_raw_fd()).unwrap_or(false);
    run_prompt(
        &resolver,
        || GeminiClient::from_config(&cfg),
        args.prompt,
        stdin.lock(),
        interactive,
        &mut stdout,
        &mut stderr,
    )
}
