pub(crate) mod check;
pub(crate) mod completions;
pub(crate) mod index;
pub(crate) mod init;
pub(crate) mod report;

use anyhow::Result;
use devindex_config as cli;

pub(crate) fn dispatch(cli: cli::Cli) -> Result<()> {
    let global = &cli.global;
    match cli.command {
        cli::Commands::Completions(args) => completions::handle(args),
        cli::Commands::Init(args) => init::handle(args),
        cli::Commands::Check(args) => check::handle(args, global),
        cli::Commands::Index(args) => index::handle(args, global),
        cli::Commands::Report(args) => report::handle(args, global),
    }
}
