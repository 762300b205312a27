use clap::Parser;
use promptshelf_cli::{CliArgs, PromptshelfCli};

#[tokio::main]
async fn main() -> promptshelf_core::Result<()> {
    let args = CliArgs::parse();
    let cli = PromptshelfCli::from_args("promptshelf", &args)?;
    cli.run(args).await
}
