use clap::Parser;
use sealink_cli::commands;
use sealink_cli::config::{Cli, Command};
use sealink_logging::SealinkSubscriberBuilder;
use sealink_session::{FileKind, format_file_size};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _log_guard = SealinkSubscriberBuilder::new()
        .with_config(cli.log_config())
        .init();

    match cli.command {
        Command::Share {
            file,
            base_url,
            mime,
            max_size,
        } => {
            let link = commands::share(&file, &base_url, mime.as_deref(), max_size)?;
            println!("{}", link);
        }

        Command::Receive { link, out } => {
            let path = commands::receive(&link, &out)?;
            eprintln!("Saved {}", path.display());
        }

        Command::Inspect { link } => {
            let meta = commands::inspect(&link)?;
            println!("Name: {}", meta.name);
            println!("Type: {} ({})", meta.mime_type, FileKind::from_mime(&meta.mime_type));
            println!("Size: {}", format_file_size(meta.size_bytes));
        }
    }

    Ok(())
}
