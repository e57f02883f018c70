#![deny(warnings)]

use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use replysheet::{
    infrastructure::{cli::Cli, command::HostCommand, config::Config},
    presentation::sheet::SheetView,
    utils::{initialize_logging, initialize_panic_handler},
    ModalRuntime, ModalSnapshot,
};

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    let config = Config::new()?;
    let mut timing = config.modal.timing();
    if let Some(ms) = args.settle_ms {
        timing.settle_delay = Duration::from_millis(ms);
    }
    tracing::info!(?timing, "starting reply sheet host");

    let (handle, join) = ModalRuntime::spawn(timing);

    let view = SheetView::new(args.json);
    handle.add_observer(move |snapshot: &ModalSnapshot| match view.render(snapshot) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::error!("failed to render snapshot: {e}"),
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<HostCommand>() {
            Ok(HostCommand::Open(subject)) => handle.enable(subject),
            Ok(HostCommand::Dismiss) => handle.disable(),
            Ok(HostCommand::Wait(duration)) => tokio::time::sleep(duration).await,
            Ok(HostCommand::Show) => {
                if let Some(snapshot) = handle.flush().await {
                    println!("{}", view.render(&snapshot)?);
                }
            }
            Ok(HostCommand::Quit) => break,
            Err(e) => eprintln!("{e}"),
        }
    }

    handle.shutdown();
    join.await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
