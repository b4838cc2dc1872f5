//! deeplink-page binary entry point.

use std::io::Write;
use std::process::ExitCode;

use deeplink_page::{cli, config::Config, generate, generate_checked, logging};
use tracing::info;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> deeplink_page::Result<()> {
    let args = cli::parse_args()?;

    if args.help {
        cli::print_help();
        return Ok(());
    }
    if args.version {
        cli::print_version();
        return Ok(());
    }

    let config = Config::load(&args)?;
    logging::init_with_filter(config.log_filter()).ok();

    info!("deeplink-page v{}", env!("CARGO_PKG_VERSION"));

    let page = if config.output.strict {
        generate_checked(&config.page)?
    } else {
        generate(&config.page)
    };

    match config.output.path {
        Some(ref path) => {
            std::fs::write(path, &page)?;
            info!("Wrote {} bytes to {}", page.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(page.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
