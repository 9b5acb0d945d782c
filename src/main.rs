use anyhow::Result;
use clap::Parser;
use imgdex_caption::app::CaptionRequester;
use imgdex_caption::config::Config;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "imgdex-caption")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct CliArgs {
    /// Caption endpoint URL.
    #[arg(value_name = "URL", allow_hyphen_values = true)]
    url: String,

    /// Image file to send.
    #[arg(value_name = "FILE", allow_hyphen_values = true)]
    file: PathBuf,

    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    ignored: Vec<String>,
}

/// Parse arguments, or `None` for any usage error.
///
/// Every argument is positional; there are no flags, not even help.
fn parse_args<I, T>(args: I) -> Option<CliArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    CliArgs::try_parse_from(args).ok()
}

async fn caption(args: &CliArgs) -> imgdex_caption::Result<String> {
    let config = Config::from_env()?;
    let requester = CaptionRequester::from_config(&config)?;
    requester.run(&args.url, &args.file).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // stdout carries only the caption
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imgdex_caption=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    let Some(args) = parse_args(std::env::args_os()) else {
        return Ok(ExitCode::FAILURE);
    };
    if !args.ignored.is_empty() {
        debug!("Ignoring extra arguments: {:?}", args.ignored);
    }

    match caption(&args).await {
        Ok(caption) => {
            println!("{}", caption);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            debug!("Captioning {} failed: {:?}", args.file.display(), e);
            eprintln!("{}", e.diagnostic());
            Ok(ExitCode::FAILURE)
        }
    }
}
