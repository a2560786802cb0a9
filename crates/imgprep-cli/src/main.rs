use imgprep_lib::cli::{ResolvedCommand, parse_args, resolve_command, run_download, run_plan};
use imgprep_lib::error::ImgPrepError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ImgPrepError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        // Per-image failures are reported in the log; the run itself still succeeds.
        ResolvedCommand::Download(params) => {
            run_download(params).await?;
        }
        ResolvedCommand::Plan(params) => run_plan(params, &mut std::io::stdout().lock())?,
    }

    Ok(())
}
