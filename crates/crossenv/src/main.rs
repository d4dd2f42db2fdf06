mod cli;
mod config;
mod render;

use clap::Parser;
use cli::Args;
use config::Config;
use crossenv_platform::ExecutionContext;
use render::Renderer;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let ctx = match ExecutionContext::from_env() {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut renderer = Renderer::new(args.format.resolve(&ctx), std::io::stdout().lock());
    match run(&args, &ctx, &mut renderer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            renderer.fatal(&err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(args: &Args, ctx: &ExecutionContext, renderer: &mut Renderer<impl std::io::Write>) -> anyhow::Result<()> {
    crossenv_core::ensure_supported_host(ctx)?;
    let config = Config::load(ctx.work_dir(), args.config.as_deref(), &args.inputs)?;
    let request = config.request()?;
    let synthesis = crossenv_core::synthesize(ctx, &request)?;
    renderer.emit(ctx, &synthesis)
}

/// `CROSSENV_LOG` takes a full filter; otherwise `-v` switches info to debug.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("CROSSENV_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

/// 2 invalid input, 3 unsupported host, 4 policy violation, 1 anything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    use crossenv_core::Error;

    match err.downcast_ref::<Error>() {
        Some(Error::InvalidTarget(_) | Error::InvalidCompiler(_)) => 2,
        Some(Error::UnsupportedHost(_)) => 3,
        Some(Error::MuslConflict { .. }) => 4,
        Some(Error::Wrapper(_)) | None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use crossenv_core::Error;

    #[test]
    fn exit_codes() {
        let cases = [
            (Error::InvalidTarget("a b".into()), 2),
            (Error::InvalidCompiler(String::new()), 2),
            (Error::UnsupportedHost("windows".into()), 3),
            (
                Error::MuslConflict {
                    target:          "aarch64-linux-musl".into(),
                    gnu_alternative: "aarch64-linux-gnu".into(),
                },
                4,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(exit_code(&err.into()), code);
        }
        assert_eq!(exit_code(&anyhow::anyhow!("disk full")), 1);
    }

    #[test]
    fn unsupported_host_wins_over_bad_configuration() {
        use crossenv_platform::OS;

        let dir = tempfile::tempdir().unwrap();
        let ctx = ExecutionContext::new(dir.path()).host(OS::Windows);
        let cases = [
            vec!["crossenv", "--target", "linux-arm64", "--compiler", " "],
            vec!["crossenv", "--target", "linux-arm64", "--config", "missing.toml"],
            vec!["crossenv", "--target", "bad target"],
        ];

        for argv in cases {
            let args = Args::try_parse_from(&argv).unwrap();
            let mut renderer = Renderer::new(render::Format::Shell, Vec::new());
            let err = run(&args, &ctx, &mut renderer).unwrap_err();
            assert_eq!(exit_code(&err), 3, "{argv:?}: {err:#}");
        }
    }

    #[test]
    fn exit_code_sees_through_context() {
        let err = Err::<(), _>(Error::UnsupportedHost("windows".into()))
            .context("synthesizing")
            .unwrap_err();
        assert_eq!(exit_code(&err), 3);
    }
}
