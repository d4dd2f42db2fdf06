//! Output formats for a synthesized environment.

use anyhow::bail;
use clap::ValueEnum;
use crossenv_core::{Diagnostic, Severity, Synthesis};
use crossenv_platform::{ExecutionContext, ExportDestination};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Auto,
    /// Append to `GITHUB_ENV`, diagnostics as workflow commands
    Github,
    /// `export` lines for `eval`
    Shell,
    /// The whole synthesis as JSON, nothing applied
    Json,
}

impl Format {
    pub fn resolve(self, ctx: &ExecutionContext) -> Self {
        match self {
            Format::Auto if ctx.env_file_path().is_some() => Format::Github,
            Format::Auto => Format::Shell,
            other => other,
        }
    }
}

pub struct Renderer<W> {
    format: Format,
    out:    W,
}

impl<W: Write> Renderer<W> {
    pub fn new(format: Format, out: W) -> Self { Self { format, out } }

    /// Report diagnostics, then export the patch. JSON carries the
    /// diagnostics inline instead.
    pub fn emit(&mut self, ctx: &ExecutionContext, synthesis: &Synthesis) -> anyhow::Result<()> {
        if self.format != Format::Json {
            for diagnostic in &synthesis.diagnostics {
                self.diagnostic(diagnostic)?;
            }
        }

        let patch = &synthesis.patch;
        match self.format {
            Format::Github => {
                let destination = ctx.destination();
                if destination == ExportDestination::Process {
                    bail!("github output needs GITHUB_ENV to point at the runner's environment file");
                }
                patch.apply(&destination)?;
            }
            Format::Shell | Format::Auto => {
                patch.apply(&ExportDestination::Process)?;
                for (key, value) in patch.iter() {
                    writeln!(self.out, "export {key}={}", crossenv_shim::quote(value))?;
                }
            }
            Format::Json => {
                serde_json::to_writer_pretty(&mut self.out, synthesis)?;
                writeln!(self.out)?;
            }
        }

        tracing::info!(zig_target = %synthesis.target, project = %synthesis.project, format = ?self.format, "exported environment");
        Ok(())
    }

    pub fn diagnostic(&mut self, diagnostic: &Diagnostic) -> anyhow::Result<()> {
        if self.format == Format::Github {
            writeln!(self.out, "::{}::{}", diagnostic.severity, escape_data(&diagnostic.message))?;
            return Ok(());
        }

        match diagnostic.severity {
            Severity::Notice => tracing::info!("{}", diagnostic.message),
            Severity::Warning => tracing::warn!("{}", diagnostic.message),
            Severity::Error => tracing::error!("{}", diagnostic.message),
        }
        Ok(())
    }

    /// A fatal error as one error diagnostic. Outside GitHub it is logged on
    /// stderr so `eval` never sees it.
    pub fn fatal(&mut self, err: &anyhow::Error) {
        let diagnostic = Diagnostic::error(format!("{err:#}"));
        if let Err(write_err) = self.diagnostic(&diagnostic) {
            tracing::error!(error = %write_err, "failed to report: {}", diagnostic.message);
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W { self.out }
}

/// Workflow command escaping for `%`, CR and LF.
fn escape_data(message: &str) -> String {
    message.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossenv_core::{Request, synthesize};
    use crossenv_platform::OS;
    use tempfile::TempDir;

    fn synth(dir: &TempDir, target: &str, project: &str) -> (ExecutionContext, Synthesis) {
        let ctx = ExecutionContext::new(dir.path()).host(OS::Linux).temp_dir(dir.path());
        let synthesis = synthesize(&ctx, &Request::new(target).project(project)).unwrap();
        (ctx, synthesis)
    }

    fn output(renderer: Renderer<Vec<u8>>) -> String { String::from_utf8(renderer.into_inner()).unwrap() }

    #[test]
    fn auto_follows_env_file() {
        let ctx = ExecutionContext::new("/work");
        assert_eq!(Format::Auto.resolve(&ctx), Format::Shell);
        assert_eq!(Format::Json.resolve(&ctx), Format::Json);

        let ctx = ctx.env_file(Some("/tmp/env".into()));
        assert_eq!(Format::Auto.resolve(&ctx), Format::Github);
    }

    #[test]
    fn github_appends_to_env_file_and_prints_commands() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, synthesis) = synth(&dir, "x86_64-linux-gnu.2.31", "rust");
        let env_file = dir.path().join("github_env");
        std::fs::write(&env_file, "EXISTING=1\n").unwrap();
        let ctx = ctx.env_file(Some(env_file.clone()));

        let mut renderer = Renderer::new(Format::Github, Vec::new());
        renderer.emit(&ctx, &synthesis).unwrap();

        let printed = output(renderer);
        assert!(printed.starts_with("::warning::"), "{printed}");
        assert_eq!(printed.lines().count(), 1);

        let written = std::fs::read_to_string(&env_file).unwrap();
        assert!(written.starts_with("EXISTING=1\nCC=zig cc -target x86_64-linux-gnu.2.31\n"));
        assert!(written.contains("ZIG_TARGET=x86_64-linux-gnu.2.31\n"));
    }

    #[test]
    fn github_without_env_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, synthesis) = synth(&dir, "linux-arm64", "c");

        let mut renderer = Renderer::new(Format::Github, Vec::new());
        assert!(renderer.emit(&ctx, &synthesis).is_err());
    }

    #[test]
    fn shell_prints_quoted_exports() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, synthesis) = synth(&dir, "linux-arm64", "go");

        let mut renderer = Renderer::new(Format::Shell, Vec::new());
        renderer.emit(&ctx, &synthesis).unwrap();

        let printed = output(renderer);
        let lines: Vec<_> = printed.lines().collect();
        assert_eq!(lines[0], "export CC='zig cc -target aarch64-linux-musl'");
        assert!(lines.contains(&"export GOARCH='arm64'"));
        assert_eq!(lines.len(), synthesis.patch.len());
    }

    #[test]
    fn json_prints_patch_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, synthesis) = synth(&dir, "x86_64-macos", "c");

        let mut renderer = Renderer::new(Format::Json, Vec::new());
        renderer.emit(&ctx, &synthesis).unwrap();

        let printed = output(renderer);
        let cc = printed.find("\"CC\"").unwrap();
        let cgo = printed.find("\"CGO_ENABLED\"").unwrap();
        assert!(cc < cgo);

        let value: serde_json::Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(value["target"], "x86_64-macos");
        assert_eq!(value["project"], "c");
        assert!(value["rust"].is_null());
        assert_eq!(value["patch"]["CGO_ENABLED"], "0");
        assert_eq!(value["patch"]["ZIG_TARGET"], "x86_64-macos");
        assert_eq!(value["diagnostics"], serde_json::json!([]));
    }

    #[test]
    fn json_includes_rust_setup_and_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ExecutionContext::new(dir.path()).host(OS::Linux).temp_dir(dir.path());
        let request = Request::new("aarch64-linux-musl").project("rust").musl_policy("allow");
        let synthesis = synthesize(&ctx, &request).unwrap();

        let mut renderer = Renderer::new(Format::Json, Vec::new());
        renderer.emit(&ctx, &synthesis).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output(renderer)).unwrap();
        let wrapper = synthesis.rust.as_ref().unwrap().wrapper.to_str().unwrap();
        assert_eq!(value["project"], "rust");
        assert_eq!(value["rust"]["triple"], "aarch64-unknown-linux-musl");
        assert_eq!(value["rust"]["wrapper"], wrapper);
        assert_eq!(value["patch"]["CARGO_TARGET_AARCH64_UNKNOWN_LINUX_MUSL_LINKER"], wrapper);
        assert_eq!(value["diagnostics"][0]["severity"], "notice");
        assert_eq!(value["diagnostics"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn fatal_outside_github_writes_nothing_to_stdout() {
        let mut renderer = Renderer::new(Format::Shell, Vec::new());
        renderer.fatal(&anyhow::anyhow!("boom"));
        assert!(output(renderer).is_empty());
    }

    #[test]
    fn fatal_in_github_is_one_error_command() {
        let mut renderer = Renderer::new(Format::Github, Vec::new());
        renderer.fatal(&anyhow::anyhow!("first line\nsecond 100%"));
        assert_eq!(output(renderer), "::error::first line%0Asecond 100%25\n");
    }

    #[test]
    fn escaping() {
        assert_eq!(escape_data("a%b\r\nc"), "a%25b%0D%0Ac");
    }
}
