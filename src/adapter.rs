//! Command-invocation adapter: request in, HTML report out.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::algorithm::ogrinfo::{build_command_line, InvocationRequest};
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::report::render_report;

/// Knobs for how captured console output is turned into a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterOptions {
    /// Skip the first captured line, which echoes the invoked command.
    pub drop_leading_echo_line: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            drop_leading_echo_line: true,
        }
    }
}

/// Console output captured from a successful run.
///
/// The first line echoes the invoked command; the rest are the program's
/// standard output lines in order, each with its original terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleOutput {
    lines: Vec<String>,
}

impl ConsoleOutput {
    fn capture(tokens: &[String], stdout: &str) -> Self {
        let mut lines = Vec::with_capacity(stdout.lines().count() + 1);
        lines.push(format!("{}\n", tokens.join(" ")));
        lines.extend(stdout.split_inclusive('\n').map(String::from));
        Self { lines }
    }

    /// All captured lines, echo line included.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The lines to put in a report under `options`.
    #[must_use]
    pub fn report_lines(&self, options: AdapterOptions) -> &[String] {
        if options.drop_leading_echo_line {
            self.lines.get(1..).unwrap_or_default()
        } else {
            &self.lines
        }
    }
}

/// Runs an external program for a request and writes its output as HTML.
pub struct CommandInvocationAdapter<'a> {
    ctx: &'a ServiceContext,
    options: AdapterOptions,
}

impl<'a> CommandInvocationAdapter<'a> {
    /// Creates an adapter using the ports in `ctx` and default options.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            options: AdapterOptions::default(),
        }
    }

    /// Replaces the adapter options.
    #[must_use]
    pub fn with_options(mut self, options: AdapterOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the token list for `request`, program name first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayerReference`] if the layer does not resolve.
    pub fn build_command_line(&self, request: &InvocationRequest) -> Result<Vec<String>> {
        build_command_line(request, self.ctx.resolver.as_ref())
    }

    /// Runs `tokens[0]` with the remaining tokens as arguments and blocks
    /// until it exits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExecutionFailure`] if the program cannot be launched
    /// or exits with a non-zero status.
    pub fn execute(&self, tokens: &[String]) -> Result<ConsoleOutput> {
        let Some((program, args)) = tokens.split_first() else {
            return Err(Error::InvalidParameter {
                name: "command".to_string(),
                reason: "empty command line".to_string(),
            });
        };

        let command_line = tokens.join(" ");
        self.ctx.feedback.push_command_info(&command_line);

        let output = self.ctx.process.run(program, args).map_err(|e| {
            warn!(program = %program, error = %e, "failed to launch");
            Error::ExecutionFailure {
                program: program.clone(),
                exit_code: None,
                stdout: String::new(),
                stderr: e.to_string(),
            }
        })?;

        self.push_console(&output.stdout);
        self.push_console(&output.stderr);

        if !output.success() {
            warn!(
                program = %program,
                exit_code = output.exit_code,
                "external command failed"
            );
            return Err(Error::ExecutionFailure {
                program: program.clone(),
                exit_code: Some(output.exit_code),
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        let console = ConsoleOutput::capture(tokens, &output.stdout);
        debug!(lines = console.lines().len(), "captured console output");
        Ok(console)
    }

    fn push_console(&self, text: &str) {
        for line in text.split_inclusive('\n') {
            self.ctx.feedback.push_console_info(line);
        }
    }

    /// Writes captured lines into `output_path` as a `<pre>` block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IoFailure`] if the report cannot be written.
    pub fn render_report<S: AsRef<str>>(&self, output_path: &Path, lines: &[S]) -> Result<()> {
        render_report(output_path, lines)
    }

    /// Resolves, builds, executes and renders `request` into `output_path`,
    /// returning the path of the written report.
    ///
    /// Nothing is written to `output_path` unless the program succeeds.
    ///
    /// # Errors
    ///
    /// Returns the first failure from resolution, execution or rendering.
    pub fn run(&self, request: &InvocationRequest, output_path: &Path) -> Result<PathBuf> {
        let tokens = self.build_command_line(request)?;
        let console = self.execute(&tokens)?;
        self.render_report(output_path, console.report_lines(self.options))?;

        info!(report = %output_path.display(), "wrote layer information");
        self.ctx.feedback.push_info(&format!("Report written to {}", output_path.display()));
        Ok(output_path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::adapters::live::OgrConnectionResolver;
    use crate::ports::{Feedback, ProcessOutput, ProcessRunner};

    type Calls = Arc<Mutex<Vec<(String, Vec<String>)>>>;

    struct StubRunner {
        result: std::result::Result<ProcessOutput, String>,
        calls: Calls,
    }

    impl ProcessRunner for StubRunner {
        fn run(
            &self,
            program: &str,
            args: &[String],
        ) -> std::result::Result<ProcessOutput, Box<dyn std::error::Error + Send + Sync>> {
            self.calls.lock().unwrap().push((program.to_string(), args.to_vec()));
            self.result.clone().map_err(Into::into)
        }
    }

    #[derive(Clone, Default)]
    struct CollectingFeedback(Arc<Mutex<Vec<String>>>);

    impl Feedback for CollectingFeedback {
        fn push_command_info(&self, command: &str) {
            self.0.lock().unwrap().push(format!("cmd: {command}"));
        }

        fn push_console_info(&self, line: &str) {
            self.0.lock().unwrap().push(format!("out: {line}"));
        }

        fn push_info(&self, message: &str) {
            self.0.lock().unwrap().push(format!("info: {message}"));
        }
    }

    fn context(
        result: std::result::Result<ProcessOutput, String>,
    ) -> (ServiceContext, Calls, CollectingFeedback) {
        let calls = Calls::default();
        let feedback = CollectingFeedback::default();
        let ctx = ServiceContext::new(
            Box::new(StubRunner {
                result,
                calls: Arc::clone(&calls),
            }),
            Box::new(OgrConnectionResolver),
            Box::new(feedback.clone()),
        );
        (ctx, calls, feedback)
    }

    fn ok(stdout: &str) -> std::result::Result<ProcessOutput, String> {
        Ok(ProcessOutput {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    #[test]
    fn run_writes_report_without_echo_line() {
        let (ctx, calls, feedback) =
            context(ok("INFO: Open of `roads.shp'\nLayer name: roads\nFeature Count: 10\n"));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.html");

        let written = CommandInvocationAdapter::new(&ctx)
            .run(&InvocationRequest::new("roads.shp"), &path)
            .unwrap();

        assert_eq!(written, path);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<pre>INFO: Open of `roads.shp'\nLayer name: roads\nFeature Count: 10\n</pre>"
        );
        assert_eq!(
            calls.lock().unwrap().as_slice(),
            [(
                "ogrinfo".to_string(),
                vec!["-al".to_string(), "-so".to_string(), "roads.shp".to_string()]
            )]
        );

        let messages = feedback.0.lock().unwrap();
        assert_eq!(messages[0], "cmd: ogrinfo -al -so roads.shp");
        assert_eq!(messages[1], "out: INFO: Open of `roads.shp'\n");
        assert!(messages.last().unwrap().starts_with("info: Report written to"));
    }

    #[test]
    fn keeping_echo_line_puts_command_in_report() {
        let (ctx, _, _) = context(ok("Layer name: roads\n"));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.html");

        CommandInvocationAdapter::new(&ctx)
            .with_options(AdapterOptions {
                drop_leading_echo_line: false,
            })
            .run(
                &InvocationRequest::new("roads.shp").summary_only(false),
                &path,
            )
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<pre>ogrinfo -al roads.shp\nLayer name: roads\n</pre>"
        );
    }

    #[test]
    fn execute_returns_echo_then_output_lines() {
        let (ctx, _, _) = context(ok("Layer: roads \nFeature Count: 10"));
        let tokens: Vec<String> = ["ogrinfo", "-al", "roads.shp"].map(String::from).to_vec();

        let console = CommandInvocationAdapter::new(&ctx).execute(&tokens).unwrap();
        assert_eq!(
            console.lines(),
            ["ogrinfo -al roads.shp\n", "Layer: roads \n", "Feature Count: 10"]
        );
        assert_eq!(
            console.report_lines(AdapterOptions::default()),
            ["Layer: roads \n", "Feature Count: 10"]
        );
    }

    #[test]
    fn empty_stdout_yields_empty_report() {
        let (ctx, _, _) = context(ok(""));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.html");

        CommandInvocationAdapter::new(&ctx).run(&InvocationRequest::new("a.shp"), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<pre></pre>");
    }

    #[test]
    fn non_zero_exit_is_execution_failure_and_leaves_file_untouched() {
        let (ctx, _, _) = context(Ok(ProcessOutput {
            exit_code: 1,
            stdout: String::new(),
            stderr: "FAILURE:\nUnable to open datasource `missing.shp'\n".to_string(),
        }));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.html");
        std::fs::write(&path, "previous").unwrap();

        let err = CommandInvocationAdapter::new(&ctx)
            .run(&InvocationRequest::new("missing.shp"), &path)
            .unwrap_err();

        match err {
            Error::ExecutionFailure { program, exit_code, stderr, .. } => {
                assert_eq!(program, "ogrinfo");
                assert_eq!(exit_code, Some(1));
                assert!(stderr.contains("Unable to open datasource"));
            }
            other => panic!("expected ExecutionFailure, got {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
    }

    #[test]
    fn console_output_reaches_feedback_on_failure() {
        let (ctx, _, feedback) = context(Ok(ProcessOutput {
            exit_code: 1,
            stdout: "INFO: partial\n".to_string(),
            stderr: "FAILURE:\nUnable to open datasource `missing.shp'\n".to_string(),
        }));
        let tokens: Vec<String> = ["ogrinfo", "-al", "missing.shp"].map(String::from).to_vec();

        assert!(CommandInvocationAdapter::new(&ctx).execute(&tokens).is_err());
        assert_eq!(
            feedback.0.lock().unwrap().as_slice(),
            [
                "cmd: ogrinfo -al missing.shp",
                "out: INFO: partial\n",
                "out: FAILURE:\n",
                "out: Unable to open datasource `missing.shp'\n",
            ]
        );
    }

    #[test]
    fn warnings_on_stderr_reach_feedback_on_success() {
        let (ctx, _, feedback) = context(Ok(ProcessOutput {
            exit_code: 0,
            stdout: "Layer name: roads\n".to_string(),
            stderr: "Warning 1: unsupported field type\n".to_string(),
        }));
        let tokens: Vec<String> = ["ogrinfo", "-al", "roads.shp"].map(String::from).to_vec();

        let console = CommandInvocationAdapter::new(&ctx).execute(&tokens).unwrap();

        assert_eq!(console.report_lines(AdapterOptions::default()), ["Layer name: roads\n"]);
        let messages = feedback.0.lock().unwrap();
        assert_eq!(messages[1], "out: Layer name: roads\n");
        assert_eq!(messages[2], "out: Warning 1: unsupported field type\n");
    }

    #[test]
    fn launch_failure_creates_no_file() {
        let (ctx, _, _) = context(Err("failed to launch ogrinfo: not found".to_string()));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.html");

        let err = CommandInvocationAdapter::new(&ctx)
            .run(&InvocationRequest::new("roads.shp"), &path)
            .unwrap_err();

        assert!(matches!(err, Error::ExecutionFailure { exit_code: None, .. }));
        assert!(!path.exists());
    }

    #[test]
    fn unresolvable_layer_never_runs_the_program() {
        let (ctx, calls, _) = context(ok(""));
        let dir = tempfile::tempdir().unwrap();

        let err = CommandInvocationAdapter::new(&ctx)
            .run(&InvocationRequest::new(""), &dir.path().join("info.html"))
            .unwrap_err();

        assert!(matches!(err, Error::InvalidLayerReference(_)));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_command_line_is_rejected() {
        let (ctx, calls, _) = context(ok(""));
        assert!(CommandInvocationAdapter::new(&ctx).execute(&[]).is_err());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_output_directory_is_io_failure() {
        let (ctx, _, _) = context(ok("Layer name: roads\n"));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("info.html");

        let err = CommandInvocationAdapter::new(&ctx)
            .run(&InvocationRequest::new("roads.shp"), &path)
            .unwrap_err();
        assert!(matches!(err, Error::IoFailure { .. }));
    }

    #[test]
    fn same_request_twice_gives_identical_reports() {
        let (ctx, _, _) = context(ok("Layer name: roads\nGeometry: Line String\n"));
        let adapter = CommandInvocationAdapter::new(&ctx);
        let dir = tempfile::tempdir().unwrap();
        let request = InvocationRequest::new("roads.shp");

        let first = adapter.run(&request, &dir.path().join("a.html")).unwrap();
        let second = adapter.run(&request, &dir.path().join("b.html")).unwrap();
        assert_eq!(std::fs::read(first).unwrap(), std::fs::read(second).unwrap());
    }
}
