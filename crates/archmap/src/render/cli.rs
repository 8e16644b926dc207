//! [`Compiler`] backed by the `d2` executable.

use std::{
    ffi::OsString,
    fs,
    io::{self, Read, Write},
    path::Path,
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::Duration,
};

use log::{debug, trace, warn};

use crate::{
    config::RenderConfig,
    context::RenderContext,
    render::{Compiler, RenderError},
};

const POLL_INTERVAL: Duration = Duration::from_millis(20);
const OUTPUT_FILE: &str = "diagram.svg";
const SCRIPT_DISPLAY_NAME: &str = "script.d2";

/// Runs `d2` as a child process, one process per render.
///
/// The script is written to a temporary `.d2` file and the SVG is read back
/// from a temporary directory. Both are removed when the render finishes.
/// Cancellation and deadlines kill the child process.
#[derive(Debug, Clone)]
pub struct D2Cli {
    program: OsString,
    args: Vec<OsString>,
}

impl D2Cli {
    /// Creates a compiler configured by `config`.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            program: OsString::from(config.compiler()),
            args: render_args(config),
        }
    }

    /// The compiler flags passed before the input and output paths.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    fn spawn(&self, input: &Path, output: &Path) -> io::Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
    }
}

fn render_args(config: &RenderConfig) -> Vec<OsString> {
    let layout: &'static str = config.layout().into();
    let mut args = vec![
        OsString::from(format!("--pad={}", config.padding())),
        OsString::from(format!("--theme={}", config.theme())),
        OsString::from(format!("--layout={layout}")),
    ];
    if config.sketch() {
        args.push(OsString::from("--sketch"));
    }
    if let Some(font) = config.font_family() {
        args.push(OsString::from(format!("--font-regular={font}")));
    }
    args
}

/// Waits for `child`, killing it as soon as `ctx` is done.
///
/// The child is killed and reaped on every error path, including a failed
/// status poll.
fn wait(child: &mut Child, ctx: &RenderContext) -> Result<ExitStatus, RenderError> {
    let result = poll(child, ctx);
    if let Err(err) = &result {
        warn!(err:% = err; "Stopping d2");
        stop(child);
    }
    result
}

fn poll(child: &mut Child, ctx: &RenderContext) -> Result<ExitStatus, RenderError> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        ctx.check()?;
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kills `child` and reaps it.
fn stop(child: &mut Child) {
    // The child may already have exited.
    let _ = child.kill();
    if let Err(err) = child.wait() {
        warn!(pid = child.id(), err:% = err; "Failed to reap d2");
    }
}

impl Compiler for D2Cli {
    fn compile(&self, ctx: &RenderContext, script: &[u8]) -> Result<Vec<u8>, RenderError> {
        let mut input = tempfile::Builder::new()
            .prefix("archmap-")
            .suffix(".d2")
            .tempfile()?;
        input.write_all(script)?;
        input.flush()?;

        let output_dir = tempfile::Builder::new().prefix("archmap-").tempdir()?;
        let output = output_dir.path().join(OUTPUT_FILE);

        debug!(
            program:? = self.program,
            input:? = input.path(),
            output:? = output;
            "Spawning d2"
        );
        let mut child = self.spawn(input.path(), &output)?;

        // Drained on a separate thread so a chatty compiler cannot block on a
        // full pipe while we poll.
        let stderr = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = String::new();
                let _ = pipe.read_to_string(&mut buf);
                buf
            })
        });

        let status = wait(&mut child, ctx);
        let diagnostic = stderr
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        let status = status?;

        if !status.success() {
            let diagnostic = diagnostic
                .trim()
                .replace(&*input.path().to_string_lossy(), SCRIPT_DISPLAY_NAME);
            let diagnostic = if diagnostic.is_empty() {
                format!("d2 exited with {status}")
            } else {
                diagnostic
            };
            debug!(status:% = status; "d2 rejected script");
            return Err(RenderError::Compile { diagnostic });
        }

        trace!(stderr = diagnostic.as_str(); "d2 finished");
        Ok(fs::read(&output)?)
    }
}
