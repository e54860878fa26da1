//! Invocación de ExifTool como subproceso.

use std::env;
use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::arguments::build_strip_arguments;
use super::tags::{TagMap, parse_json_output};
use super::{MetadataTool, ToolOutput};
use crate::error::{CleanError, Result};
use crate::policy::PolicyResult;

/// Variable de entorno con la ruta del ejecutable de ExifTool.
pub const EXIFTOOL_ENV: &str = "METADATA_CLEANER_EXIFTOOL";

const DEFAULT_PROGRAM: &str = "exiftool";

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Clone, Debug)]
pub struct ExifTool {
    program: PathBuf,
    base_args: Vec<OsString>,
    deadline: Option<Duration>,
}

impl ExifTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
            deadline: None,
        }
    }

    /// Ruta configurada, luego `METADATA_CLEANER_EXIFTOOL`, luego `exiftool` del `PATH`.
    pub fn locate(configured: Option<&Path>) -> Self {
        let program = configured
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(EXIFTOOL_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM));
        Self::new(program)
    }

    /// Argumentos que preceden a cada invocación (p. ej. `perl exiftool.pl`).
    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.base_args = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        self
    }

    /// Tiempo máximo por invocación; al agotarse el proceso se termina.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Versión reportada por `exiftool -ver`.
    pub fn version(&self) -> Result<String> {
        let output = self.run(["-ver"])?;
        if !output.success() {
            return Err(CleanError::Tool(output.error_message()));
        }
        Ok(output.stdout.trim().to_string())
    }

    fn run<I, S>(&self, args: I) -> Result<ToolOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut child = Command::new(&self.program)
            .args(&self.base_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CleanError::ToolUnavailable {
                program: self.program.display().to_string(),
                source,
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let status = match self.deadline {
            Some(limit) => wait_with_deadline(&mut child, limit)?,
            None => child.wait()?,
        };

        Ok(ToolOutput {
            status: status.code(),
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        })
    }
}

fn drain<R>(pipe: Option<R>) -> JoinHandle<String>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    })
}

fn wait_with_deadline(child: &mut Child, limit: Duration) -> Result<ExitStatus> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if started.elapsed() >= limit {
            warn!(pid = child.id(), ?limit, "ExifTool no respondió a tiempo, se termina el proceso");
            let _ = child.kill();
            let _ = child.wait();
            return Err(CleanError::Timeout(limit));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

impl Default for ExifTool {
    fn default() -> Self {
        Self::locate(None)
    }
}

impl MetadataTool for ExifTool {
    fn strip(&self, policy: &PolicyResult, source: &Path, destination: &Path) -> Result<ToolOutput> {
        let args = build_strip_arguments(policy, source, destination);
        debug!(program = %self.program.display(), ?args, "invocando ExifTool");

        let output = self.run(&args)?;
        if !output.success() {
            return Err(CleanError::Tool(output.error_message()));
        }
        Ok(output)
    }

    fn read(&self, path: &Path) -> Result<TagMap> {
        let output = self.run([OsStr::new("-json"), path.as_os_str()])?;
        if !output.success() {
            return Err(CleanError::Tool(output.error_message()));
        }
        parse_json_output(&output.stdout)
    }
}
