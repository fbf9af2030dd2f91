use std::{
    ffi::OsString,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
};

use anyhow::Context;

use super::error::SniffError;

/// What to align: reads against a reference, with a thread hint for the aligner
#[derive(Debug, Clone)]
pub struct AlignJob {
    pub input: PathBuf,
    pub reference: PathBuf,
    pub threads: usize,
}

/// An external aligner producing a SAM text stream.
///
/// `start` launches the alignment and hands back the record stream, which the caller
/// drains before calling `wait`.
pub trait Aligner {
    fn name(&self) -> &str;
    fn start(&mut self, job: &AlignJob) -> anyhow::Result<Box<dyn BufRead>>;
    fn wait(&mut self) -> anyhow::Result<()>;
}

/// minimap2 in short read mode (`-x sr`) with SAM output (`-a`)
pub struct Minimap2 {
    program: OsString,
    child: Option<Child>,
}

impl Default for Minimap2 {
    fn default() -> Self {
        Self::with_program("minimap2")
    }
}

impl Minimap2 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program<S: Into<OsString>>(program: S) -> Self {
        Self {
            program: program.into(),
            child: None,
        }
    }

    fn args(job: &AlignJob) -> Vec<OsString> {
        let mut v: Vec<OsString> = ["-a", "-x", "sr", "-t"]
            .iter()
            .map(OsString::from)
            .collect();
        v.push(job.threads.to_string().into());
        v.push(job.reference.as_os_str().to_owned());
        v.push(job.input.as_os_str().to_owned());
        v
    }
}

impl Aligner for Minimap2 {
    fn name(&self) -> &str {
        Path::new(&self.program)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("aligner")
    }

    fn start(&mut self, job: &AlignJob) -> anyhow::Result<Box<dyn BufRead>> {
        if self.child.is_some() {
            return Err(anyhow!("{} has already been started", self.name()));
        }
        let args = Self::args(job);
        debug!("Launching {:?} {:?}", self.program, args);
        let mut child = match Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SniffError::ToolNotFound {
                    tool: self.name().to_owned(),
                }
                .into())
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Error launching {}", self.name()))
            }
        };
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("Could not capture output of {}", self.name()))?;
        trace!("Started {} with pid {}", self.name(), child.id());
        self.child = Some(child);
        Ok(Box::new(BufReader::new(stdout)))
    }

    fn wait(&mut self) -> anyhow::Result<()> {
        let mut child = self
            .child
            .take()
            .ok_or_else(|| anyhow!("{} was never started", self.name()))?;
        let status = child
            .wait()
            .with_context(|| format!("Error waiting for {} to finish", self.name()))?;
        if status.success() {
            debug!("{} finished", self.name())
        } else {
            warn!("{} exited with {}", self.name(), status)
        }
        Ok(())
    }
}
