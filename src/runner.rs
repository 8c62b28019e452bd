//! Launching assembled command lines as child processes.

use crate::args::ArgumentList;
use crate::env::Environment;
use anyhow::{Context, Result, bail};
use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Conventional process exit code; 0 is success.
pub type ExitCode = i32;

/// Runs argument lists: the first token is the executable, every other token
/// is passed as one argument, untouched by any shell.
pub struct ProcessRunner {
    env: Environment,
}

impl ProcessRunner {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Run `args` to completion, inheriting stdin, stdout and stderr.
    pub fn run(&self, args: &ArgumentList) -> Result<ExitCode> {
        let executable = self.locate(args.executable())?;
        tracing::info!(command = %args, "launching");

        let status = std::process::Command::new(&*executable)
            .args(args.args().iter().map(|a| a.text()))
            .env_clear()
            .envs(self.env.vars.iter())
            .current_dir(&self.env.current_dir)
            .status()
            .with_context(|| format!("failed to launch {}", args.executable()))?;

        let code = match status.code() {
            Some(code) => code,
            None => terminated_by_signal(status),
        };
        tracing::debug!(exit_code = code, "process finished");
        Ok(code)
    }

    /// Run each list in order, stopping at the first non-zero exit code.
    pub fn run_all(&self, lists: &[ArgumentList]) -> Result<ExitCode> {
        for list in lists {
            let code = self.run(list)?;
            if code != 0 {
                return Ok(code);
            }
        }
        Ok(0)
    }

    fn locate<'a>(&self, executable: &'a str) -> Result<Cow<'a, Path>> {
        let search_paths = self.env.get_var("PATH").unwrap_or_default();
        match find_command_path(OsStr::new(&search_paths), &self.env.current_dir, Path::new(executable)) {
            Some(path) => Ok(path),
            None => bail!("executable not found: {executable}"),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    match exit_status.signal() {
        Some(signal) => 128 + signal,
        None => -1,
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolve the executable the way a shell would.
///
/// - Absolute path: used if it exists.
/// - Path with several components (`tools/dotnet`, `./dotnet`): resolved
///   against `current_dir`.
/// - Bare name: each directory of `search_paths` (a `PATH` value) is tried in
///   order; on Windows the `.exe` suffix is tried as well.
/// - Empty path: never found.
pub fn find_command_path<'a>(
    search_paths: &OsStr,
    current_dir: &Path,
    path: &'a Path,
) -> Option<Cow<'a, Path>> {
    if path.as_os_str().is_empty() {
        return None;
    }
    if path.is_absolute() {
        return path.exists().then_some(Cow::Borrowed(path));
    }

    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(name), None) if !path.starts_with(".") => {
            find_in_path(search_paths, name.as_os_str()).map(Cow::Owned)
        }
        _ => {
            let joined = current_dir.join(path);
            joined.exists().then_some(Cow::Owned(joined))
        }
    }
}

fn find_in_path(search_paths: &OsStr, name: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths).find_map(|dir| {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = candidate.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}
