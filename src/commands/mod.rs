//! One assembler per `dotnet` subcommand, and the [`Step`] that ties a command
//! to the invocations run around it.

mod list;
mod msbuild;
mod nuget;
mod restore;

pub use list::ListPackage;
pub use msbuild::{Build, Clean, Custom, MsBuildOptions, Pack, Publish};
pub use nuget::{LocalsOperation, NugetDelete, NugetLocals, NugetPush};
pub use restore::{Restore, ToolRestore};
pub use test::Test;

use crate::args::ArgumentList;
use crate::command::{AssemblyError, CommandAssembler};
use crate::lexer::tokenize;
use crate::normalize::{RawList, normalize, normalize_items, normalize_scalar};
use crate::secrets::SecretResolver;
use serde::Deserialize;

/// Executable used when a step does not name one.
pub const DEFAULT_EXECUTABLE: &str = "dotnet";

/// Free-form extra arguments appended at the end of a command line.
///
/// A single string is split shell-style (single quotes group); an array is taken
/// element by element, each non-blank element becoming exactly one argument.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExtraOptions {
    Line(String),
    Items(Vec<Option<String>>),
}

impl ExtraOptions {
    pub fn to_args(&self) -> Vec<String> {
        match self {
            ExtraOptions::Line(line) => tokenize(Some(line)),
            ExtraOptions::Items(items) => normalize_items(items).unwrap_or_default(),
        }
    }
}

/// Every supported subcommand, keyed by its configuration table name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    Build(Build),
    Clean(Clean),
    Custom(Custom),
    ListPackage(ListPackage),
    NugetDelete(NugetDelete),
    NugetLocals(NugetLocals),
    NugetPush(NugetPush),
    Pack(Pack),
    Publish(Publish),
    Restore(Restore),
    Test(Test),
    ToolRestore(ToolRestore),
}

impl Command {
    fn assembler(&self) -> &dyn CommandAssembler {
        match self {
            Command::Build(c) => c,
            Command::Clean(c) => c,
            Command::Custom(c) => c,
            Command::ListPackage(c) => c,
            Command::NugetDelete(c) => c,
            Command::NugetLocals(c) => c,
            Command::NugetPush(c) => c,
            Command::Pack(c) => c,
            Command::Publish(c) => c,
            Command::Restore(c) => c,
            Command::Test(c) => c,
            Command::ToolRestore(c) => c,
        }
    }

    /// Shared MSBuild options, for the commands that have them.
    pub fn msbuild_options(&self) -> Option<&MsBuildOptions> {
        match self {
            Command::Build(c) => Some(&c.common),
            Command::Clean(c) => Some(&c.common),
            Command::Custom(c) => Some(&c.common),
            Command::Pack(c) => Some(&c.common),
            Command::Publish(c) => Some(&c.common),
            Command::Test(c) => Some(&c.common),
            _ => None,
        }
    }
}

impl CommandAssembler for Command {
    fn name(&self) -> &'static str {
        self.assembler().name()
    }

    fn assemble(
        &self,
        secrets: &dyn SecretResolver,
        args: &mut ArgumentList,
    ) -> Result<(), AssemblyError> {
        self.assembler().assemble(secrets, args)
    }
}

/// One configured build step: a command plus the invocations run around it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Step {
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Run `dotnet --info` before the command.
    #[serde(default)]
    pub show_sdk_info: bool,
    #[serde(flatten)]
    pub command: Command,
}

fn default_executable() -> String {
    DEFAULT_EXECUTABLE.to_string()
}

impl Step {
    pub fn new(command: Command) -> Self {
        Self {
            executable: default_executable(),
            show_sdk_info: false,
            command,
        }
    }

    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_sdk_info(mut self, show_sdk_info: bool) -> Self {
        self.show_sdk_info = show_sdk_info;
        self
    }

    /// Every command line this step runs, in execution order:
    ///
    /// 1. `<exe> --info`, if requested;
    /// 2. the command itself;
    /// 3. `<exe> build-server shutdown`, if the command's MSBuild options ask for it.
    ///
    /// Nothing is returned unless the command assembles successfully.
    pub fn invocations(
        &self,
        secrets: &dyn SecretResolver,
    ) -> Result<Vec<ArgumentList>, AssemblyError> {
        let main = self.command.to_argument_list(&self.executable, secrets)?;

        let mut out = Vec::with_capacity(3);
        if self.show_sdk_info {
            let mut info = ArgumentList::new(&self.executable);
            info.add("--info");
            out.push(info);
        }
        out.push(main);
        if self
            .command
            .msbuild_options()
            .is_some_and(|o| o.shut_down_build_servers)
        {
            let mut shutdown = ArgumentList::new(&self.executable);
            shutdown.add("build-server").add("shutdown");
            out.push(shutdown);
        }
        Ok(out)
    }
}

fn scalar(value: &Option<String>) -> Option<String> {
    normalize_scalar(value.as_deref())
}

fn list(value: &Option<RawList>) -> Vec<String> {
    normalize(value.as_ref()).unwrap_or_default()
}

/// Resolve an optional credential reference. A blank reference means "not set".
fn secret(
    secrets: &dyn SecretResolver,
    reference: &Option<String>,
) -> Result<Option<String>, AssemblyError> {
    match scalar(reference) {
        Some(reference) => Ok(Some(secrets.resolve_secret(&reference)?)),
        None => Ok(None),
    }
}

fn flag(args: &mut ArgumentList, enabled: bool, flag: &str) {
    if enabled {
        args.add(flag);
    }
}

fn prefixed(args: &mut ArgumentList, prefix: &str, value: &Option<String>) {
    if let Some(value) = scalar(value) {
        args.add_prefixed(prefix, &value);
    }
}

fn pair(args: &mut ArgumentList, name: &str, value: &Option<String>) {
    if let Some(value) = scalar(value) {
        args.add_pair(name, value);
    }
}

fn pairs(args: &mut ArgumentList, name: &str, values: &Option<RawList>) {
    for value in list(values) {
        args.add_pair(name, value);
    }
}
