use super::{ExtraOptions, flag, list, pair, pairs, prefixed, scalar};
use crate::args::ArgumentList;
use crate::command::{AssemblyError, CommandAssembler};
use crate::normalize::RawList;
use crate::secrets::SecretResolver;
use serde::Deserialize;

/// `dotnet restore`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Restore {
    pub project: Option<String>,
    pub config_file: Option<String>,
    pub disable_parallel: bool,
    pub force: bool,
    pub force_evaluate: bool,
    pub ignore_failed_sources: bool,
    pub lock_file_path: Option<String>,
    pub locked_mode: bool,
    pub no_cache: bool,
    pub no_dependencies: bool,
    pub packages: Option<String>,
    pub runtimes: Option<RawList>,
    pub sources: Option<RawList>,
    pub use_lock_file: bool,
    pub verbosity: Option<String>,
    pub options: Option<ExtraOptions>,
}

impl CommandAssembler for Restore {
    fn name(&self) -> &'static str {
        "restore"
    }

    fn assemble(&self, _: &dyn SecretResolver, args: &mut ArgumentList) -> Result<(), AssemblyError> {
        args.add("restore");
        if let Some(project) = scalar(&self.project) {
            args.add(project);
        }
        pair(args, "--configfile", &self.config_file);
        flag(args, self.disable_parallel, "--disable-parallel");
        flag(args, self.force, "--force");
        flag(args, self.force_evaluate, "--force-evaluate");
        flag(args, self.ignore_failed_sources, "--ignore-failed-sources");
        pair(args, "--lock-file-path", &self.lock_file_path);
        flag(args, self.locked_mode, "--locked-mode");
        flag(args, self.no_cache, "--no-cache");
        flag(args, self.no_dependencies, "--no-dependencies");
        pair(args, "--packages", &self.packages);
        for runtime in list(&self.runtimes) {
            args.add_prefixed("-r:", &runtime);
        }
        pairs(args, "--source", &self.sources);
        flag(args, self.use_lock_file, "--use-lock-file");
        prefixed(args, "-v:", &self.verbosity);
        if let Some(options) = &self.options {
            args.add_all(options.to_args());
        }
        Ok(())
    }
}

/// `dotnet tool restore`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ToolRestore {
    pub config_file: Option<String>,
    pub additional_sources: Option<RawList>,
    pub tool_manifest: Option<String>,
    pub disable_parallel: bool,
    pub ignore_failed_sources: bool,
    pub no_cache: bool,
    pub verbosity: Option<String>,
}

impl CommandAssembler for ToolRestore {
    fn name(&self) -> &'static str {
        "tool restore"
    }

    fn assemble(&self, _: &dyn SecretResolver, args: &mut ArgumentList) -> Result<(), AssemblyError> {
        args.add("tool").add("restore");
        pair(args, "--configfile", &self.config_file);
        pairs(args, "--add-source", &self.additional_sources);
        pair(args, "--tool-manifest", &self.tool_manifest);
        flag(args, self.disable_parallel, "--disable-parallel");
        flag(args, self.ignore_failed_sources, "--ignore-failed-sources");
        flag(args, self.no_cache, "--no-cache");
        prefixed(args, "-v:", &self.verbosity);
        Ok(())
    }
}
