//! `dotnet nuget` subcommands.
//!
//! API keys are configured as credential references and resolved through the
//! [`SecretResolver`] at assembly time; the resolved values are always added
//! as sensitive arguments.

use super::{flag, pair, scalar, secret};
use crate::args::ArgumentList;
use crate::command::{AssemblyError, CommandAssembler};
use crate::secrets::SecretResolver;
use serde::Deserialize;

/// `dotnet nuget delete [<package> [<version>]]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NugetDelete {
    pub package: Option<String>,
    pub version: Option<String>,
    /// Credential reference for the API key.
    pub api_key: Option<String>,
    pub source: Option<String>,
    pub no_service_endpoint: bool,
    pub non_interactive: bool,
    pub force_english_output: bool,
}

impl CommandAssembler for NugetDelete {
    fn name(&self) -> &'static str {
        "nuget delete"
    }

    fn assemble(
        &self,
        secrets: &dyn SecretResolver,
        args: &mut ArgumentList,
    ) -> Result<(), AssemblyError> {
        let package = scalar(&self.package);
        let version = scalar(&self.version);
        if package.is_none() && version.is_some() {
            return Err(AssemblyError::MissingSubject {
                command: self.name(),
                field: "package",
            });
        }
        let api_key = secret(secrets, &self.api_key)?;

        args.add("nuget").add("delete");
        args.add_all(package);
        args.add_all(version);
        if let Some(api_key) = api_key {
            args.add_secret_pair("--api-key", api_key);
        }
        pair(args, "--source", &self.source);
        flag(args, self.no_service_endpoint, "--no-service-endpoint");
        flag(args, self.non_interactive, "--non-interactive");
        flag(args, self.force_english_output, "--force-english-output");
        Ok(())
    }
}

/// `dotnet nuget push <root>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NugetPush {
    /// Package path or glob; required.
    pub root: Option<String>,
    /// Credential reference for the API key.
    pub api_key: Option<String>,
    pub source: Option<String>,
    /// Credential reference for the symbol server API key.
    pub symbol_api_key: Option<String>,
    pub symbol_source: Option<String>,
    pub no_symbols: bool,
    pub disable_buffering: bool,
    pub skip_duplicate: bool,
    pub no_service_endpoint: bool,
    /// Push timeout in seconds.
    pub timeout: Option<u32>,
    pub force_english_output: bool,
}

impl CommandAssembler for NugetPush {
    fn name(&self) -> &'static str {
        "nuget push"
    }

    fn assemble(
        &self,
        secrets: &dyn SecretResolver,
        args: &mut ArgumentList,
    ) -> Result<(), AssemblyError> {
        let root = scalar(&self.root).ok_or(AssemblyError::MissingSubject {
            command: self.name(),
            field: "root",
        })?;
        let api_key = secret(secrets, &self.api_key)?;
        let symbol_api_key = secret(secrets, &self.symbol_api_key)?;

        args.add("nuget").add("push").add(root);
        if let Some(api_key) = api_key {
            args.add_secret_pair("--api-key", api_key);
        }
        pair(args, "--source", &self.source);
        if let Some(symbol_api_key) = symbol_api_key {
            args.add_secret_pair("--symbol-api-key", symbol_api_key);
        }
        pair(args, "--symbol-source", &self.symbol_source);
        flag(args, self.no_symbols, "--no-symbols");
        flag(args, self.disable_buffering, "--disable-buffering");
        flag(args, self.skip_duplicate, "--skip-duplicate");
        flag(args, self.no_service_endpoint, "--no-service-endpoint");
        if let Some(timeout) = self.timeout {
            args.add_pair("--timeout", timeout.to_string());
        }
        flag(args, self.force_english_output, "--force-english-output");
        Ok(())
    }
}

/// What `dotnet nuget locals` does with the selected caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocalsOperation {
    Clear,
    #[default]
    List,
}

/// `dotnet nuget locals <cache>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NugetLocals {
    /// `all`, `http-cache`, `global-packages`, `temp` or `plugins-cache`; defaults to `all`.
    pub cache_location: Option<String>,
    pub operation: LocalsOperation,
    pub force_english_output: bool,
}

impl CommandAssembler for NugetLocals {
    fn name(&self) -> &'static str {
        "nuget locals"
    }

    fn assemble(&self, _: &dyn SecretResolver, args: &mut ArgumentList) -> Result<(), AssemblyError> {
        let location = scalar(&self.cache_location).unwrap_or_else(|| "all".to_string());
        args.add("nuget").add("locals").add(location);
        args.add(match self.operation {
            LocalsOperation::Clear => "--clear",
            LocalsOperation::List => "--list",
        });
        flag(args, self.force_english_output, "--force-english-output");
        Ok(())
    }
}
