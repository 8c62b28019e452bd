use super::{flag, list, pair, pairs, scalar};
use crate::args::ArgumentList;
use crate::command::{AssemblyError, CommandAssembler};
use crate::normalize::RawList;
use crate::secrets::SecretResolver;
use serde::Deserialize;

/// `dotnet list <project> package`
///
/// The update-search options (`include_prerelease`, `highest_minor`,
/// `highest_patch`, `config`, `sources`) only apply when looking for deprecated
/// or outdated packages and are left out otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ListPackage {
    pub project: Option<String>,
    pub deprecated: bool,
    pub outdated: bool,
    pub frameworks: Option<RawList>,
    pub include_transitive: bool,
    pub include_prerelease: bool,
    pub highest_minor: bool,
    pub highest_patch: bool,
    pub config: Option<String>,
    pub sources: Option<RawList>,
}

impl CommandAssembler for ListPackage {
    fn name(&self) -> &'static str {
        "list package"
    }

    fn assemble(&self, _: &dyn SecretResolver, args: &mut ArgumentList) -> Result<(), AssemblyError> {
        args.add("list");
        if let Some(project) = scalar(&self.project) {
            args.add(project);
        }
        args.add("package");
        flag(args, self.deprecated, "--deprecated");
        flag(args, self.outdated, "--outdated");
        for framework in list(&self.frameworks) {
            args.add_pair("--framework", framework);
        }
        flag(args, self.include_transitive, "--include-transitive");
        if self.outdated || self.deprecated {
            flag(args, self.include_prerelease, "--include-prerelease");
            flag(args, self.highest_minor, "--highest-minor");
            flag(args, self.highest_patch, "--highest-patch");
            pair(args, "--config", &self.config);
            pairs(args, "--source", &self.sources);
        }
        Ok(())
    }
}
