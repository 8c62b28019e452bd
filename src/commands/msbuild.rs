//! Commands built on MSBuild: `build`, `clean`, `pack`, `publish` and custom ones.
//!
//! They share [`MsBuildOptions`] and lay out their arguments the same way:
//!
//! 1. subcommand name
//! 2. project
//! 3. `-c:<configuration>`
//! 4. command-specific flags
//! 5. `--nologo`
//! 6. `--output <dir>`
//! 7. `-p:<key>=<value>` per property
//! 8. `-v:<verbosity>`
//! 9. extra options

use super::{ExtraOptions, flag, list, pair, prefixed, scalar};
use crate::args::ArgumentList;
use crate::command::{AssemblyError, CommandAssembler};
use crate::normalize::RawList;
use crate::properties::parse_properties;
use crate::secrets::SecretResolver;
use serde::Deserialize;

/// Options every MSBuild-based command accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MsBuildOptions {
    /// Project or solution file; the tool picks one from the working directory when unset.
    pub project: Option<String>,
    pub configuration: Option<String>,
    pub nologo: bool,
    pub output_directory: Option<String>,
    /// Properties block, one `key=value` per line.
    pub properties: Option<String>,
    pub verbosity: Option<String>,
    pub options: Option<ExtraOptions>,
    /// Run `build-server shutdown` once the command has finished.
    pub shut_down_build_servers: bool,
}

impl MsBuildOptions {
    pub(super) fn add_head(&self, args: &mut ArgumentList) {
        if let Some(project) = scalar(&self.project) {
            args.add(project);
        }
        prefixed(args, "-c:", &self.configuration);
    }

    pub(super) fn add_tail(&self, args: &mut ArgumentList) {
        flag(args, self.nologo, "--nologo");
        pair(args, "--output", &self.output_directory);
        args.add_properties("-p", &parse_properties(self.properties.as_deref()));
        prefixed(args, "-v:", &self.verbosity);
        if let Some(options) = &self.options {
            args.add_all(options.to_args());
        }
    }
}

/// `dotnet build`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Build {
    #[serde(flatten)]
    pub common: MsBuildOptions,
    pub force: bool,
    pub no_dependencies: bool,
    pub no_incremental: bool,
    pub no_restore: bool,
    pub framework: Option<String>,
    pub runtime: Option<String>,
    pub targets: Option<RawList>,
    pub version_suffix: Option<String>,
}

impl CommandAssembler for Build {
    fn name(&self) -> &'static str {
        "build"
    }

    fn assemble(&self, _: &dyn SecretResolver, args: &mut ArgumentList) -> Result<(), AssemblyError> {
        args.add("build");
        self.common.add_head(args);
        flag(args, self.force, "--force");
        flag(args, self.no_dependencies, "--no-dependencies");
        flag(args, self.no_incremental, "--no-incremental");
        flag(args, self.no_restore, "--no-restore");
        prefixed(args, "-f:", &self.framework);
        prefixed(args, "-r:", &self.runtime);
        for target in list(&self.targets) {
            args.add_prefixed("-t:", &target);
        }
        pair(args, "--version-suffix", &self.version_suffix);
        self.common.add_tail(args);
        Ok(())
    }
}

/// `dotnet clean`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Clean {
    #[serde(flatten)]
    pub common: MsBuildOptions,
    pub framework: Option<String>,
    pub runtime: Option<String>,
}

impl CommandAssembler for Clean {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn assemble(&self, _: &dyn SecretResolver, args: &mut ArgumentList) -> Result<(), AssemblyError> {
        args.add("clean");
        self.common.add_head(args);
        prefixed(args, "-f:", &self.framework);
        prefixed(args, "-r:", &self.runtime);
        self.common.add_tail(args);
        Ok(())
    }
}

/// `dotnet pack`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Pack {
    #[serde(flatten)]
    pub common: MsBuildOptions,
    pub force: bool,
    pub include_source: bool,
    pub include_symbols: bool,
    pub no_build: bool,
    pub no_dependencies: bool,
    pub no_restore: bool,
    pub runtime: Option<String>,
    pub serviceable: bool,
    pub version_suffix: Option<String>,
}

impl CommandAssembler for Pack {
    fn name(&self) -> &'static str {
        "pack"
    }

    fn assemble(&self, _: &dyn SecretResolver, args: &mut ArgumentList) -> Result<(), AssemblyError> {
        args.add("pack");
        self.common.add_head(args);
        flag(args, self.force, "--force");
        flag(args, self.include_source, "--include-source");
        flag(args, self.include_symbols, "--include-symbols");
        flag(args, self.no_build, "--no-build");
        flag(args, self.no_dependencies, "--no-dependencies");
        flag(args, self.no_restore, "--no-restore");
        prefixed(args, "-r:", &self.runtime);
        flag(args, self.serviceable, "--serviceable");
        pair(args, "--version-suffix", &self.version_suffix);
        self.common.add_tail(args);
        Ok(())
    }
}

/// `dotnet publish`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Publish {
    #[serde(flatten)]
    pub common: MsBuildOptions,
    pub framework: Option<String>,
    pub runtime: Option<String>,
    pub force: bool,
    pub manifests: Option<RawList>,
    pub no_build: bool,
    pub no_dependencies: bool,
    pub no_restore: bool,
    /// `None` leaves the choice to the project file.
    pub self_contained: Option<bool>,
    pub version_suffix: Option<String>,
}

impl CommandAssembler for Publish {
    fn name(&self) -> &'static str {
        "publish"
    }

    fn assemble(&self, _: &dyn SecretResolver, args: &mut ArgumentList) -> Result<(), AssemblyError> {
        args.add("publish");
        self.common.add_head(args);
        prefixed(args, "-f:", &self.framework);
        prefixed(args, "-r:", &self.runtime);
        flag(args, self.force, "--force");
        for manifest in list(&self.manifests) {
            args.add_pair("--manifest", manifest);
        }
        flag(args, self.no_build, "--no-build");
        flag(args, self.no_dependencies, "--no-dependencies");
        flag(args, self.no_restore, "--no-restore");
        if let Some(self_contained) = self.self_contained {
            args.add_pair("--self-contained", self_contained.to_string());
        }
        pair(args, "--version-suffix", &self.version_suffix);
        self.common.add_tail(args);
        Ok(())
    }
}

/// Any other MSBuild-based subcommand, named freely.
///
/// With no name set only the shared options are emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Custom {
    pub command: Option<String>,
    #[serde(flatten)]
    pub common: MsBuildOptions,
}

impl CommandAssembler for Custom {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn assemble(&self, _: &dyn SecretResolver, args: &mut ArgumentList) -> Result<(), AssemblyError> {
        if let Some(command) = scalar(&self.command) {
            args.add(command);
        }
        self.common.add_head(args);
        self.common.add_tail(args);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{assemble, expect};

    fn with_common(common: MsBuildOptions) -> Custom {
        Custom {
            command: None,
            common,
        }
    }

    #[test]
    fn test_build_defaults() {
        assert_eq!(assemble(&Build::default()), expect(&["build"]));
    }

    #[test]
    fn test_build_configuration_only() {
        let build = Build {
            common: MsBuildOptions {
                configuration: Some("Release".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(assemble(&build), expect(&["build", "-c:Release"]));
    }

    #[test]
    fn test_build_full_order() {
        let build = Build {
            common: MsBuildOptions {
                project: Some("src/App.sln".to_string()),
                configuration: Some("Release".to_string()),
                nologo: true,
                output_directory: Some("/path/to/output".to_string()),
                properties: Some("Version=1.2.3\nCI".to_string()),
                verbosity: Some("minimal".to_string()),
                options: Some(ExtraOptions::Line("--tl:off '-bl:my log.binlog'".to_string())),
                shut_down_build_servers: false,
            },
            force: true,
            no_dependencies: true,
            no_incremental: true,
            no_restore: true,
            framework: Some("net8.0".to_string()),
            runtime: Some("linux-x64".to_string()),
            targets: Some(RawList::from("Restore  Build\nPublish")),
            version_suffix: Some("beta.1".to_string()),
        };
        assert_eq!(
            assemble(&build),
            expect(&[
                "build",
                "src/App.sln",
                "-c:Release",
                "--force",
                "--no-dependencies",
                "--no-incremental",
                "--no-restore",
                "-f:net8.0",
                "-r:linux-x64",
                "-t:Restore",
                "-t:Build",
                "-t:Publish",
                "--version-suffix",
                "beta.1",
                "--nologo",
                "--output",
                "/path/to/output",
                "-p:Version=1.2.3",
                "-p:CI=",
                "-v:minimal",
                "--tl:off",
                "-bl:my log.binlog",
            ])
        );
    }

    #[test]
    fn test_build_boolean_toggles_add_exactly_one_token() {
        type Toggle = fn(&mut Build);
        let toggles: [(Toggle, &str); 4] = [
            (|b| b.force = true, "--force"),
            (|b| b.no_dependencies = true, "--no-dependencies"),
            (|b| b.no_incremental = true, "--no-incremental"),
            (|b| b.no_restore = true, "--no-restore"),
        ];
        let base = Build {
            common: MsBuildOptions {
                project: Some("App.csproj".to_string()),
                verbosity: Some("quiet".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let before = assemble(&base);
        for (toggle, expected) in toggles {
            let mut changed = base.clone();
            toggle(&mut changed);
            let after = assemble(&changed);
            assert_eq!(after.len(), before.len() + 1);
            let mut without: Vec<String> = after.clone();
            let pos = without.iter().position(|t| t == expected).unwrap();
            without.remove(pos);
            assert_eq!(without, before);
        }
    }

    #[test]
    fn test_blank_scalars_add_nothing() {
        let build = Build {
            common: MsBuildOptions {
                project: Some("  ".to_string()),
                configuration: Some(String::new()),
                output_directory: None,
                verbosity: Some("\t".to_string()),
                ..Default::default()
            },
            framework: Some(" ".to_string()),
            targets: Some(RawList::from("   ")),
            ..Default::default()
        };
        assert_eq!(assemble(&build), expect(&["build"]));
    }

    #[test]
    fn test_custom_command_defaults_to_executable_only() {
        assert_eq!(assemble(&Custom::default()), expect(&[]));
    }

    #[test]
    fn test_custom_command_with_name_and_project() {
        let custom = Custom {
            command: Some("unit-test".to_string()),
            common: MsBuildOptions {
                project: Some("Foo.Bar.sln".to_string()),
                ..Default::default()
            },
        };
        assert_eq!(assemble(&custom), expect(&["unit-test", "Foo.Bar.sln"]));
    }

    #[test]
    fn test_nologo_flag() {
        let custom = with_common(MsBuildOptions {
            nologo: true,
            ..Default::default()
        });
        assert_eq!(assemble(&custom), expect(&["--nologo"]));
    }

    #[test]
    fn test_output_directory_is_flag_and_value() {
        let custom = with_common(MsBuildOptions {
            output_directory: Some("/path/to/output".to_string()),
            ..Default::default()
        });
        assert_eq!(assemble(&custom), expect(&["--output", "/path/to/output"]));
    }

    #[test]
    fn test_properties_block() {
        let block = "# A comment\n\n# That was a blank line\nMyProperty=Value \\\n Containing=An Equals Sign\n# A Comment";
        let custom = with_common(MsBuildOptions {
            properties: Some(block.to_string()),
            ..Default::default()
        });
        assert_eq!(
            assemble(&custom),
            expect(&["-p:MyProperty=Value Containing=An Equals Sign"])
        );

        let single = with_common(MsBuildOptions {
            properties: Some("SingleIdentifier".to_string()),
            ..Default::default()
        });
        assert_eq!(assemble(&single), expect(&["-p:SingleIdentifier="]));

        for blank in ["", "  "] {
            let custom = with_common(MsBuildOptions {
                properties: Some(blank.to_string()),
                ..Default::default()
            });
            assert_eq!(assemble(&custom), expect(&[]));
        }
    }

    #[test]
    fn test_options_forms() {
        let line = with_common(MsBuildOptions {
            options: Some(ExtraOptions::Line("--random -o:ptions 'Including Whatever'".to_string())),
            ..Default::default()
        });
        assert_eq!(
            assemble(&line),
            expect(&["--random", "-o:ptions", "Including Whatever"])
        );

        let items = with_common(MsBuildOptions {
            options: Some(ExtraOptions::Items(vec![
                Some("--random -o:ptions 'Including Whatever'".to_string()),
            ])),
            ..Default::default()
        });
        assert_eq!(
            assemble(&items),
            expect(&["--random -o:ptions 'Including Whatever'"])
        );

        let blanks = with_common(MsBuildOptions {
            options: Some(ExtraOptions::Items(vec![None, Some(String::new()), Some("  ".to_string())])),
            ..Default::default()
        });
        assert_eq!(assemble(&blanks), expect(&[]));
    }

    #[test]
    fn test_verbosity_flag() {
        let custom = with_common(MsBuildOptions {
            verbosity: Some("minimal".to_string()),
            ..Default::default()
        });
        assert_eq!(assemble(&custom), expect(&["-v:minimal"]));
    }

    #[test]
    fn test_clean() {
        assert_eq!(assemble(&Clean::default()), expect(&["clean"]));
        let clean = Clean {
            common: MsBuildOptions {
                project: Some("App.csproj".to_string()),
                ..Default::default()
            },
            framework: Some("net8.0".to_string()),
            runtime: Some("win-x64".to_string()),
        };
        assert_eq!(
            assemble(&clean),
            expect(&["clean", "App.csproj", "-f:net8.0", "-r:win-x64"])
        );
    }

    #[test]
    fn test_pack() {
        assert_eq!(assemble(&Pack::default()), expect(&["pack"]));
        let pack = Pack {
            include_symbols: true,
            no_build: true,
            serviceable: true,
            version_suffix: Some("ci.42".to_string()),
            common: MsBuildOptions {
                output_directory: Some("out".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            assemble(&pack),
            expect(&[
                "pack",
                "--include-symbols",
                "--no-build",
                "--serviceable",
                "--version-suffix",
                "ci.42",
                "--output",
                "out",
            ])
        );
    }

    #[test]
    fn test_publish_self_contained_is_tri_state() {
        assert_eq!(assemble(&Publish::default()), expect(&["publish"]));

        let yes = Publish {
            runtime: Some("linux-musl-x64".to_string()),
            self_contained: Some(true),
            ..Default::default()
        };
        assert_eq!(
            assemble(&yes),
            expect(&["publish", "-r:linux-musl-x64", "--self-contained", "true"])
        );

        let no = Publish {
            self_contained: Some(false),
            ..Default::default()
        };
        assert_eq!(assemble(&no), expect(&["publish", "--self-contained", "false"]));
    }

    #[test]
    fn test_publish_manifests() {
        let publish = Publish {
            manifests: Some(RawList::from(vec!["store one.xml", "store2.xml"])),
            ..Default::default()
        };
        assert_eq!(
            assemble(&publish),
            expect(&["publish", "--manifest", "store one.xml", "--manifest", "store2.xml"])
        );
    }
}
