//! Command-line assembly for the `dotnet` SDK tool.
//!
//! This crate turns structured build-step configuration into the exact argument
//! lists a `dotnet` invocation needs. Free-form option strings are split
//! shell-style, multi-value fields are normalized, properties blocks are parsed
//! into `-p:key=value` arguments, and every argument derived from a credential
//! is marked sensitive so it can be redacted wherever a command line is shown.
//!
//! Assembly is pure and synchronous: an assembler reads its configuration,
//! looks up secrets through a [`SecretResolver`] and appends to an
//! [`ArgumentList`]. Launching the result is left to [`runner::ProcessRunner`]
//! or any other process launcher that passes each argument through unchanged.
//!
//! ```
//! use dotnet_commands::commands::{Build, Command, MsBuildOptions, Step};
//! use dotnet_commands::secrets::NoSecrets;
//!
//! let build = Build {
//!     common: MsBuildOptions {
//!         configuration: Some("Release".to_string()),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! let lists = Step::new(Command::Build(build)).invocations(&NoSecrets).unwrap();
//! assert_eq!(lists[0].tokens(), ["dotnet", "build", "-c:Release"]);
//! ```

pub mod args;
pub mod command;
pub mod commands;
pub mod config;
pub mod env;
pub mod lexer;
pub mod normalize;
pub mod properties;
pub mod runner;
pub mod secrets;

pub use args::{Arg, ArgumentList};
pub use command::{AssemblyError, CommandAssembler};
pub use commands::{Command, Step};
pub use secrets::{SecretNotFound, SecretResolver};
