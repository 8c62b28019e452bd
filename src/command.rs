use crate::args::ArgumentList;
use crate::secrets::{SecretNotFound, SecretResolver};
use thiserror::Error;

/// Why a command line could not be assembled.
///
/// Assembly either succeeds completely or fails with one of these; a partially
/// built list is never handed out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// A referenced credential could not be resolved.
    #[error(transparent)]
    SecretNotFound(#[from] SecretNotFound),

    /// A field the command cannot run without was left unset.
    #[error("{command}: required setting `{field}` is not set")]
    MissingSubject {
        command: &'static str,
        field: &'static str,
    },
}

/// Something that knows how to append one `dotnet` subcommand to an argument list.
///
/// Implementations are pure: given the same configuration and the same secret
/// values they append exactly the same arguments. The list passed in already
/// holds the executable.
pub trait CommandAssembler {
    /// Display name of the subcommand, e.g. `"nuget push"`.
    fn name(&self) -> &'static str;

    /// Append this command's arguments in their documented order.
    fn assemble(
        &self,
        secrets: &dyn SecretResolver,
        args: &mut ArgumentList,
    ) -> Result<(), AssemblyError>;

    /// Assemble into a fresh list for `executable`.
    fn to_argument_list(
        &self,
        executable: &str,
        secrets: &dyn SecretResolver,
    ) -> Result<ArgumentList, AssemblyError> {
        let mut args = ArgumentList::new(executable);
        self.assemble(secrets, &mut args)?;
        tracing::debug!(command = self.name(), args = %args, "assembled command line");
        Ok(args)
    }
}
