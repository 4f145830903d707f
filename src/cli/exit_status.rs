use std::process::ExitCode;

/// Process exit codes shared by every subcommand.
///
/// | code | meaning |
/// |------|---------|
/// | 0 | `scan` finished (missing keys are reported, not fatal); `hover` printed a translation; `init` wrote the config |
/// | 1 | `hover` found no translation at the position; `init` found an existing config |
/// | 2 | unreadable source file, invalid config, or a server that stopped with an error |
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Failure = 1,
    Error = 2,
}

impl ExitStatus {
    /// `Success` when a lookup produced something, `Failure` otherwise.
    pub fn from_found(found: bool) -> Self {
        if found { Self::Success } else { Self::Failure }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}
