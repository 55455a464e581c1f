//! Small helpers: pretty formatting for logs, executable lookup.

pub mod fmt {
    use std::{
        fmt::{self, Display},
        path::{Path, PathBuf},
        process::Command,
    };

    /// Pretty path formatting: replace $HOME with ~, put quotes around if needed.
    pub fn path(path: &Path) -> String {
        lazy_static::lazy_static! {
            static ref HOME: Option<PathBuf> = std::env::var_os("HOME").map(PathBuf::from);
        }
        let s = match (*HOME).as_ref().and_then(|home| path.strip_prefix(home).ok()) {
            Some(suffix) => Path::new("~").join(suffix).to_string_lossy().into_owned(),
            None => path.to_string_lossy().into_owned(),
        };
        if s.contains(char::is_whitespace) { format!("'{}'", s) } else { s }
    }

    /// Converts a command into the string that will be executed, for logging.
    pub fn command(cmd: &Command) -> String {
        std::iter::once(cmd.get_program())
            .chain(cmd.get_args())
            .map(|arg| path(Path::new(arg)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Formats duration as `H:MM:SS.mmm`.
    pub struct Duration(pub std::time::Duration);

    impl Display for Duration {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut seconds = self.0.as_secs();
            write!(f, "{}:", seconds / 3600)?;
            seconds %= 3600;
            write!(f, "{:02}:{:02}.{:03}", seconds / 60, seconds % 60, self.0.subsec_millis())
        }
    }
}

pub mod sys {
    use std::path::{Path, PathBuf};
    use crate::Error;

    /// Finds an executable, and returns Error, if executable is not available.
    pub fn find_exe(p: impl AsRef<Path>) -> crate::Result<PathBuf> {
        which::which(p.as_ref()).map_err(|_| Error::NoExec(p.as_ref().to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::{path::Path, process::Command, time::Duration};
    use super::fmt;

    #[test]
    fn duration_formatting() {
        assert_eq!(fmt::Duration(Duration::from_millis(1500)).to_string(), "0:00:01.500");
        assert_eq!(fmt::Duration(Duration::from_secs(3600 + 23 * 60 + 45)).to_string(), "1:23:45.000");
    }

    #[test]
    fn paths_with_whitespace_are_quoted() {
        assert_eq!(fmt::path(Path::new("aligned.fasta")), "aligned.fasta");
        assert_eq!(fmt::path(Path::new("my sequences.fasta")), "'my sequences.fasta'");
    }

    #[test]
    fn command_rendering() {
        let mut cmd = Command::new("muscle");
        cmd.arg("-in").arg("in.fasta").arg("-out").arg("out.fasta");
        assert_eq!(fmt::command(&cmd), "muscle -in in.fasta -out out.fasta");
    }
}
