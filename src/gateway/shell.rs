// src/gateway/shell.rs

/// Command interpreter used for shell-mediated execution.
///
/// A shell launch runs `program flag "<executable> <arg1> <arg2> ..."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: String,
    flag: String,
}

impl Shell {
    pub fn new(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }

    /// `/bin/sh -c` on Unix, `cmd /C` on Windows.
    pub fn platform() -> Self {
        if cfg!(windows) {
            Self::new("cmd", "/C")
        } else {
            Self::new("/bin/sh", "-c")
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// Join the executable and its arguments with single spaces, verbatim.
    pub fn command_line(&self, executable: &str, arguments: &[String]) -> String {
        let mut line = String::from(executable);
        for arg in arguments {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::platform()
    }
}
