//! Scripted stand-in for the Subversion binaries used by unit tests.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    fs, io,
    path::PathBuf,
};

use crate::core::command::{CommandExecutor, CommandLine, RawOutput};

#[derive(Default)]
pub(crate) struct FakeSvn {
    pub calls: RefCell<Vec<CommandLine>>,
    dates: HashMap<PathBuf, String>,
    youngest: HashMap<PathBuf, String>,
    readmes: HashMap<PathBuf, String>,
    trunks: HashSet<PathBuf>,
    fail_on: Option<(&'static str, &'static str)>,
}

impl FakeSvn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repo(mut self, path: impl Into<PathBuf>, date: &str, revision: &str) -> Self {
        let path = path.into();
        self.dates.insert(path.clone(), date.to_string());
        self.youngest.insert(path, revision.to_string());
        self
    }

    pub fn readme(mut self, path: impl Into<PathBuf>, text: &str) -> Self {
        self.readmes.insert(path.into(), text.to_string());
        self
    }

    pub fn trunk(mut self, path: impl Into<PathBuf>) -> Self {
        self.trunks.insert(path.into());
        self
    }

    /// Make `<program> <subcommand>` exit with status 1.
    pub fn fail_on(mut self, program: &'static str, subcommand: &'static str) -> Self {
        self.fail_on = Some((program, subcommand));
        self
    }

    pub fn count(&self, program: &str, subcommand: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program_name() == program && c.subcommand().as_deref() == Some(subcommand))
            .count()
    }

    fn reply(found: Option<&String>) -> RawOutput {
        match found {
            Some(text) => RawOutput { code: Some(0), bytes: text.clone().into_bytes() },
            None => RawOutput { code: Some(1), bytes: b"svnlook: E000002: not found".to_vec() },
        }
    }
}

impl CommandExecutor for FakeSvn {
    fn execute(&self, command: &CommandLine) -> io::Result<RawOutput> {
        self.calls.borrow_mut().push(command.clone());

        let program = command.program_name();
        let sub = command.subcommand().unwrap_or_default();
        if let Some((p, s)) = self.fail_on {
            if program == p && sub == s {
                return Ok(RawOutput { code: Some(1), bytes: b"E999999: simulated failure\n".to_vec() });
            }
        }

        let arg = |i: usize| command.args.get(i).map(PathBuf::from).unwrap_or_default();
        let ok = RawOutput { code: Some(0), bytes: Vec::new() };
        let out = match (program.as_str(), sub.as_str()) {
            ("svnlook", "date") => Self::reply(self.dates.get(&arg(1))),
            ("svnlook", "youngest") => Self::reply(self.youngest.get(&arg(1))),
            ("svnlook", "cat") => Self::reply(self.readmes.get(&arg(1))),
            ("svnlook", "history") => {
                let trunk = arg(4) == PathBuf::from("/trunk/") && self.trunks.contains(&arg(1));
                Self::reply(trunk.then(|| "REVISION   PATH\n--------   ----\n       1   /trunk/".to_string()).as_ref())
            }
            ("svnadmin", "create") => {
                fs::create_dir_all(arg(1))?;
                ok
            }
            ("svn", "checkout") => {
                fs::create_dir_all(arg(2))?;
                ok
            }
            ("svn", _) => ok,
            _ => RawOutput { code: Some(127), bytes: b"command not found".to_vec() },
        };
        Ok(out)
    }
}
