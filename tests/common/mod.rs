//! Shared fixtures: a stateful fake of `svnadmin`/`svn`/`svnlook` that keeps
//! its "repository store" as plain files, so a created repository can be
//! listed again afterwards.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    fs, io,
    path::{Path, PathBuf},
};

use repolist::{CommandExecutor, CommandLine, Config, RawOutput};

const STORE_MARKER: &str = "format";
const HEAD_DIR: &str = "head";
const COMMITS_FILE: &str = "commits";
const ORIGIN_FILE: &str = ".svn-origin";

#[derive(Default)]
pub struct FakeSvn {
    pub calls: RefCell<Vec<CommandLine>>,
    fail_on: Option<(String, String)>,
    commit_date: String,
}

impl FakeSvn {
    pub fn new() -> Self {
        FakeSvn {
            commit_date: "2024-06-01 10:00:00 +0000 (Sat, 01 Jun 2024)".to_string(),
            ..Default::default()
        }
    }

    pub fn failing(program: &str, subcommand: &str) -> Self {
        FakeSvn {
            fail_on: Some((program.to_string(), subcommand.to_string())),
            ..Self::new()
        }
    }

    pub fn with_commit_date(mut self, date: &str) -> Self {
        self.commit_date = date.to_string();
        self
    }

    pub fn count(&self, program: &str, subcommand: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program_name() == program && c.subcommand().as_deref() == Some(subcommand))
            .count()
    }

    fn arg(command: &CommandLine, i: usize) -> PathBuf {
        command.args.get(i).map(PathBuf::from).unwrap_or_default()
    }

    fn ok(text: impl Into<String>) -> RawOutput {
        RawOutput { code: Some(0), bytes: text.into().into_bytes() }
    }

    fn fail(text: &str) -> RawOutput {
        RawOutput { code: Some(1), bytes: text.as_bytes().to_vec() }
    }

    fn commit(&self, work_copy: &Path) -> io::Result<RawOutput> {
        let store = PathBuf::from(fs::read_to_string(work_copy.join(ORIGIN_FILE))?);
        let head = store.join(HEAD_DIR);
        fs::create_dir_all(&head)?;
        for entry in fs::read_dir(work_copy)? {
            let entry = entry?;
            if entry.file_name() == ORIGIN_FILE {
                continue;
            }
            let dest = head.join(entry.file_name());
            if entry.path().is_dir() {
                fs::create_dir_all(dest)?;
            } else {
                fs::copy(entry.path(), dest)?;
            }
        }
        let mut commits = fs::read_to_string(store.join(COMMITS_FILE)).unwrap_or_default();
        commits.push_str(&self.commit_date);
        commits.push('\n');
        fs::write(store.join(COMMITS_FILE), &commits)?;
        Ok(Self::ok(format!("Committed revision {}.", commits.lines().count())))
    }

    fn svnlook(&self, sub: &str, command: &CommandLine) -> io::Result<RawOutput> {
        let store = Self::arg(command, 1);
        if !store.join(STORE_MARKER).is_file() {
            return Ok(Self::fail("svnlook: E000002: Can't open file 'format'"));
        }
        let commits = fs::read_to_string(store.join(COMMITS_FILE)).unwrap_or_default();
        let out = match sub {
            "youngest" => Self::ok(format!("{}\n", commits.lines().count())),
            "date" => match commits.lines().last() {
                Some(date) => Self::ok(date.to_string()),
                // 空仓库的 svnlook date 输出为空
                None => Self::ok(""),
            },
            "cat" => match fs::read_to_string(store.join(HEAD_DIR).join(Self::arg(command, 2))) {
                Ok(text) => Self::ok(text),
                Err(_) => Self::fail("svnlook: E160013: Path 'README.txt' does not exist"),
            },
            "history" => {
                let sub = Self::arg(command, 4);
                let rel = sub.strip_prefix("/").unwrap_or(&sub);
                if store.join(HEAD_DIR).join(rel).exists() {
                    Self::ok(format!("REVISION   PATH\n--------   ----\n       1   {}", sub.display()))
                } else {
                    Self::fail("svnlook: E160013: File not found")
                }
            }
            _ => Self::fail("svnlook: unknown subcommand"),
        };
        Ok(out)
    }
}

impl CommandExecutor for FakeSvn {
    fn execute(&self, command: &CommandLine) -> io::Result<RawOutput> {
        self.calls.borrow_mut().push(command.clone());

        let program = command.program_name();
        let sub = command.subcommand().unwrap_or_default();
        if let Some((p, s)) = &self.fail_on {
            if &program == p && &sub == s {
                return Ok(Self::fail("svn: E170013: Unable to connect to a repository\n"));
            }
        }

        match (program.as_str(), sub.as_str()) {
            ("svnadmin", "create") => {
                let store = Self::arg(command, 1);
                fs::create_dir_all(&store)?;
                fs::write(store.join(STORE_MARKER), "5\n")?;
                Ok(Self::ok(""))
            }
            ("svn", "checkout") => {
                let url = command.args[1].to_string_lossy().into_owned();
                let path = url.trim_start_matches("file://");
                let store = urlencoding::decode(path).map_err(io::Error::other)?.into_owned();
                let dest = Self::arg(command, 2);
                fs::create_dir_all(&dest)?;
                fs::write(dest.join(ORIGIN_FILE), &store)?;
                Ok(Self::ok("Checked out revision 0."))
            }
            ("svn", "add") => Ok(Self::ok("A         trunk")),
            ("svn", "commit") => {
                let work_copy = command.cwd.clone().unwrap_or_default();
                self.commit(&work_copy)
            }
            ("svnlook", sub) => self.svnlook(sub, command),
            _ => Ok(RawOutput { code: Some(127), bytes: b"command not found".to_vec() }),
        }
    }
}

/// A root, an authz file and a scratch directory under one temp dir.
pub struct Sandbox {
    pub dir: tempfile::TempDir,
    pub config: Config,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("svn-repositories");
        fs::create_dir(&root).expect("root");
        let config = Config {
            root,
            authz_file: dir.path().join("authz"),
            ..Config::default()
        };
        fs::write(&config.authz_file, "[/]\n* = r\n").expect("authz");
        Sandbox { dir, config }
    }

    pub fn authz(&self) -> String {
        fs::read_to_string(&self.config.authz_file).expect("read authz")
    }

    /// Entries in the scratch parent that look like leftover workspaces.
    pub fn scratch_leftovers(&self) -> Vec<String> {
        fs::read_dir(self.config.scratch_parent())
            .expect("scratch parent")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with(".repolist"))
            .collect()
    }
}
