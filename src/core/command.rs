//! ### 执行外部命令
//!
//! 所有 svn / svnadmin / svnlook 调用都经过这里：固定 locale，合并 stdout 和 stderr，
//! 解码输出，并把每次调用写进操作日志

use std::{
    ffi::OsString,
    fmt,
    io::{self, Read},
    path::PathBuf,
    process::{Command, Stdio},
    rc::Rc,
};

use tracing::{debug, warn};

use crate::core::{
    config::Config,
    error::{AppError, AppResult},
    oplog::{CommandRecord, OperationLog},
    utils::OutputDecoder,
};

/// 一条待执行的命令，不经过 shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// 工作目录，`None` 表示继承当前目录
    pub cwd: Option<PathBuf>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandLine {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// 程序文件名，例如 `svnlook`
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// 第一个参数，通常是子命令
    pub fn subcommand(&self) -> Option<String> {
        self.args.first().map(|a| a.to_string_lossy().into_owned())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// 进程的原始结果，输出尚未解码
#[derive(Debug, Clone, Default)]
pub struct RawOutput {
    /// `None` if terminated by a signal.
    pub code: Option<i32>,
    pub bytes: Vec<u8>,
}

impl RawOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// 启动进程的接缝，测试中替换为脚本化的实现
pub trait CommandExecutor {
    fn execute(&self, command: &CommandLine) -> io::Result<RawOutput>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for Rc<T> {
    fn execute(&self, command: &CommandLine) -> io::Result<RawOutput> {
        (**self).execute(command)
    }
}

/// 真正 spawn 子进程的实现
#[derive(Debug, Clone)]
pub struct SystemExecutor {
    locale: String,
}

impl SystemExecutor {
    pub fn new(locale: impl Into<String>) -> Self {
        SystemExecutor { locale: locale.into() }
    }
}

impl CommandExecutor for SystemExecutor {
    fn execute(&self, command: &CommandLine) -> io::Result<RawOutput> {
        // stdout 和 stderr 共用一个管道，保持 2>&1 的输出顺序
        let (mut reader, writer) = io::pipe()?;

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .env("LANG", &self.locale)
            .env("LC_ALL", &self.locale)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);
        if let Some(dir) = &command.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn()?;
        // Command 仍持有写端，不释放就读不到 EOF
        drop(cmd);

        let mut bytes = Vec::new();
        let read_result = reader.read_to_end(&mut bytes);
        let status = child.wait()?;
        read_result?;

        Ok(RawOutput { code: status.code(), bytes })
    }
}

pub struct CommandRunner<'e> {
    executor: &'e dyn CommandExecutor,
    decoder: OutputDecoder,
}

impl<'e> CommandRunner<'e> {
    pub fn new(executor: &'e dyn CommandExecutor, decoder: OutputDecoder) -> Self {
        CommandRunner { executor, decoder }
    }

    pub fn with_config(executor: &'e dyn CommandExecutor, config: &Config) -> Self {
        Self::new(executor, OutputDecoder::new(config.source_encoding()))
    }

    /// Runs one command, appends its record to `log` whatever the outcome.
    pub fn run(&self, command: &CommandLine, log: &mut OperationLog) -> CommandRecord {
        let rendered = command.to_string();
        debug!(command = %rendered, "spawning");

        let record = match self.executor.execute(command) {
            Ok(raw) => CommandRecord {
                command: rendered,
                exit_code: raw.code,
                success: raw.success(),
                output: self.decoder.decode(&raw.bytes),
            },
            Err(e) => {
                warn!(command = %rendered, error = %e, "failed to spawn");
                CommandRecord {
                    command: rendered,
                    exit_code: None,
                    success: false,
                    output: e.to_string(),
                }
            }
        };

        debug!(exit_code = ?record.exit_code, success = record.success, "command finished");
        log.record(record.clone());
        record
    }

    /// 同 `run`，但失败时返回 `CommandFailed`，附带到目前为止的完整日志
    pub fn run_checked(&self, command: &CommandLine, log: &mut OperationLog) -> AppResult<CommandRecord> {
        let record = self.run(command, log);
        if record.success {
            Ok(record)
        } else {
            Err(AppError::CommandFailed {
                command: record.command,
                output: record.output,
                log: log.render(),
            })
        }
    }

    /// 只关心成功时的输出，失败时返回 `None`
    pub fn query(&self, command: &CommandLine) -> Option<String> {
        let mut scratch = OperationLog::new();
        let record = self.run(command, &mut scratch);
        record.success.then_some(record.output)
    }
}
