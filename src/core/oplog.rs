//! ### 操作日志
//! 只追加，按顺序记录每条命令和步骤说明，最终拼接成文本给用户看

use std::fmt;

/// 一次外部命令调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    /// 渲染后的命令行
    pub command: String,
    /// `None` when the process was killed by a signal or never started.
    pub exit_code: Option<i32>,
    pub success: bool,
    /// 合并后的 stdout + stderr，已解码并去掉首尾空白
    pub output: String,
}

impl CommandRecord {
    fn status_line(&self) -> String {
        match self.exit_code {
            Some(code) => format!("== exit status: {}", code),
            None if self.success => "== exit status: 0".to_string(),
            None => "== exit status: none".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Command(CommandRecord),
    Note(String),
}

#[derive(Debug, Clone, Default)]
pub struct OperationLog {
    entries: Vec<Entry>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: CommandRecord) {
        self.entries.push(Entry::Command(record));
    }

    pub fn note(&mut self, msg: impl Into<String>) {
        self.entries.push(Entry::Note(msg.into()));
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandRecord> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Command(record) => Some(record),
            Entry::Note(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 拼接成文本，每个元素一行
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for entry in &self.entries {
            match entry {
                Entry::Command(record) => {
                    lines.push(format!("-- {}", record.command));
                    lines.push(record.status_line());
                    if !record.output.is_empty() {
                        lines.push(record.output.clone());
                    }
                }
                Entry::Note(msg) => lines.push(msg.clone()),
            }
        }
        lines.join("\n")
    }
}

impl fmt::Display for OperationLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
