use crate::{
    commands::utils::can_prompt,
    core::{command::{CommandExecutor, CommandRunner, SystemExecutor}, config::Config},
    ui::display::AppUI,
};

pub struct App {
    pub ui: AppUI,
    pub config: Config,
    /// 是否可以弹出输入提示
    pub interactive: bool,
    executor: Box<dyn CommandExecutor>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let executor = SystemExecutor::new(config.locale.clone());
        App {
            interactive: can_prompt(),
            ..Self::with_executor(config, Box::new(executor))
        }
    }

    /// 非交互模式，外部命令交给指定的 executor
    pub fn with_executor(config: Config, executor: Box<dyn CommandExecutor>) -> Self {
        App {
            ui: AppUI::new(),
            config,
            interactive: false,
            executor,
        }
    }

    /// 每个请求使用自己的 runner 和操作日志
    pub fn runner(&self) -> CommandRunner<'_> {
        CommandRunner::with_config(self.executor.as_ref(), &self.config)
    }
}
