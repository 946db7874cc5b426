use std::{cell::RefCell, io};

use comfy_table::{Cell, ContentArrangement, Table, presets};
use crossterm::{cursor, execute, style::{self, SetForegroundColor, Stylize}};
use dialoguer::theme;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::{core::{error::{AppError, AppResult}, utils::CursorGuard}, ui::models::{RepositoryRow, SpinnerInfo}};

pub struct AppUI {
    spinner: RefCell<Option<SpinnerInfo>>,
    dialoguer_color_theme: theme::ColorfulTheme,
    _cursor_guard: CursorGuard,
}

impl Default for AppUI {
    fn default() -> Self {
        Self::new()
    }
}

impl AppUI {
    pub fn new() -> Self {
        let mut color_theme = dialoguer::theme::ColorfulTheme::default();
        color_theme.success_prefix = dialoguer::console::style(String::from("[ OK ]")).green().bold().bright();
        color_theme.error_prefix = dialoguer::console::style(String::from("[ERR!]")).red().bright().bold();
        color_theme.prompt_prefix = dialoguer::console::style(String::from("[INFO]")).blue().bright().bold();
        color_theme.success_suffix = dialoguer::console::style(String::new());
        color_theme.prompt_style = dialoguer::console::Style::new().for_stderr();
        color_theme.prompt_suffix = dialoguer::console::style(String::new()).for_stderr().black().bright();

        AppUI {
            spinner: RefCell::new(None),
            dialoguer_color_theme: color_theme,
            _cursor_guard: CursorGuard::new(),
        }
    }

    /// 打印普通信息
    pub fn info(&self, msg: &str) {
        self.print_safe(format!("{} {}", "[INFO]".blue().bold(), msg));
    }

    /// 打印成功信息
    pub fn success(&self, msg: &str) {
        self.finish_step();
        self.print_safe(format!("{} {}", "[ OK ]".green().bold(), msg));
    }

    /// 打印错误 (Red cross)
    pub fn error(&self, msg: &str) {
        self.finish_step();
        self.print_colored("[ERR!]".red().bold().to_string(), style::Color::Red, msg);
    }

    /// 更新 spinner
    pub fn update_step(&self, msg: &str) {
        if let Some(pb_info) = self.spinner.borrow().as_ref() {
            pb_info.pb.set_message(msg.to_string());
            return;
        }
        self.start_step(msg);
    }

    /// list 显示
    pub fn show_repository_list(&self, rows: &[RepositoryRow]) {
        self.finish_step();
        if rows.is_empty() {
            self.info("No repositories found.");
            return;
        }

        let table = self.repository_table(rows);
        self.print_safe(format!("{}", table));
    }

    /// NAME / URL / DATE / DESCRIPTION
    fn repository_table(&self, rows: &[RepositoryRow]) -> Table {
        let mut table = self.create_clean_table();

        let header_cell1 = Cell::new("  NAME").fg(comfy_table::Color::DarkGrey).add_attribute(comfy_table::Attribute::Bold);
        let header_cell2 = Cell::new("URL").fg(comfy_table::Color::DarkGrey).add_attribute(comfy_table::Attribute::Bold);
        let header_cell3 = Cell::new("DATE").fg(comfy_table::Color::DarkGrey).add_attribute(comfy_table::Attribute::Bold);
        let header_cell4 = Cell::new("DESCRIPTION").fg(comfy_table::Color::DarkGrey).add_attribute(comfy_table::Attribute::Bold);
        table.set_header([header_cell1, header_cell2, header_cell3, header_cell4]);

        for column in table.column_iter_mut() {
            column.set_padding((0, 3));
        }

        let mut max_name = 6;
        for row in rows {
            max_name = std::cmp::max(max_name, row.name.width() + 2);

            let c_name = Cell::new(format!("  {}", row.name)).fg(comfy_table::Color::Yellow).add_attribute(comfy_table::Attribute::Bold);
            let c_date = Cell::new(row.date_cell()).fg(comfy_table::Color::DarkGrey);
            let c_readme = match row.readme {
                Some(_) => Cell::new(row.readme_cell()),
                None => Cell::new(row.readme_cell()).add_attribute(comfy_table::Attribute::Italic).fg(comfy_table::Color::DarkGrey),
            };
            let c_url = Cell::new(&row.url).fg(comfy_table::Color::Blue);

            table.add_row([c_name, c_url, c_date, c_readme]);
        }

        if let Some(column) = table.column_mut(0) {
            column.set_constraint(comfy_table::ColumnConstraint::LowerBoundary(comfy_table::Width::Fixed(max_name as u16)));
        }
        table
    }

    /// 创建仓库后的日志显示
    pub fn show_log(&self, log: &str) {
        self.finish_step();
        for line in log.lines() {
            if line.starts_with("-- ") {
                self.print_safe(format!("{}", line.yellow()));
            } else if line.starts_with("== ") {
                self.print_safe(format!("{}", line.dark_grey()));
            } else {
                self.print_safe(line.to_string());
            }
        }
    }

    /// JSON 输出，给脚本使用
    pub fn show_json<T: Serialize>(&self, value: &T) -> AppResult<()> {
        self.finish_step();
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.print_safe(text);
        Ok(())
    }

    /// 开启一个 Input，返回输入结果，可以为空 String
    pub fn input(&self, prompt: &str) -> AppResult<String> {
        if let Some(pb_info) = &self.spinner.borrow().as_ref() {
            let message = pb_info.get_current_message();
            return pb_info.pb.suspend(|| {
                self.get_input_result(prompt, Some(&message))
            });
        }
        self.get_input_result(prompt, None)
    }

    /// 开启一个 Input
    fn get_input_result(&self, prompt: &str, message: Option<&str>) -> AppResult<String> {
        let mut stderr_io = io::stderr();
        if let Some(msg) = message {
            execute!(stderr_io, crossterm::style::Print(msg)).ok();
            execute!(stderr_io, cursor::MoveLeft(msg.width() as u16)).ok();
        }
        execute!(stderr_io, cursor::Show).ok();

        let result = match dialoguer::Input::<String>::with_theme(&self.dialoguer_color_theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text() {
                Ok(input) => Ok(input),
                Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Err(AppError::OperationCancelled),
                Err(e) => Err(AppError::Validation(e.to_string())),
        };
        execute!(stderr_io, cursor::Hide).ok();
        result
    }

    /// 开启一个 spinner
    fn start_step(&self, msg: &str) {
        let has_spinner = self.spinner.borrow().is_some();
        if has_spinner { self.finish_step(); }

        let spinner_info = SpinnerInfo::new();
        spinner_info.pb.set_message(msg.to_string());
        *self.spinner.borrow_mut() = Some(spinner_info);
    }

    /// 结束 spinner
    fn finish_step(&self) {
        if let Some(pb_info) = self.spinner.borrow_mut().take() {
            pb_info.pb.finish_and_clear();
        }
    }

    /// 带颜色的多行信息，消息内部的 reset 不会打断颜色
    fn print_colored(&self, prefix: String, color: style::Color, msg: &str) {
        let style_prefix = format!("{}", SetForegroundColor(color));
        let reset_all = format!("{}", style::Attribute::Reset);
        let reset_fg = format!("{}", SetForegroundColor(style::Color::Reset));
        let restore_patch = format!("{}{}", reset_all, style_prefix);
        let fixed_msg = msg.replace(&reset_all, &restore_patch).replace(&reset_fg, &restore_patch);

        self.print_safe(format!("{} {}{}{}", prefix, style_prefix, fixed_msg, reset_all));
    }

    fn print_safe(&self, msg: String) {
        if let Some(pb_info) = &self.spinner.borrow().as_ref() {
            pb_info.pb.suspend(|| println!("{}", msg));
        } else {
            println!("{}", msg);
        }
    }

    /// 创建一个无边框且动态宽度的表格
    fn create_clean_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING) // 无边框
            .set_content_arrangement(ContentArrangement::Dynamic); // 动态宽度
        table
    }
}
