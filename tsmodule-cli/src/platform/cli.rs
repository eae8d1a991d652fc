//! CLI 格式化输出
//!
//! 提供命令行友好的错误显示和源码上下文打印。

use tsmodule_api::{ErrorReport, HookError};

/// 打印错误；有位置时附上源代码上下文
pub fn print_error(e: &HookError, json: bool) {
    let report = e.to_report();
    if json {
        match report.to_json() {
            Ok(line) => eprintln!("{line}"),
            Err(_) => eprintln!("{report}"),
        }
        return;
    }

    eprintln!("❌ {report}");
    if let Some(context) = source_context_for(&report) {
        eprint!("{context}");
    }
}

fn source_context_for(report: &ErrorReport) -> Option<String> {
    let (Some(location), Some(line), Some(column)) = (&report.location, report.line, report.column)
    else {
        return None;
    };
    let source = std::fs::read_to_string(location).ok()?;
    render_source_context(&source, line, column)
}

/// 渲染源代码上下文（显示错误行前后几行）
pub fn render_source_context(source: &str, error_line: usize, error_col: usize) -> Option<String> {
    const CONTEXT_LINES: usize = 2; // 错误行前后显示的上下文行数

    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return None;
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);

    // 行号宽度用于对齐
    let width = end_line.to_string().len();
    let separator = "-".repeat(width + 1);

    let mut out = format!("{separator}|--\n");
    for line_idx in start_line..=end_line {
        out.push_str(&format!("{:>width$} | {}\n", line_idx, lines[line_idx - 1]));
        if line_idx == error_line {
            let marker = " ".repeat(error_col.saturating_sub(1));
            out.push_str(&format!("{} | {}^\n", " ".repeat(width), marker));
        }
    }
    out.push_str(&format!("{separator}|--\n"));
    Some(out)
}
