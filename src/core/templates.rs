//! Template system for consistent output formatting.
//!
//! Every line the navigation commands print goes through a template from
//! [`TEMPLATES`], so the numbered option lists look the same at every stage.
//! Placeholders are replaced in a single pass, then colors are applied per
//! template.
//!
//! # Public API
//! - [`Templates`]: Template definitions for all output sections
//! - [`TemplateContext`]: Context data for template rendering
//! - [`TEMPLATES`]: Global template instance
//! - [`render_template`]: Rendering with colors
//! - [`render_template_plain`]: Plain text rendering for testing
//! - [`strip_ansi_codes`]: Utility for removing color codes
//! - [`forecast_type_description`]: Short description of the known forecast types

use colored::*;
use std::fmt::Write;

/// Template definitions for all output formatting
pub struct Templates {
    pub header_path: &'static str,
    pub header_root: &'static str,
    pub section_stage: &'static str,
    pub option_line: &'static str,
    pub file_line: &'static str,
    pub preview_header: &'static str,
    pub preview_counts: &'static str,
    pub preview_line: &'static str,
}

/// Global templates instance
pub static TEMPLATES: Templates = Templates {
    header_path: "Path: {path}",
    header_root: "Path: -",
    section_stage: "➤ {title}:",
    option_line: "   [{n}] {label}{detail}",
    file_line: "   [{n}] {label}  {detail}",
    preview_header: "➤ 파일 미리보기: {label} · 인코딩 {detail}",
    preview_counts: "   표시된 줄 수: {detail}",
    preview_line: "   │ {label}",
};

/// Context for template rendering
#[derive(Debug, Default)]
pub struct TemplateContext<'a> {
    pub path: Option<&'a str>,
    pub title: Option<&'a str>,
    pub label: Option<&'a str>,
    pub detail: Option<&'a str>,
    pub n: Option<usize>,
    /// Highlight the line, e.g. the file currently previewed
    pub active: bool,
}

/// Render a template with context and apply colors
pub fn render_template(template: &str, context: &TemplateContext) -> String {
    let estimated_capacity = template.len()
        + context.path.map_or(0, str::len)
        + context.title.map_or(0, str::len)
        + context.label.map_or(0, str::len)
        + context.detail.map_or(0, str::len)
        + 64;

    let mut result = String::with_capacity(estimated_capacity);
    render_template_single_pass(template, context, &mut result);
    apply_colors(&result, template, context)
}

fn render_template_single_pass(template: &str, context: &TemplateContext, output: &mut String) {
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            // No closing brace, keep the remainder literally
            output.push_str(&rest[open..]);
            return;
        };

        let placeholder = &after[..close];
        let value = match placeholder {
            "path" => context.path,
            "title" => context.title,
            "label" => context.label,
            "detail" => context.detail,
            "n" => {
                if let Some(n) = context.n {
                    let _ = write!(output, "{n}");
                }
                rest = &after[close + 1..];
                continue;
            }
            _ => {
                output.push('{');
                output.push_str(placeholder);
                output.push('}');
                rest = &after[close + 1..];
                continue;
            }
        };
        if let Some(value) = value {
            output.push_str(value);
        }
        rest = &after[close + 1..];
    }

    output.push_str(rest);
}

fn apply_colors(text: &str, template: &str, context: &TemplateContext) -> String {
    let mut result = String::with_capacity(text.len() + 64);

    match template {
        t if t == TEMPLATES.header_path => {
            let path = context.path.unwrap_or_default();
            let _ = write!(result, "Path: {}", path.blue());
        }
        t if t == TEMPLATES.header_root => {
            let _ = write!(result, "Path: {}", "-".bright_black());
        }
        t if t == TEMPLATES.section_stage => {
            let title = context.title.unwrap_or_default();
            let _ = write!(result, "{} {}", "➤".cyan(), format!("{title}:").cyan());
        }
        t if t == TEMPLATES.option_line || t == TEMPLATES.file_line => {
            result.push_str("   ");
            if let Some(n) = context.n {
                let _ = write!(
                    result,
                    "{}{}{}",
                    "[".bright_black(),
                    n.to_string().white(),
                    "]".bright_black()
                );
            }
            result.push(' ');

            let label = context.label.unwrap_or_default();
            if context.active {
                let _ = write!(result, "{}", label.green().bold());
            } else {
                let _ = write!(result, "{}", label.white());
            }

            if let Some(detail) = context.detail {
                if t == TEMPLATES.file_line {
                    result.push_str("  ");
                }
                let _ = write!(result, "{}", detail.bright_black());
            }
        }
        t if t == TEMPLATES.preview_header => {
            let _ = write!(
                result,
                "{} {} {} {}",
                "➤".green(),
                "파일 미리보기:".green(),
                context.label.unwrap_or_default().white(),
                format!("· 인코딩 {}", context.detail.unwrap_or_default()).bright_black()
            );
        }
        t if t == TEMPLATES.preview_line => {
            let _ = write!(
                result,
                "   {} {}",
                "│".bright_black(),
                context.label.unwrap_or_default()
            );
        }
        _ => result.push_str(text),
    }

    result
}

/// Strip ANSI color codes for testing
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Render template without colors for testing
pub fn render_template_plain(template: &str, context: &TemplateContext) -> String {
    strip_ansi_codes(&render_template(template, context))
}

/// Description shown next to the well-known forecast types
pub fn forecast_type_description(name: &str) -> Option<&'static str> {
    match name {
        "단기예보" => Some("3~5일 정도의 날씨를 예측하는 예보"),
        "초단기예보" => Some("예보 시점부터 6시간까지의 가까운 날씨 변화를 예측합니다."),
        "초단기실황" => Some(
            "현재 날씨 상태를 5km 격자 단위로 보여주는, 관측(AWS)값을 기반으로 한 실시간 정보",
        ),
        _ => None,
    }
}
