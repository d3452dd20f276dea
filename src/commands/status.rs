use crate::core::{
    command_init::{CommandInit, SessionOptions},
    error::Result,
    level::{Level, Stage},
    records::{CatalogEntry, PreviewResult},
    resolver::CatalogResolver,
    source::CatalogSource,
    templates::{forecast_type_description, render_template, TemplateContext, TEMPLATES},
};

pub async fn execute_status(options: &SessionOptions) -> Result<()> {
    let context = CommandInit::initialize(options).await?;

    context.print_warnings();
    print_navigation(&context.resolver);

    context.finish(Ok(()))
}

/// Print the breadcrumb and whatever the user can choose next
pub fn print_navigation<S: CatalogSource + ?Sized>(resolver: &CatalogResolver<S>) {
    println!();
    for line in render_navigation(resolver) {
        println!("{line}");
    }
    println!();
}

pub fn render_navigation<S: CatalogSource + ?Sized>(resolver: &CatalogResolver<S>) -> Vec<String> {
    let mut lines = Vec::new();

    let path = resolver.path().breadcrumb();
    if path.is_empty() {
        lines.push(render_template(TEMPLATES.header_root, &TemplateContext::default()));
    } else {
        lines.push(render_template(
            TEMPLATES.header_path,
            &TemplateContext {
                path: Some(&path),
                ..Default::default()
            },
        ));
    }
    lines.push(String::new());

    let stage = resolver.stage();
    lines.push(render_template(
        TEMPLATES.section_stage,
        &TemplateContext {
            title: Some(stage.title()),
            ..Default::default()
        },
    ));

    match stage {
        Stage::Choose(level) => render_options(resolver, level, &mut lines),
        Stage::Files => render_files(resolver.files(), resolver.preview(), &mut lines),
    }

    lines
}

fn render_options<S: CatalogSource + ?Sized>(
    resolver: &CatalogResolver<S>,
    level: Level,
    lines: &mut Vec<String>,
) {
    let Some(options) = resolver.options(level) else {
        lines.push("   Not loaded. Run 'retry' to load it again.".to_string());
        return;
    };
    if options.is_empty() {
        lines.push("   No options available at this level.".to_string());
        return;
    }

    for (i, option) in options.iter().enumerate() {
        let detail = match (level, option.file_count) {
            (Level::ForecastType, _) => forecast_type_description(&option.label)
                .map(|description| format!(" - {description}")),
            (_, Some(count)) => Some(format!(" ({count} files)")),
            (_, None) => None,
        };
        lines.push(render_template(
            TEMPLATES.option_line,
            &TemplateContext {
                n: Some(i + 1),
                label: Some(&option.label),
                detail: detail.as_deref(),
                ..Default::default()
            },
        ));
    }
}

fn render_files(
    files: Option<&[CatalogEntry]>,
    preview: Option<&PreviewResult>,
    lines: &mut Vec<String>,
) {
    let Some(files) = files else {
        lines.push("   Not loaded. Run 'retry' to load it again.".to_string());
        return;
    };
    if files.is_empty() {
        lines.push("   No files in this directory.".to_string());
        return;
    }

    let previewed = preview.map(|preview| preview.entry.identifier.as_str());
    for (i, entry) in files.iter().enumerate() {
        let detail = format!(
            "{} ~ {} · {} MB",
            entry.coverage_start, entry.coverage_end, entry.size_mb
        );
        lines.push(render_template(
            TEMPLATES.file_line,
            &TemplateContext {
                n: Some(i + 1),
                label: Some(&entry.identifier),
                detail: Some(&detail),
                active: previewed == Some(entry.identifier.as_str()),
                ..Default::default()
            },
        ));
    }

    if let Some(preview) = preview {
        render_preview(preview, lines);
    }
}

fn render_preview(preview: &PreviewResult, lines: &mut Vec<String>) {
    let encoding = if preview.encoding.is_empty() {
        "알 수 없음"
    } else {
        preview.encoding.as_str()
    };
    let counts = format!(
        "{}/{} · 파일 크기: {} MB",
        preview.total_line_count, preview.requested_line_count, preview.entry.size_mb
    );

    lines.push(String::new());
    lines.push(render_template(
        TEMPLATES.preview_header,
        &TemplateContext {
            label: Some(&preview.entry.identifier),
            detail: Some(encoding),
            ..Default::default()
        },
    ));
    lines.push(render_template(
        TEMPLATES.preview_counts,
        &TemplateContext {
            detail: Some(&counts),
            ..Default::default()
        },
    ));

    if preview.sampled_lines.is_empty() {
        lines.push("   미리보기 데이터를 표시할 수 없습니다.".to_string());
    }
    for line in &preview.sampled_lines {
        lines.push(render_template(
            TEMPLATES.preview_line,
            &TemplateContext {
                label: Some(line),
                ..Default::default()
            },
        ));
    }
}
