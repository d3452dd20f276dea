use crate::commands::status::print_navigation;
use crate::core::{
    choice_parser::ChoiceParser,
    command_init::{CommandContext, CommandInit, SessionOptions},
    error::{NavigatorError, Result},
    print_info,
};
use std::sync::Arc;

/// Show the first lines of a file, or hide them if that file is already shown
pub async fn execute_preview(
    options: &SessionOptions,
    choice_args: Vec<String>,
    lines: Option<u32>,
) -> Result<()> {
    if choice_args.is_empty() {
        return Err(NavigatorError::NoChoiceProvided);
    }

    let mut context = CommandInit::initialize(options).await?;
    context.print_warnings();
    let outcome = toggle(&mut context, &choice_args, lines).await;
    let identifier = context.finish(outcome)?;

    if context.resolver.preview().is_none() {
        print_info(&format!("Preview of '{identifier}' closed."));
    }
    print_navigation(&context.resolver);
    Ok(())
}

pub(crate) fn resolve_file(context: &CommandContext, choice_args: &[String]) -> Result<String> {
    if !context.resolver.path().is_complete() {
        return Err(NavigatorError::PathIncomplete);
    }
    let identifiers: Vec<&str> = context
        .resolver
        .files()
        .map(|files| files.iter().map(|entry| entry.identifier.as_str()).collect())
        .unwrap_or_default();
    ChoiceParser::resolve(choice_args, &identifiers)
}

async fn toggle(
    context: &mut CommandContext,
    choice_args: &[String],
    lines: Option<u32>,
) -> Result<String> {
    let identifier = resolve_file(context, choice_args)?;
    let line_limit = lines.unwrap_or(context.config.preview_lines);

    let client = Arc::clone(&context.client);
    context
        .resolver
        .toggle_preview(client.as_ref(), &identifier, line_limit)
        .await?;
    Ok(identifier)
}
