use crate::commands::status::print_navigation;
use crate::core::{
    choice_parser::ChoiceParser,
    command_init::{CommandContext, CommandInit, SessionOptions},
    error::{NavigatorError, Result},
    level::Stage,
    resolver::ApplyOutcome,
};

pub async fn execute_select(options: &SessionOptions, choice_args: Vec<String>) -> Result<()> {
    if choice_args.is_empty() {
        return Err(NavigatorError::NoChoiceProvided);
    }

    let mut context = CommandInit::initialize(options).await?;
    context.print_warnings();

    let outcome = select(&mut context, &choice_args).await;
    let outcome = context.finish(outcome)?;

    if outcome == ApplyOutcome::Stale {
        log::debug!("Listing arrived for an older selection and was dropped");
    }
    print_navigation(&context.resolver);
    Ok(())
}

async fn select(context: &mut CommandContext, choice_args: &[String]) -> Result<ApplyOutcome> {
    let level = match context.resolver.stage() {
        Stage::Choose(level) => level,
        Stage::Files => return Err(NavigatorError::SelectionComplete),
    };

    let value = {
        let labels = context
            .resolver
            .next_options()
            .map(|options| options.labels())
            .unwrap_or_default();
        ChoiceParser::resolve(choice_args, &labels)?
    };

    log::debug!("Selecting {level} '{value}'");
    context.resolver.advance(level, &value).await
}
