use crate::commands::status::print_navigation;
use crate::core::{
    command_init::{CommandContext, CommandInit, SessionOptions},
    error::Result,
};

/// Load the listing below the deepest selection again
pub async fn execute_retry(options: &SessionOptions) -> Result<()> {
    let mut context = CommandInit::initialize(options).await?;
    context.print_warnings();

    let outcome = retry(&mut context).await;
    context.finish(outcome)?;
    print_navigation(&context.resolver);
    Ok(())
}

async fn retry(context: &mut CommandContext) -> Result<()> {
    if context.resolver.path().is_empty() {
        // Initialization has just reloaded the forecast types
        return Ok(());
    }

    if let Some(request) = context.resolver.reselect()? {
        let response = request.execute(context.client.as_ref()).await;
        context.resolver.apply(response)?;
    }
    Ok(())
}
