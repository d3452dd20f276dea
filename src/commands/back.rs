use crate::commands::status::print_navigation;
use crate::core::{
    command_init::{CommandInit, SessionOptions},
    error::Result,
    print_info,
};

pub async fn execute_back(options: &SessionOptions) -> Result<()> {
    let mut context = CommandInit::initialize(options).await?;
    context.print_warnings();

    match context.resolver.retreat() {
        Some(removed) => log::debug!("Removed '{removed}' from the selection"),
        None => print_info("Nothing selected yet."),
    }

    context.finish(Ok(()))?;
    print_navigation(&context.resolver);
    Ok(())
}
