use crate::commands::status::print_navigation;
use crate::core::{
    command_init::{CommandInit, SessionOptions},
    error::Result,
};

/// Retreat level by level until nothing is selected
pub async fn execute_reset(options: &SessionOptions) -> Result<()> {
    let mut context = CommandInit::initialize(options).await?;
    context.print_warnings();

    let mut removed = 0;
    while context.resolver.retreat().is_some() {
        removed += 1;
    }
    log::debug!("Reset removed {removed} selected levels");

    context.finish(Ok(()))?;
    print_navigation(&context.resolver);
    Ok(())
}
