use crate::commands::preview::resolve_file;
use crate::core::{
    command_init::{CommandInit, SessionOptions},
    error::{NavigatorError, Result},
    print_success,
};

/// Download a file of the current directory and wait for it to land
pub async fn execute_download(options: &SessionOptions, choice_args: Vec<String>) -> Result<()> {
    if choice_args.is_empty() {
        return Err(NavigatorError::NoChoiceProvided);
    }

    let context = CommandInit::initialize(options).await?;
    context.print_warnings();
    let request = resolve_file(&context, &choice_args)
        .and_then(|identifier| context.resolver.download(context.client.as_ref(), &identifier));
    let request = context.finish(request)?;

    for result in context.client.wait_for_downloads().await {
        let target = result?;
        print_success(&format!(
            "Downloaded '{}' to {}",
            request.identifier,
            target.display()
        ));
    }
    println!();
    Ok(())
}
