//! Command execution with error reporting and exit codes.

mod helpers;
mod package;
mod validate;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

use package::execute_package;
use validate::execute_validate;

/// Execute the main command based on parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    // Validate arguments
    if let Err(validation_error) = args.validate() {
        // Create output for validation errors (never quiet)
        let output = super::OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::Package(package_args) => execute_package(package_args, &config).await,
        Command::Validate(package_args) => execute_validate(package_args, &config).await,
    };

    match result {
        Ok(()) => {
            config.success_println(&format!(
                "Command '{}' completed successfully",
                args.command.name()
            ));
            Ok(0)
        }
        Err(e) => {
            config.error_println(&format!("Command '{}' failed: {}", args.command.name(), e));

            config.list("\nRecovery suggestions:", &e.recovery_suggestions());

            Ok(1)
        }
    }
}
