use leechup::ProvisionError;

use crate::ui::blocks::error::ErrorBlock;

pub fn format_error(err: &anyhow::Error) -> String {
    let caps = crate::ui::terminal::detect_capabilities();
    format_error_with(err, caps.supports_color, caps.supports_unicode)
}

fn format_error_with(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    match err.downcast_ref::<ProvisionError>() {
        Some(provision) => format_provision_error(provision).render(supports_color, supports_unicode),
        None => format!("[ERROR] {:#}\n", err),
    }
}

fn format_provision_error(err: &ProvisionError) -> ErrorBlock {
    match err {
        ProvisionError::MissingCredentials { fields } => {
            ErrorBlock::new(format!("Missing required credentials: {}", fields.join(", ")))
                .with_fix(
                    "Pass --api-id/--api-hash/--bot-token/--user-id, \
                     set LEECHUP_* variables, or fill [credentials] in the config file.",
                )
        }
        ProvisionError::Reset { path, source } => {
            ErrorBlock::new(format!("Could not remove previous state: {}", source))
                .with_location(path)
                .with_fix("Check permissions on the content directory.")
        }
        ProvisionError::Persistence { path, source } => {
            ErrorBlock::new(format!("Failed to save credentials: {}", source))
                .with_location(path)
                .with_fix("Make sure the installation directory is writable.")
        }
        ProvisionError::VerificationMismatch { path } => ErrorBlock::new(
            "Credentials verification failed: the saved file differs from the configured values.",
        )
        .with_location(path)
        .with_fix("Drop --strict-verify to continue anyway, or inspect the file."),
        ProvisionError::ConfigFile { file, message } => {
            ErrorBlock::new(message.clone())
                .with_location(file)
                .with_fix("Fix the TOML syntax or pass a different --config.")
        }
        ProvisionError::Launch { program, source } => {
            ErrorBlock::new(format!("Error starting bot '{}': {}", program, source))
                .with_fix("Check that the interpreter is installed and on PATH.")
        }
        other => ErrorBlock::new(other.to_string()),
    }
}

pub fn print_error(err: &anyhow::Error) {
    eprint!("{}", format_error(err));
}
