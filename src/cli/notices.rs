// User-facing text for the activation flow

use crossterm::style::Stylize;

use crate::config::constants::SETTINGS_FILE_NAME;

/// Prompt shown before asking for an email.
pub fn email_prompt() -> String {
    format!(
        "\n  {}\n\n  \
         If you'd like to hear about releases or get personal support,\n  \
         enter your email address below. Otherwise, leave the field blank.\n\n  \
         Email",
        "Welcome to latchkey!".green()
    )
}

/// Shown once activation has been saved.
pub fn telemetry_notice(gather_usage_stats: bool) -> String {
    if gather_usage_stats {
        format!(
            "\n  Telemetry: we collect summary statistics to understand how\n  \
             latchkey is used.\n\n  \
             To opt out, add the following to ~/.latchkey/{},\n  \
             creating the file if necessary:\n\n  \
             [telemetry]\n  \
             gather_usage_stats = false\n",
            SETTINGS_FILE_NAME
        )
    } else {
        format!(
            "\n  Telemetry: usage statistics are disabled in ~/.latchkey/{}.\n",
            SETTINGS_FILE_NAME
        )
    }
}

/// Getting-started hint, shown after an explicit `latchkey activate`.
pub fn instructions_notice() -> String {
    format!(
        "\n  Get started by typing:\n  $ {}\n",
        "latchkey check".bold()
    )
}

/// Reported after each rejected email.
pub const RETRY_MESSAGE: &str = "That doesn't look like an email :(\nPlease try again.";
