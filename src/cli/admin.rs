//! Administrator command implementations

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::output::display::AdminRow;
use crate::output::{render_list, render_record};
use onfleet::{
    Administrator, AdministratorUpdate, ConfigError, NewAdministrator, OnfleetApi, Result,
};

/// Run the admin list command
pub async fn list(client: &dyn OnfleetApi, format: OutputFormat) -> Result<String> {
    let admins = client.list_administrators().await?;
    render_list::<Administrator, AdminRow>(&admins, format)
}

/// Run the admin create command
pub async fn create(
    client: &dyn OnfleetApi,
    admin: NewAdministrator,
    format: OutputFormat,
) -> Result<String> {
    let created = client.create_administrator(&admin).await?;
    let body = render_record(&created, format)?;

    Ok(match format {
        OutputFormat::Table => format!(
            "{} Created administrator {}\n{}",
            "✓".green(),
            created.id(),
            body
        ),
        OutputFormat::Json => body,
    })
}

/// Run the admin update command
pub async fn update(
    client: &dyn OnfleetApi,
    id: &str,
    update: AdministratorUpdate,
    format: OutputFormat,
) -> Result<String> {
    if update.is_empty() {
        return Err(ConfigError::Invalid(
            "Nothing to update. Pass at least one of --name, --email, --phone.".to_string(),
        )
        .into());
    }

    let updated = client.update_administrator(id, &update).await?;
    render_record(&updated, format)
}

/// Run the admin delete command
pub async fn delete(client: &dyn OnfleetApi, id: &str) -> Result<String> {
    client.delete_administrator(id).await?;
    Ok(format!("{} Deleted administrator {}", "✓".green(), id))
}
