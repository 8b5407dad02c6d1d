mod app_system;
mod domain;
mod repository;
mod store;

#[cfg(test)]
mod mock_framework;

use chrono::{TimeZone, Utc};
use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, CrmSystem};
use crate::domain::{DashboardStats, User};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting CRM system");

    // Boot the document store and the repository wired to it
    let system = CrmSystem::new();

    // Open the live user list before writing anything
    let subscription = system.users.list_users().await;

    // Create a test user
    let mut user = User::new("Ada", "Lovelace");
    user.email = "ada@example.com".to_string();
    let birth_date = Utc
        .with_ymd_and_hms(1815, 12, 10, 0, 0, 0)
        .single()
        .ok_or_else(|| "invalid demo birth date".to_string())?;
    user.birth_date = Some(birth_date);

    let span = tracing::info_span!("user_creation");
    let user_id = async {
        info!("Creating test user");
        system
            .users
            .create_user(&user)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(user_id = %user_id, "User created successfully");

    // The live list already reflects the write
    let users = subscription.current();
    let stats = DashboardStats::from_users(&users);
    info!(
        total_users = stats.total_users,
        average_age = stats.average_age,
        "Dashboard refreshed"
    );

    // Edit the record and read it back
    let mut edited = system
        .users
        .get_user(&user_id)
        .await
        .map_err(|e| e.to_string())?;
    edited.street = "12 St James's Square".to_string();
    edited.zip_code = "SW1Y 4LB".to_string();
    edited.city = "London".to_string();
    system
        .users
        .update_user(&user_id, &edited)
        .await
        .map_err(|e| e.to_string())?;

    let stored = system
        .users
        .get_user(&user_id)
        .await
        .map_err(|e| e.to_string())?;
    info!(
        full_name = %stored.full_name(),
        initials = %stored.initials(),
        address = %stored.full_address(),
        "User updated successfully"
    );

    // Shutdown system gracefully
    drop(subscription);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
