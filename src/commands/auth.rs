use anyhow::Result;
use holiday_core::IdentityProvider;
use holiday_core::config::AppConfig;
use holiday_provider_google::GoogleIdentity;

/// Signing in only needs the OAuth client, not the calendars.
pub async fn run() -> Result<()> {
    let app_config = AppConfig::load()?;
    let client_id = app_config.client_id()?;

    let identity = GoogleIdentity::new(app_config.client_secret()?)?.force_consent();

    println!("Authenticating with Google...");

    // Stores the session for later commands
    identity.request_credential(client_id, &app_config.scope).await?;

    println!("Authenticated.");
    println!("\nRun `holiday-picker show` to see your holidays.");

    Ok(())
}
