use crate::config::Config;
use crate::dashboard::load_stats;
use crate::display::render_stats;
use crate::error::Result;
use crate::remote::ApiClient;

/// Show server-side statistics. Failures print the no-data message.
pub async fn cmd_stats() -> Result<()> {
    let config = Config::load()?;
    let client = ApiClient::from_config(&config)?;
    let stats = load_stats(&client, config.user_id).await;
    println!("{}", render_stats(stats.as_ref()));
    Ok(())
}
