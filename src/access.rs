//! Team-membership guard, run once before any export work.

use tracing::info;

use crate::contract::{PostSource, SourceError};

/// Returns true iff `team_name` is among the teams visible to the configured
/// credentials. The match is case-sensitive and on the full name.
pub async fn can_access_team<S>(source: &S, team_name: &str) -> Result<bool, SourceError>
where
    S: PostSource + ?Sized,
{
    let teams = source.list_teams().await?;
    let accessible = teams.iter().any(|t| t.name == team_name);
    info!(team = team_name, accessible, teams = teams.len(), "checked team access");
    Ok(accessible)
}
