use crate::asana::gateway::{fetch_data, Gateway};
use crate::error::{ApiError, ReportError};
use crate::model::Entry;

const WORKSPACES_PATH: &str = "workspaces";

/// Identifier of the first workspace visible to the token.
pub fn resolve_workspace<G: Gateway + ?Sized>(gateway: &G) -> Result<String, ReportError> {
  let workspaces: Vec<Entry> = fetch_data(gateway, WORKSPACES_PATH).map_err(ReportError::Workspace)?;

  workspaces
    .into_iter()
    .next()
    .map(|w| w.gid)
    .ok_or(ReportError::NoWorkspace)
}

/// Project identifiers of `workspace_id`, in upstream order. Empty is not an error here.
pub fn list_projects<G: Gateway + ?Sized>(gateway: &G, workspace_id: &str) -> Result<Vec<String>, ApiError> {
  let path = format!("workspaces/{}/projects", workspace_id);
  let projects: Vec<Entry> = fetch_data(gateway, &path)?;

  Ok(projects.into_iter().map(|p| p.gid).collect())
}
