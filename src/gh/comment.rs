//! Sticky review comment management.

use serde_json::Value;

use crate::error::Result;
use crate::report;

use super::api;
use super::context::ReviewContext;

/// What the upsert ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Created,
    Updated,
}

/// Find the id of an existing report comment on the PR, if any.
pub fn find_report_comment(ctx: &ReviewContext) -> Result<Option<u64>> {
    let comments = api::api_get_paged(&format!(
        "repos/{}/{}/issues/{}/comments",
        ctx.owner, ctx.repo, ctx.number
    ))?;
    Ok(find_marked(&comments))
}

/// Create a new comment on the PR.
pub fn create_comment(ctx: &ReviewContext, body: &str) -> Result<()> {
    api::api_post(
        &format!(
            "repos/{}/{}/issues/{}/comments",
            ctx.owner, ctx.repo, ctx.number
        ),
        "body",
        body,
    )?;
    Ok(())
}

/// Replace the body of an existing comment.
pub fn update_comment(ctx: &ReviewContext, comment_id: u64, body: &str) -> Result<()> {
    api::api_patch(
        &format!("repos/{}/{}/issues/comments/{}", ctx.owner, ctx.repo, comment_id),
        "body",
        body,
    )?;
    Ok(())
}

/// Create or update the report comment so each PR carries at most one.
pub fn upsert_report(ctx: &ReviewContext, body: &str) -> Result<CommentAction> {
    match find_report_comment(ctx)? {
        Some(comment_id) => {
            update_comment(ctx, comment_id, body)?;
            Ok(CommentAction::Updated)
        }
        None => {
            create_comment(ctx, body)?;
            Ok(CommentAction::Created)
        }
    }
}

/// Pick the first comment carrying the report marker.
pub(crate) fn find_marked(comments: &[Value]) -> Option<u64> {
    comments
        .iter()
        .find(|comment| {
            comment
                .get("body")
                .and_then(|v| v.as_str())
                .map(report::has_marker)
                .unwrap_or(false)
        })
        .and_then(|comment| comment.get("id").and_then(|v| v.as_u64()))
}
