use tracing::{debug, info};

use super::{AssessmentReconciler, position};
use crate::errors::Result;
use crate::models::assessments::requests::UpsertAccessRuleRequest;
use crate::models::disk::DiskAccessRule;
use crate::utils::format_in_timezone;

pub async fn sync_access_rules(
    reconciler: &AssessmentReconciler,
    assessment_id: i64,
    rules: &[DiskAccessRule],
) -> Result<usize> {
    let storage = reconciler.storage();

    for (i, rule) in rules.iter().enumerate() {
        let number = position(i);
        debug!("Syncing assessment access rule number {}", number);

        let request = build_access_rule_request(reconciler, assessment_id, number, rule)
            .map_err(|e| e.context(format!("access rule {number}")))?;
        storage.upsert_access_rule(request).await?;
    }

    info!("Deleting unused assessment access rules for current assessment");
    storage
        .delete_excess_access_rules(assessment_id, rules.len() as i32)
        .await?;

    Ok(rules.len())
}

fn build_access_rule_request(
    reconciler: &AssessmentReconciler,
    assessment_id: i64,
    number: i32,
    rule: &DiskAccessRule,
) -> Result<UpsertAccessRuleRequest> {
    let timezone = reconciler.timezone();
    let start_date = rule
        .start_date
        .as_deref()
        .map(|date| format_in_timezone(date, timezone))
        .transpose()?;
    let end_date = rule
        .end_date
        .as_deref()
        .map(|date| format_in_timezone(date, timezone))
        .transpose()?;

    Ok(UpsertAccessRuleRequest {
        assessment_id,
        number,
        mode: rule.mode.clone(),
        role: rule.role.clone(),
        uids: rule.uids.clone(),
        start_date,
        end_date,
        credit: rule.credit,
    })
}
