use tracing::{debug, info};

use super::{AssessmentReconciler, position};
use crate::errors::Result;
use crate::models::assessments::requests::UpsertZoneRequest;
use crate::models::disk::DiskZone;

pub async fn sync_zones(
    reconciler: &AssessmentReconciler,
    assessment_id: i64,
    zones: &[DiskZone],
) -> Result<usize> {
    let storage = reconciler.storage();

    for (i, zone) in zones.iter().enumerate() {
        let number = position(i);
        debug!("Syncing zone number {}", number);

        storage
            .upsert_zone(UpsertZoneRequest {
                assessment_id,
                number,
                title: zone.title.clone(),
            })
            .await?;
    }

    info!("Deleting unused zones for current assessment");
    storage
        .delete_excess_zones(assessment_id, zones.len() as i32)
        .await?;

    Ok(zones.len())
}
