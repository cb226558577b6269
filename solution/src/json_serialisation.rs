use serde_json::json;

use crate::Schedule;

/// Serialises a schedule for downstream consumers: the list of placements plus the
/// per-period room occupancy view.
pub fn schedule_to_json(schedule: &Schedule) -> serde_json::Value {
    let start_assignments: Vec<serde_json::Value> = schedule
        .start_assignments()
        .map(|start| {
            json!({
                "section": start.section().0,
                "room": start.room().0,
                "startPeriod": start.start_period().0,
            })
        })
        .collect();

    let periods: Vec<serde_json::Value> = schedule
        .program()
        .periods()
        .map(|period| {
            let occupants: Vec<serde_json::Value> = schedule
                .occurring_at(period.idx())
                .values()
                .map(|present| {
                    json!({
                        "room": present.room().0,
                        "section": present.section().0,
                    })
                })
                .collect();
            json!({
                "period": period.idx().0,
                "occupants": occupants,
            })
        })
        .collect();

    json!({
        "startAssignments": start_assignments,
        "periods": periods,
    })
}
