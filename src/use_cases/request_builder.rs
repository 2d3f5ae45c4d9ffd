use crate::domain::datetime::{combine, to_wire};
use crate::domain::{BookingRequest, InvalidState, LocalZone, SelectionState};

// Assemble the outbound payload for the current selection.
// Callers gate on `is_submittable`; an incomplete selection here is a bug.
pub fn build(
    selection: &SelectionState,
    is_create: bool,
    zone: &dyn LocalZone,
) -> Result<BookingRequest, InvalidState> {
    let start_time = selection
        .start_time()
        .ok_or(InvalidState { missing: "start time" })?;
    let end_time = selection
        .end_time()
        .ok_or(InvalidState { missing: "end time" })?;
    let headcount = selection
        .headcount()
        .ok_or(InvalidState { missing: "headcount" })?;

    let date = selection.date();
    Ok(BookingRequest {
        start_time,
        end_time,
        headcount,
        is_create,
        start_date_time: to_wire(combine(date, start_time, zone)),
        end_date_time: to_wire(combine(date, end_time, zone)),
    })
}
