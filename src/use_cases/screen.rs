// Screen controller: owns the selection, turns UI events into transitions and
// remote calls, and applies the replies.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::slots::{self, Slots};
use crate::domain::{
    BookingGateway, CheckResponse, Clock, CreateResponse, GatewayError, LocalZone,
    SelectionState, TimeOfDay,
};
use crate::use_cases::request_builder;

/// Raw input coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    StartSelected(String),
    EndSelected(String),
    HeadcountEdited(String),
    CheckPressed,
    CreatePressed,
    ResetPressed,
}

/// User-facing messages produced by events and call outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    // Message text from the booking backend.
    Backend(String),
    // A remote call failed; the detail goes to the log, not the user.
    Failure(String),
    // Input that could not be applied to the selection.
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Check,
    Create,
}

#[derive(Debug)]
enum Reply {
    Checked(CheckResponse),
    Created(CreateResponse),
}

/// Completion of a remote call, tagged with the selection revision it was issued for.
#[derive(Debug)]
pub struct CallOutcome {
    pub kind: CallKind,
    pub revision: u64,
    result: Result<Reply, GatewayError>,
}

/// Everything the presentation layer needs to draw the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub date: NaiveDate,
    pub start_options: Vec<TimeOfDay>,
    pub end_options: Vec<TimeOfDay>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub headcount: Option<u32>,
    pub can_check: bool,
    pub can_create: bool,
    pub busy: bool,
}

impl ScreenView {
    /// True once the day has run out of bookable start times.
    pub fn no_start_time_left(&self) -> bool {
        self.start_options.is_empty()
    }
}

struct InFlight {
    kind: CallKind,
    revision: u64,
    task: JoinHandle<()>,
}

pub struct ScreenController {
    // Injected ports (dependency injection keeps the controller testable).
    clock: Arc<dyn Clock>,
    zone: Arc<dyn LocalZone>,
    gateway: Arc<dyn BookingGateway>,
    selection: SelectionState,
    // At most one check or create is outstanding.
    in_flight: Option<InFlight>,
    outcome_tx: mpsc::UnboundedSender<CallOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<CallOutcome>,
}

impl ScreenController {
    /// Starts a session for today in `zone`.
    pub fn new(
        clock: Arc<dyn Clock>,
        zone: Arc<dyn LocalZone>,
        gateway: Arc<dyn BookingGateway>,
    ) -> Self {
        let today = zone.to_local(clock.now()).date();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            clock,
            zone,
            gateway,
            selection: SelectionState::new(today),
            in_flight: None,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn view(&self) -> ScreenView {
        let busy = self.in_flight.is_some();
        ScreenView {
            date: self.selection.date(),
            start_options: self.start_options().collect(),
            end_options: slots::end_options(self.selection.start_time()).collect(),
            start_time: self.selection.start_time(),
            end_time: self.selection.end_time(),
            headcount: self.selection.headcount(),
            can_check: !busy && self.selection.is_submittable(),
            can_create: !busy && self.selection.is_creatable(),
            busy,
        }
    }

    pub fn handle(&mut self, event: UiEvent) -> Option<Notice> {
        match event {
            UiEvent::StartSelected(raw) => self.select_start(&raw),
            UiEvent::EndSelected(raw) => self.select_end(&raw),
            UiEvent::HeadcountEdited(raw) => {
                let headcount = self.selection.set_headcount(&raw);
                debug!(headcount, "headcount set");
                self.invalidate_in_flight();
                None
            }
            UiEvent::CheckPressed => self.submit(CallKind::Check),
            UiEvent::CreatePressed => self.submit(CallKind::Create),
            UiEvent::ResetPressed => {
                self.selection.reset();
                self.invalidate_in_flight();
                None
            }
        }
    }

    /// Waits for the next finished remote call.
    pub async fn next_outcome(&mut self) -> Option<CallOutcome> {
        self.outcome_rx.recv().await
    }

    /// Applies a finished call, dropping it if the selection has moved on.
    pub fn apply(&mut self, outcome: CallOutcome) -> Option<Notice> {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|call| call.kind == outcome.kind && call.revision == outcome.revision)
        {
            self.in_flight = None;
        }

        if outcome.revision != self.selection.revision() {
            return self.apply_superseded(outcome);
        }

        match outcome.result {
            Ok(Reply::Checked(reply)) => {
                info!(room_available = reply.room_available, "availability checked");
                self.selection.mark_availability(reply.room_available);
                Some(Notice::Backend(reply.message))
            }
            Ok(Reply::Created(reply)) => {
                info!("booking created");
                self.selection.reset();
                Some(Notice::Backend(reply.message))
            }
            Err(err) => {
                warn!(kind = ?outcome.kind, error = %err, "booking call failed");
                self.selection.mark_availability(false);
                let message = match outcome.kind {
                    CallKind::Check => "Could not check the booking. Please try again.",
                    CallKind::Create => "Could not create the booking. Please try again.",
                };
                Some(Notice::Failure(message.to_string()))
            }
        }
    }

    // The selection moved on while this call was out. A committed create is
    // still reported, since the booking exists; everything else is dropped.
    fn apply_superseded(&self, outcome: CallOutcome) -> Option<Notice> {
        match outcome.result {
            Ok(Reply::Created(reply)) => {
                info!(revision = outcome.revision, "superseded create committed");
                Some(Notice::Backend(reply.message))
            }
            _ => {
                debug!(
                    kind = ?outcome.kind,
                    revision = outcome.revision,
                    current = self.selection.revision(),
                    "discarding stale response"
                );
                None
            }
        }
    }

    fn start_options(&self) -> Slots {
        let now = self.zone.to_local(self.clock.now());
        // A session left open past midnight has nothing left to book for its date.
        if now.date() > self.selection.date() {
            return Slots::empty();
        }
        slots::start_options(now.time())
    }

    fn select_start(&mut self, raw: &str) -> Option<Notice> {
        let start = match raw.parse::<TimeOfDay>() {
            Ok(start) => start,
            Err(err) => return Some(Notice::Rejected(err.to_string())),
        };
        if !self.start_options().any(|slot| slot == start) {
            return Some(Notice::Rejected(format!(
                "{start} is no longer available today"
            )));
        }

        self.selection.set_start_time(start);
        debug!(%start, end = ?self.selection.end_time(), "start time set");
        self.invalidate_in_flight();
        None
    }

    fn select_end(&mut self, raw: &str) -> Option<Notice> {
        let end = match raw.parse::<TimeOfDay>() {
            Ok(end) => end,
            Err(err) => return Some(Notice::Rejected(err.to_string())),
        };

        if !self.selection.set_end_time(end) {
            let reason = match self.selection.start_time() {
                None => "Pick a start time first.".to_string(),
                Some(start) => format!("End time must be after {start}."),
            };
            return Some(Notice::Rejected(reason));
        }

        debug!(%end, "end time set");
        self.invalidate_in_flight();
        None
    }

    fn submit(&mut self, kind: CallKind) -> Option<Notice> {
        if let Some(call) = &self.in_flight {
            debug!(in_flight = ?call.kind, requested = ?kind, "call already in flight; ignoring");
            return None;
        }

        let enabled = match kind {
            CallKind::Check => self.selection.is_submittable(),
            CallKind::Create => self.selection.is_creatable(),
        };
        if !enabled {
            debug!(?kind, "action not enabled for current selection");
            return None;
        }

        let request = match request_builder::build(
            &self.selection,
            kind == CallKind::Create,
            self.zone.as_ref(),
        ) {
            Ok(request) => request,
            Err(err) => {
                error!(error = %err, "gated selection failed to build a request");
                return None;
            }
        };

        let revision = self.selection.revision();
        let gateway = Arc::clone(&self.gateway);
        let outcome_tx = self.outcome_tx.clone();
        let task = tokio::spawn(async move {
            let result = match kind {
                CallKind::Check => gateway.check(request).await.map(Reply::Checked),
                CallKind::Create => gateway.create(request).await.map(Reply::Created),
            };
            // The receiver lives as long as the controller; a closed channel means
            // the screen is gone and nobody needs the reply.
            let _ = outcome_tx.send(CallOutcome {
                kind,
                revision,
                result,
            });
        });

        info!(?kind, revision, "booking call started");
        self.in_flight = Some(InFlight {
            kind,
            revision,
            task,
        });
        None
    }

    // Any edit supersedes the outstanding call. Checks are cancelled outright.
    // A create may already be committed upstream, so it runs to completion and
    // keeps the screen busy until its outcome arrives.
    fn invalidate_in_flight(&mut self) {
        let revision = self.selection.revision();
        if let Some(call) = self
            .in_flight
            .take_if(|call| call.kind == CallKind::Check && call.revision != revision)
        {
            call.task.abort();
            debug!(revision = call.revision, "aborted check for superseded selection");
        } else if let Some(call) = &self.in_flight
            && call.revision != revision
        {
            debug!(revision = call.revision, "create superseded; waiting for it to settle");
        }
    }
}

impl Drop for ScreenController {
    fn drop(&mut self) {
        if let Some(call) = self.in_flight.take()
            && call.kind == CallKind::Check
        {
            call.task.abort();
        }
    }
}
