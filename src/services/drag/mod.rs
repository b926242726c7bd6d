// Drag Interaction Controller
//
// Moves appointments around the week grid.
// - Idle -> Pressed on pointer-down over a block
// - Pressed -> Dragging once the pointer travels past the activation distance
// - Dragging -> Idle on release (commit or cancel), explicit cancel, or when
//   the dragged appointment disappears from the input list

pub mod history;

pub use history::{MoveHistory, MoveRecord};

use crate::models::appointment::Appointment;
use crate::models::settings::GridConfig;
use crate::services::geometry::{ColumnGeometryProvider, SlotMapper, SlotTarget};
use crate::utils::time::{clamp_start, from_minutes};

/// Pointer position in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Why a gesture ended without a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Escape key
    Escape,
    /// The calendar was torn down mid-gesture
    Teardown,
    /// Host asked for a cancel
    Explicit,
    /// Released with no day column under the pointer
    OutsideColumns,
}

/// Input stream consumed by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Primary button pressed on the block of appointment `id`, whose top
    /// edge is at `block_top`
    Down { id: String, pos: Point, block_top: f32 },
    /// Pointer moved; `over_day` is the column under the pointer
    Move { pos: Point, over_day: Option<u8> },
    /// Primary button released
    Up { pos: Point, over_day: Option<u8> },
    Cancel(CancelReason),
}

/// Transient state of one in-flight drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub dragging_id: String,
    /// Working copy with `day_index`/`start` following the snapped pointer
    pub ghost: Appointment,
    /// Day and start the appointment had when the gesture began
    pub original_day_index: u8,
    pub original_start: String,
    pub origin: Point,
    pub block_top: f32,
    pub over_day_index: Option<u8>,
    pub over_minutes: Option<u32>,
}

impl DragSession {
    fn begin(appointment: &Appointment, origin: Point, block_top: f32) -> Self {
        Self {
            dragging_id: appointment.id.clone(),
            ghost: appointment.clone(),
            original_day_index: appointment.day_index,
            original_start: appointment.start.clone(),
            origin,
            block_top,
            over_day_index: None,
            over_minutes: None,
        }
    }

    /// Where the dragged block's top edge sits for a given pointer position.
    pub fn dragged_top(&self, pos: Point) -> f32 {
        self.block_top + (pos.y - self.origin.y)
    }

    fn hovered(&self) -> Option<SlotTarget> {
        match (self.over_day_index, self.over_minutes) {
            (Some(day_index), Some(minutes)) => Some(SlotTarget { day_index, minutes }),
            _ => None,
        }
    }
}

/// Controller state. Ghost data exists only inside `Dragging`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer is down on a block but has not moved far enough to drag
    Pressed {
        id: String,
        origin: Point,
        block_top: f32,
    },
    Dragging(DragSession),
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    /// Id of the appointment the current gesture refers to, if any.
    pub fn active_id(&self) -> Option<&str> {
        match self {
            DragState::Idle => None,
            DragState::Pressed { id, .. } => Some(id.as_str()),
            DragState::Dragging(session) => Some(session.dragging_id.as_str()),
        }
    }
}

/// Result of feeding one input to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Input had no meaning in the current state
    Ignored,
    Pressed { id: String },
    Started { id: String },
    /// Hover target changed
    Moved(SlotTarget),
    /// Hover target is the same as on the previous tick
    Unchanged,
    /// Pointer left every column while dragging
    LeftColumns,
    /// Released before the activation distance was reached
    Clicked { id: String },
    /// Drag completed; `events` is the new list for the host
    Committed {
        events: Vec<Appointment>,
        record: MoveRecord,
    },
    Cancelled(CancelReason),
    /// Dragged appointment vanished from the input list
    Aborted { id: String },
}

/// Everything a transition reads besides the state itself.
pub struct DragEnv<'a> {
    pub events: &'a [Appointment],
    pub geometry: &'a dyn ColumnGeometryProvider,
    pub config: &'a GridConfig,
}

impl<'a> DragEnv<'a> {
    fn find(&self, id: &str) -> Option<&'a Appointment> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Snapped and clamped target for a session at pointer `pos`.
    fn target_for(&self, session: &DragSession, pos: Point, over_day: Option<u8>) -> Option<SlotTarget> {
        let mapper = SlotMapper::new(self.config);
        let target = mapper.resolve(self.geometry, over_day, session.dragged_top(pos))?;
        let minutes = clamp_start(
            target.minutes as i32,
            session.ghost.duration,
            mapper.total_minutes(),
            self.config.slot_minutes,
        );
        Some(SlotTarget {
            day_index: target.day_index,
            minutes,
        })
    }
}

/// Pure transition function of the drag state machine.
pub fn transition(state: DragState, input: PointerInput, env: &DragEnv<'_>) -> (DragState, DragOutcome) {
    match (state, input) {
        (DragState::Idle, PointerInput::Down { id, pos, block_top }) => {
            if env.find(&id).is_none() {
                return (DragState::Idle, DragOutcome::Ignored);
            }
            let outcome = DragOutcome::Pressed { id: id.clone() };
            (
                DragState::Pressed {
                    id,
                    origin: pos,
                    block_top,
                },
                outcome,
            )
        }
        (DragState::Idle, _) => (DragState::Idle, DragOutcome::Ignored),

        (DragState::Pressed { id, .. }, PointerInput::Cancel(reason)) => {
            log::debug!("Press on {} cancelled: {:?}", id, reason);
            (DragState::Idle, DragOutcome::Cancelled(reason))
        }
        (pressed @ DragState::Pressed { .. }, PointerInput::Down { .. }) => (pressed, DragOutcome::Ignored),
        (DragState::Pressed { id, origin, block_top }, PointerInput::Move { pos, over_day }) => {
            let Some(appointment) = env.find(&id) else {
                return (DragState::Idle, DragOutcome::Aborted { id });
            };
            if pos.distance(origin) < env.config.activation_distance_px {
                return (
                    DragState::Pressed {
                        id,
                        origin,
                        block_top,
                    },
                    DragOutcome::Ignored,
                );
            }

            let mut session = DragSession::begin(appointment, origin, block_top);
            if let Some(target) = env.target_for(&session, pos, over_day) {
                apply_target(&mut session, target, env.config);
            }
            log::debug!("Drag started for appointment {}", id);
            (DragState::Dragging(session), DragOutcome::Started { id })
        }
        (DragState::Pressed { id, .. }, PointerInput::Up { .. }) => {
            if env.find(&id).is_none() {
                return (DragState::Idle, DragOutcome::Aborted { id });
            }
            (DragState::Idle, DragOutcome::Clicked { id })
        }

        (DragState::Dragging(session), PointerInput::Cancel(reason)) => {
            log::debug!("Drag of {} cancelled: {:?}", session.dragging_id, reason);
            (DragState::Idle, DragOutcome::Cancelled(reason))
        }
        (dragging @ DragState::Dragging(_), PointerInput::Down { .. }) => (dragging, DragOutcome::Ignored),
        (DragState::Dragging(mut session), PointerInput::Move { pos, over_day }) => {
            if env.find(&session.dragging_id).is_none() {
                log::debug!("Appointment {} vanished mid-drag", session.dragging_id);
                return (
                    DragState::Idle,
                    DragOutcome::Aborted {
                        id: session.dragging_id,
                    },
                );
            }

            match env.target_for(&session, pos, over_day) {
                Some(target) if session.hovered() == Some(target) => {
                    (DragState::Dragging(session), DragOutcome::Unchanged)
                }
                Some(target) => {
                    apply_target(&mut session, target, env.config);
                    (DragState::Dragging(session), DragOutcome::Moved(target))
                }
                None if session.hovered().is_none() => (DragState::Dragging(session), DragOutcome::Unchanged),
                None => {
                    session.over_day_index = None;
                    session.over_minutes = None;
                    (DragState::Dragging(session), DragOutcome::LeftColumns)
                }
            }
        }
        (DragState::Dragging(session), PointerInput::Up { pos, over_day }) => {
            if env.find(&session.dragging_id).is_none() {
                log::debug!("Appointment {} vanished before drop", session.dragging_id);
                return (
                    DragState::Idle,
                    DragOutcome::Aborted {
                        id: session.dragging_id,
                    },
                );
            }

            let Some(target) = env.target_for(&session, pos, over_day) else {
                return (DragState::Idle, DragOutcome::Cancelled(CancelReason::OutsideColumns));
            };

            let start = from_minutes(target.minutes as i32, env.config.hours.start);
            let events = env
                .events
                .iter()
                .map(|event| {
                    if event.id == session.dragging_id {
                        event.moved_to(target.day_index, start.clone())
                    } else {
                        event.clone()
                    }
                })
                .collect();
            let record = MoveRecord {
                id: session.dragging_id,
                from_day_index: session.original_day_index,
                from_start: session.original_start,
                to_day_index: target.day_index,
                to_start: start,
            };
            log::info!(
                "Moved appointment {} to day {} at {}",
                record.id,
                record.to_day_index,
                record.to_start
            );
            (DragState::Idle, DragOutcome::Committed { events, record })
        }
    }
}

fn apply_target(session: &mut DragSession, target: SlotTarget, config: &GridConfig) {
    session.over_day_index = Some(target.day_index);
    session.over_minutes = Some(target.minutes);
    session.ghost.day_index = target.day_index;
    session.ghost.start = from_minutes(target.minutes as i32, config.hours.start);
}

/// Drop indicator for one column: where the dragged item would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropIndicator {
    pub day_index: u8,
    pub minutes: u32,
    pub duration: u32,
}

/// Owns the drag state between input events.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    config: GridConfig,
}

impl DragController {
    pub fn new(config: GridConfig) -> Self {
        Self {
            state: DragState::Idle,
            config,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replace the grid configuration. Any gesture in flight is dropped since
    /// its pixel geometry no longer applies.
    pub fn set_config(&mut self, config: GridConfig) {
        if config != self.config {
            self.reset();
            self.config = config;
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Feed one pointer input.
    pub fn handle(
        &mut self,
        input: PointerInput,
        events: &[Appointment],
        geometry: &dyn ColumnGeometryProvider,
    ) -> DragOutcome {
        let env = DragEnv {
            events,
            geometry,
            config: &self.config,
        };
        let (next, outcome) = transition(std::mem::take(&mut self.state), input, &env);
        self.state = next;
        outcome
    }

    /// Cancel whatever gesture is in progress.
    pub fn cancel(&mut self, reason: CancelReason) -> DragOutcome {
        if self.state.is_idle() {
            return DragOutcome::Ignored;
        }
        log::debug!("Cancelling gesture: {:?}", reason);
        self.reset();
        DragOutcome::Cancelled(reason)
    }

    /// Drop the gesture if its appointment is no longer in `events`.
    /// Returns true when state was cleared.
    pub fn reconcile(&mut self, events: &[Appointment]) -> bool {
        let stale = self
            .state
            .active_id()
            .map_or(false, |id| !events.iter().any(|event| event.id == id));
        if stale {
            log::debug!("Clearing drag state for removed appointment");
            self.reset();
        }
        stale
    }

    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn dragging_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging(session) => Some(session.dragging_id.as_str()),
            _ => None,
        }
    }

    pub fn ghost(&self) -> Option<&Appointment> {
        match &self.state {
            DragState::Dragging(session) => Some(&session.ghost),
            _ => None,
        }
    }

    pub fn drop_indicator(&self) -> Option<DropIndicator> {
        let DragState::Dragging(session) = &self.state else {
            return None;
        };
        let target = session.hovered()?;
        Some(DropIndicator {
            day_index: target.day_index,
            minutes: target.minutes,
            duration: session.ghost.duration,
        })
    }
}
