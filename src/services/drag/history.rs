// Move history
//
// Undo/redo for committed drags. Each entry remembers where an appointment
// came from and where it went; replaying produces a fresh list for the host
// instead of touching the caller's data.

use crate::models::appointment::Appointment;

/// One committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub id: String,
    pub from_day_index: u8,
    pub from_start: String,
    pub to_day_index: u8,
    pub to_start: String,
}

impl MoveRecord {
    /// Human-readable label for menus and status lines.
    pub fn description(&self) -> String {
        format!("Move appointment {} to {}", self.id, self.to_start)
    }

    fn apply(&self, events: &[Appointment], day_index: u8, start: &str) -> Vec<Appointment> {
        events
            .iter()
            .map(|event| {
                if event.id == self.id {
                    event.moved_to(day_index, start)
                } else {
                    event.clone()
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct MoveHistory {
    undo_stack: Vec<MoveRecord>,
    redo_stack: Vec<MoveRecord>,
    max_history: usize,
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::with_limit(50)
    }

    pub fn with_limit(max_history: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history,
        }
    }

    /// Remember a committed move. Clears the redo stack.
    pub fn record(&mut self, record: MoveRecord) {
        self.redo_stack.clear();
        self.undo_stack.push(record);
        while self.undo_stack.len() > self.max_history {
            self.undo_stack.remove(0);
        }
    }

    /// Revert the latest move still present in `events`.
    ///
    /// Entries for appointments that no longer exist are discarded.
    pub fn undo(&mut self, events: &[Appointment]) -> Option<Vec<Appointment>> {
        while let Some(record) = self.undo_stack.pop() {
            if !events.iter().any(|event| event.id == record.id) {
                log::debug!("Skipping undo for removed appointment {}", record.id);
                continue;
            }
            let updated = record.apply(events, record.from_day_index, &record.from_start);
            self.redo_stack.push(record);
            return Some(updated);
        }
        None
    }

    /// Re-apply the latest undone move still present in `events`.
    pub fn redo(&mut self, events: &[Appointment]) -> Option<Vec<Appointment>> {
        while let Some(record) = self.redo_stack.pop() {
            if !events.iter().any(|event| event.id == record.id) {
                log::debug!("Skipping redo for removed appointment {}", record.id);
                continue;
            }
            let updated = record.apply(events, record.to_day_index, &record.to_start);
            self.undo_stack.push(record);
            return Some(updated);
        }
        None
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(MoveRecord::description)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> MoveRecord {
        MoveRecord {
            id: id.to_string(),
            from_day_index: 0,
            from_start: "09:00".to_string(),
            to_day_index: 2,
            to_start: "10:00".to_string(),
        }
    }

    fn moved_events() -> Vec<Appointment> {
        vec![
            Appointment::new("e1", 2, "10:00", 30, "Jane Doe").unwrap(),
            Appointment::new("e2", 4, "15:00", 30, "John Roe").unwrap(),
        ]
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = MoveHistory::new();
        history.record(record("e1"));
        assert_eq!(history.undo_description().as_deref(), Some("Move appointment e1 to 10:00"));

        let events = moved_events();
        let undone = history.undo(&events).unwrap();
        assert_eq!(undone[0].day_index, 0);
        assert_eq!(undone[0].start, "09:00");
        assert_eq!(undone[1], events[1]);
        assert!(history.can_redo());

        let redone = history.redo(&undone).unwrap();
        assert_eq!(redone, events);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_skips_vanished_appointments() {
        let mut history = MoveHistory::new();
        history.record(record("e1"));
        history.record(record("gone"));

        let undone = history.undo(&moved_events()).unwrap();
        assert_eq!(undone[0].start, "09:00");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_record_clears_redo_and_respects_limit() {
        let mut history = MoveHistory::with_limit(3);
        for i in 0..5 {
            history.record(record(&format!("e{}", i)));
        }
        assert_eq!(history.undo_stack.len(), 3);

        let events = vec![Appointment::new("e4", 2, "10:00", 30, "A").unwrap()];
        history.undo(&events).unwrap();
        assert!(history.can_redo());
        history.record(record("e4"));
        assert!(!history.can_redo());

        history.clear();
        assert!(!history.can_undo());
        assert!(history.undo(&events).is_none());
    }
}
