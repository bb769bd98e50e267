/// One stimulus presentation: who saw what, which marker code went to the
/// board, and when the stimulus came up on the experiment clock.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub participant_id: String,
    pub stimulus: String,
    pub marker: i32,
    pub time: f64,
}

/// Append-only accumulator of stimulus events, in presentation order. The
/// sequencer is its sole writer; records are never mutated or reordered.
#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog {
            records: Vec::new(),
        }
    }

    pub fn append(&mut self, record: EventRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut log = EventLog::new();
        for (i, label) in ["left", "right", "left"].iter().enumerate() {
            log.append(EventRecord {
                participant_id: "p01".to_string(),
                stimulus: label.to_string(),
                marker: (i + 1) as i32,
                time: i as f64,
            });
        }
        assert_eq!(log.len(), 3);
        let markers: Vec<i32> = log.records().iter().map(|r| r.marker).collect();
        assert_eq!(markers, vec![1, 2, 3]);
    }
}
