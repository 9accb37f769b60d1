use chess::Color;

use crate::models::MoveRecord;

/// Append-only record of the plies played in a session.
#[derive(Debug, Clone, Default)]
pub struct MoveLog {
    records: Vec<MoveRecord>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a ply. Its index is the number of plies already logged.
    pub fn append(&mut self, mover: Color, san: String, position_after: String) -> &MoveRecord {
        let ply = self.records.len();
        self.records.push(MoveRecord::new(ply, mover, san, position_after));
        &self.records[ply]
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(MoveRecord::display_line).collect()
    }
}
