/// Running point total for one game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    total: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn award(&mut self, points: u32) {
        self.total = self.total.saturating_add(points);
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}
