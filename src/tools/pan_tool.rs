use egui::{Pos2, Vec2};

use crate::history::StrokeStore;
use crate::tools::Tool;

/// Tracks a pan drag in screen space.
#[derive(Debug, Default)]
pub struct PanTool {
    last: Option<Pos2>,
}

impl PanTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, screen: Pos2) {
        self.last = Some(screen);
    }

    /// Screen delta since the previous pointer position.
    pub fn drag(&mut self, screen: Pos2) -> Option<Vec2> {
        let last = self.last.replace(screen)?;
        Some(screen - last)
    }
}

impl Tool for PanTool {
    fn name(&self) -> &'static str {
        "Pan"
    }

    fn is_active(&self, _store: &StrokeStore) -> bool {
        self.last.is_some()
    }

    fn finish(&mut self, _store: &mut StrokeStore) -> bool {
        self.last = None;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_deltas_are_incremental() {
        let mut tool = PanTool::new();
        assert_eq!(tool.drag(pos2(5.0, 5.0)), None);

        tool.begin(pos2(10.0, 10.0));
        assert_eq!(tool.drag(pos2(15.0, 12.0)), Some(vec2(5.0, 2.0)));
        assert_eq!(tool.drag(pos2(15.0, 20.0)), Some(vec2(0.0, 8.0)));

        let mut store = StrokeStore::new();
        assert!(!tool.finish(&mut store));
        assert!(!tool.is_active(&store));
    }
}
