use crate::stroke::StrokeRef;

/// Which list is authoritative for rendering and hit-testing.
///
/// While a gesture is previewing, readers must use the preview list: the
/// committed timeline is stale until the gesture commits or discards.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    #[default]
    Committed,
    Previewing(Vec<StrokeRef>),
}

impl ViewState {
    pub fn is_previewing(&self) -> bool {
        matches!(self, ViewState::Previewing(_))
    }

    pub fn preview(&self) -> Option<&[StrokeRef]> {
        match self {
            ViewState::Previewing(strokes) => Some(strokes),
            ViewState::Committed => None,
        }
    }

    pub(crate) fn take_preview(&mut self) -> Option<Vec<StrokeRef>> {
        match std::mem::take(self) {
            ViewState::Previewing(strokes) => Some(strokes),
            ViewState::Committed => None,
        }
    }
}
