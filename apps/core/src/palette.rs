#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PalettePhase {
    Closed,
    OpenEmpty,
    OpenFiltering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Open { first_mount: bool },
    Close,
}

/// Visibility and selection of the palette. The selected index always points at
/// an existing result when there is at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaletteState {
    open: bool,
    mounted: bool,
    filtering: bool,
    selected_index: usize,
    result_count: usize,
}

impl PaletteState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn result_count(&self) -> usize {
        self.result_count
    }

    pub fn phase(&self) -> PalettePhase {
        match (self.open, self.filtering) {
            (false, _) => PalettePhase::Closed,
            (true, false) => PalettePhase::OpenEmpty,
            (true, true) => PalettePhase::OpenFiltering,
        }
    }

    pub fn toggle_action(&self) -> ToggleAction {
        if self.open {
            ToggleAction::Close
        } else {
            ToggleAction::Open {
                first_mount: !self.mounted,
            }
        }
    }

    pub fn mark_mounted(&mut self) {
        self.mounted = true;
    }

    pub fn open(&mut self) {
        self.open = true;
        self.filtering = false;
        self.selected_index = 0;
        self.result_count = 0;
    }

    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.filtering = false;
        self.selected_index = 0;
        self.result_count = 0;
        true
    }

    pub fn on_escape(&mut self) -> bool {
        self.close()
    }

    pub fn set_filtering(&mut self, filtering: bool) {
        self.filtering = self.open && filtering;
    }

    /// Replaces the result count and selects `selected`, or the first row when
    /// that index does not exist.
    pub fn set_results(&mut self, count: usize, selected: usize) {
        self.result_count = count;
        self.selected_index = if selected < count { selected } else { 0 };
    }

    /// Moves the selection down, wrapping to the top. Returns (previous, current).
    pub fn advance(&mut self) -> Option<(usize, usize)> {
        if !self.open || self.result_count == 0 {
            return None;
        }
        let previous = self.selected_index;
        self.selected_index = (previous + 1) % self.result_count;
        Some((previous, self.selected_index))
    }

    /// Moves the selection up, wrapping to the bottom. Returns (previous, current).
    pub fn retreat(&mut self) -> Option<(usize, usize)> {
        if !self.open || self.result_count == 0 {
            return None;
        }
        let previous = self.selected_index;
        self.selected_index = previous
            .checked_sub(1)
            .unwrap_or(self.result_count - 1);
        Some((previous, self.selected_index))
    }
}
