//! The page-facing side of the palette: the floating panel and link navigation.
//! Host adapters implement these against the live DOM.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("panel element not found: {0}")]
    ElementNotFound(String),
    #[error("result row {0} is not rendered")]
    MissingRow(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("empty destination")]
    EmptyDestination,
    #[error("page unavailable: {0}")]
    PageUnavailable(String),
}

pub trait Panel {
    /// Creates the panel elements. Called at most once per controller.
    fn mount(&mut self) -> Result<(), PanelError>;
    /// Displays the panel, clears the input and gives it focus.
    fn show(&mut self) -> Result<(), PanelError>;
    fn hide(&mut self);
    fn attach_listeners(&mut self) -> Result<(), PanelError>;
    fn detach_listeners(&mut self);
    /// Full repaint. An empty slice hides the result area.
    fn render_results(&mut self, titles: &[&str], selected: usize) -> Result<(), PanelError>;
    fn restyle_row(&mut self, index: usize, highlighted: bool) -> Result<(), PanelError>;
    fn reset_decorations(&mut self);
}

/// Fires a link click the player's router recognizes.
pub trait Navigator {
    fn click_link(&mut self, href: &str) -> Result<(), NavigationError>;
}

pub fn navigate(navigator: &mut dyn Navigator, destination: &str) -> Result<(), NavigationError> {
    let trimmed = destination.trim();
    if trimmed.is_empty() {
        return Err(NavigationError::EmptyDestination);
    }
    navigator.click_link(trimmed)
}

#[derive(Debug, Default)]
pub struct MockPanel {
    pub mounts: usize,
    pub visible: bool,
    pub listeners_attached: bool,
    pub rows: Vec<String>,
    pub result_area_visible: bool,
    pub highlighted: Option<usize>,
    pub restyles: Vec<(usize, bool)>,
    pub decoration_resets: usize,
    pub fail_lookups: bool,
    /// Row whose highlight lookup fails, leaving other rows restylable.
    pub fail_highlight_row: Option<usize>,
}

impl MockPanel {
    fn lookup(&self, element: &str) -> Result<(), PanelError> {
        if self.fail_lookups {
            return Err(PanelError::ElementNotFound(element.to_string()));
        }
        Ok(())
    }
}

impl Panel for MockPanel {
    fn mount(&mut self) -> Result<(), PanelError> {
        self.lookup("body")?;
        self.mounts += 1;
        Ok(())
    }

    fn show(&mut self) -> Result<(), PanelError> {
        self.lookup("#quick-switcher")?;
        self.visible = true;
        Ok(())
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn attach_listeners(&mut self) -> Result<(), PanelError> {
        self.lookup("#quick-switcher input")?;
        self.listeners_attached = true;
        Ok(())
    }

    fn detach_listeners(&mut self) {
        self.listeners_attached = false;
    }

    fn render_results(&mut self, titles: &[&str], selected: usize) -> Result<(), PanelError> {
        self.lookup("#quick-switcher-result-container")?;
        self.rows = titles.iter().map(|t| t.to_string()).collect();
        self.result_area_visible = !titles.is_empty();
        self.highlighted = (!titles.is_empty()).then_some(selected);
        self.restyles.clear();
        Ok(())
    }

    fn restyle_row(&mut self, index: usize, highlighted: bool) -> Result<(), PanelError> {
        self.lookup("#quick-switcher-result-container li")?;
        if index >= self.rows.len() || (highlighted && self.fail_highlight_row == Some(index)) {
            return Err(PanelError::MissingRow(index));
        }
        self.restyles.push((index, highlighted));
        if highlighted {
            self.highlighted = Some(index);
        } else if self.highlighted == Some(index) {
            self.highlighted = None;
        }
        Ok(())
    }

    fn reset_decorations(&mut self) {
        self.decoration_resets += 1;
    }
}

#[derive(Debug, Default)]
pub struct MockNavigator {
    pub clicked: Vec<String>,
    pub fail: bool,
}

impl Navigator for MockNavigator {
    fn click_link(&mut self, href: &str) -> Result<(), NavigationError> {
        if self.fail {
            return Err(NavigationError::PageUnavailable("document.body".to_string()));
        }
        self.clicked.push(href.to_string());
        Ok(())
    }
}
