//! Build toolbar
//!
//! Text is laid out by the host; buttons here only carry a label and a
//! screen-space hit box.

use glam::Vec2;

use crate::sim::bounds::BoundingRect;
use crate::sim::state::StationKind;

/// Approximate glyph advance used to size a button from its label
const GLYPH_WIDTH: f32 = 9.0;
const BUTTON_HEIGHT: f32 = 24.0;
/// Distance from the bottom edge of the screen to the button row's center
const TOOLBAR_OFFSET: f32 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: &'static str,
    /// Station the button starts building
    pub action: StationKind,
    pub bounds: BoundingRect,
    pub hovered: bool,
}

impl Button {
    pub fn new(label: &'static str, action: StationKind, center: Vec2) -> Self {
        let width = label.chars().count() as f32 * GLYPH_WIDTH;
        Self {
            label,
            action,
            bounds: BoundingRect::from_size(center, Vec2::new(width, BUTTON_HEIGHT)),
            hovered: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toolbar {
    pub buttons: Vec<Button>,
}

impl Toolbar {
    /// The level's build buttons along the bottom of a screen `screen_height` tall
    pub fn new(screen_height: f32) -> Self {
        let y = screen_height - TOOLBAR_OFFSET;
        Self {
            buttons: vec![
                Button::new("New Solar Power Plant", StationKind::SolarPanel, Vec2::new(200.0, y)),
                Button::new("New Miner", StationKind::Miner, Vec2::new(450.0, y)),
            ],
        }
    }

    /// Refresh hover flags for a screen-space pointer
    pub fn update(&mut self, pointer: Option<Vec2>) {
        for button in &mut self.buttons {
            button.hovered = pointer.is_some_and(|p| button.bounds.contains_point(p));
        }
    }

    /// Whether the pointer is over any button (clicks there are not placements)
    pub fn is_hovered(&self) -> bool {
        self.buttons.iter().any(|b| b.hovered)
    }

    /// Build action under a click, if any
    pub fn select(&mut self, pointer: Vec2) -> Option<StationKind> {
        self.update(Some(pointer));
        let action = self.buttons.iter().find(|b| b.hovered).map(|b| b.action);
        if let Some(kind) = action {
            log::debug!("Toolbar selected {}", kind.as_str());
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let toolbar = Toolbar::new(720.0);
        assert_eq!(toolbar.buttons.len(), 2);
        assert_eq!(toolbar.buttons[0].bounds.center, Vec2::new(200.0, 705.0));
        assert_eq!(toolbar.buttons[1].bounds.center, Vec2::new(450.0, 705.0));
        assert_eq!(toolbar.buttons[1].bounds.size(), Vec2::new(81.0, 24.0));
        assert!(!toolbar.buttons[0].bounds.intersects_rect(&toolbar.buttons[1].bounds));
    }

    #[test]
    fn test_hover_only_the_button_under_pointer() {
        let mut toolbar = Toolbar::new(720.0);
        toolbar.update(Some(Vec2::new(450.0, 705.0)));
        assert!(!toolbar.buttons[0].hovered);
        assert!(toolbar.buttons[1].hovered);
        assert!(toolbar.is_hovered());

        toolbar.update(Some(Vec2::new(640.0, 100.0)));
        assert!(!toolbar.is_hovered());

        toolbar.update(None);
        assert!(!toolbar.is_hovered());
    }

    #[test]
    fn test_select() {
        let mut toolbar = Toolbar::new(720.0);
        assert_eq!(toolbar.select(Vec2::new(200.0, 710.0)), Some(StationKind::SolarPanel));
        assert_eq!(toolbar.select(Vec2::new(450.0, 700.0)), Some(StationKind::Miner));
        assert_eq!(toolbar.select(Vec2::new(325.0, 705.0)), None);
        assert_eq!(toolbar.select(Vec2::new(200.0, 600.0)), None);
    }
}
