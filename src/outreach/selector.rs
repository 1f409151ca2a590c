// src/outreach/selector.rs
//! Carousel state for browsing tone variants per contact and channel.
//!
//! View state only. Nothing here is ever persisted; a reloaded bundle
//! starts over at the first variant.

use crate::outreach::templates::ToneVariant;

/// Index-based selector over a fixed variant list, clamped at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSelector {
    index: usize,
    len: usize,
}

impl VariantSelector {
    pub fn new() -> Self {
        Self {
            index: 0,
            len: ToneVariant::ALL.len(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> ToneVariant {
        ToneVariant::ALL[self.index]
    }

    /// Move to the next variant; a no-op at the last one.
    pub fn advance(&mut self) {
        self.index = (self.index + 1).min(self.len - 1);
    }

    /// Move to the previous variant; a no-op at the first one.
    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
    }
}

impl Default for VariantSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-contact view state: one selector per channel, browsed
/// independently, plus the email panel's expand flag.
#[derive(Debug, Clone)]
pub struct ContactSelectors {
    pub email: VariantSelector,
    pub linkedin: VariantSelector,
    pub email_expanded: bool,
}

impl Default for ContactSelectors {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactSelectors {
    pub fn new() -> Self {
        Self {
            email: VariantSelector::new(),
            linkedin: VariantSelector::new(),
            // Email drafts start open in the results view.
            email_expanded: true,
        }
    }

    pub fn toggle_email_expanded(&mut self) {
        self.email_expanded = !self.email_expanded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_starts_at_standard() {
        let sel = VariantSelector::new();
        assert_eq!(sel.index(), 0);
        assert_eq!(sel.current(), ToneVariant::Standard);
    }

    #[test]
    fn test_advance_clamps_at_upper_bound() {
        let mut sel = VariantSelector::new();
        for _ in 0..10 {
            sel.advance();
            assert!(sel.index() <= ToneVariant::ALL.len() - 1);
        }
        assert_eq!(sel.current(), ToneVariant::Silly);
        sel.advance();
        assert_eq!(sel.current(), ToneVariant::Silly);
    }

    #[test]
    fn test_retreat_clamps_at_zero() {
        let mut sel = VariantSelector::new();
        sel.retreat();
        assert_eq!(sel.index(), 0);
        sel.advance();
        sel.retreat();
        sel.retreat();
        assert_eq!(sel.index(), 0);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut selectors = ContactSelectors::new();
        selectors.email.advance();
        selectors.email.advance();
        assert_eq!(selectors.email.current(), ToneVariant::Silly);
        assert_eq!(selectors.linkedin.current(), ToneVariant::Standard);
    }

    #[test]
    fn test_email_panel_defaults_to_expanded() {
        let mut selectors = ContactSelectors::new();
        assert!(selectors.email_expanded);
        selectors.toggle_email_expanded();
        assert!(!selectors.email_expanded);
    }

    #[test]
    fn test_default_agrees_with_new() {
        let selectors = ContactSelectors::default();
        assert!(selectors.email_expanded);
        assert_eq!(selectors.email.index(), 0);
        assert_eq!(selectors.linkedin.index(), 0);
    }
}
