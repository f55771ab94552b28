//! The preview session: current selection plus the controls that edit it.
//!
//! Every user action is a single transition that runs to completion: read
//! the selection, resolve the effective variant, apply it to the surface
//! and, for apply/reset, persist.

use crate::catalog::{Catalog, FontFamily, Variant, Weight, DEFAULT_FAMILY};
use crate::error::Result;
use crate::render::RenderTrigger;
use crate::resolve::resolve;
use crate::selection::Selection;
use crate::store::{self, KeyValueStore};
use std::time::Instant;

pub struct Session {
    catalog: Catalog,
    store: Box<dyn KeyValueStore>,
    render: RenderTrigger,
    selection: Selection,
}

impl Session {
    /// Load the persisted selection and show it.
    ///
    /// A stored family the catalog doesn't know is replaced by the default
    /// family, or by the first family when the default isn't in the catalog.
    pub fn open(catalog: Catalog, store: Box<dyn KeyValueStore>, now: Instant) -> Result<Self> {
        let mut selection = store::load(&*store);

        if !catalog.contains(&selection.font_family) {
            let fallback = if catalog.contains(DEFAULT_FAMILY) {
                DEFAULT_FAMILY.to_string()
            } else {
                catalog.families().next().unwrap_or(DEFAULT_FAMILY).to_string()
            };
            log::warn!(
                "stored font family '{}' is not in the catalog, using '{fallback}'",
                selection.font_family
            );
            selection.font_family = fallback;
        }

        let mut session = Session {
            catalog,
            store,
            render: RenderTrigger::new(),
            selection,
        };
        let (weight, italic) = (session.selection.font_weight, session.selection.is_italic);
        session.show(weight, italic, now)?;
        Ok(session)
    }

    /// Resolve `(weight, italic)` in the selected family, move the controls
    /// onto the resolved variant and apply it.
    fn show(&mut self, weight: Weight, italic: bool, now: Instant) -> Result<()> {
        let family = self.catalog.family(&self.selection.font_family)?;
        let variant = resolve(family, weight, italic).clone();
        self.selection.font_weight = variant.weight;
        self.selection.is_italic = variant.italic;
        self.render.apply(&self.selection.font_family, &variant, now);
        Ok(())
    }

    fn family(&self) -> Result<&FontFamily> {
        self.catalog.family(&self.selection.font_family)
    }

    /// Switch family, keeping the requested weight and italic as close as the
    /// new family allows. An italic the family lacks is dropped.
    pub fn select_family(&mut self, name: &str, now: Instant) -> Result<()> {
        self.catalog.family(name)?;
        self.selection.font_family = name.to_string();
        self.show(self.selection.font_weight, self.selection.is_italic, now)
    }

    /// Pick a weight. Italic stays on only if the weight has an italic variant.
    pub fn select_weight(&mut self, weight: Weight, now: Instant) -> Result<()> {
        let italic = self.selection.is_italic && self.family()?.find(weight, true).is_some();
        self.show(weight, italic, now)
    }

    /// Flip italic. Refused (returns `false`) while the toggle is disabled.
    pub fn toggle_italic(&mut self, now: Instant) -> Result<bool> {
        if !self.italic_enabled() {
            return Ok(false);
        }
        let italic = !self.selection.is_italic;
        self.show(self.selection.font_weight, italic, now)?;
        Ok(true)
    }

    /// Set italic to `italic`; `false` if that isn't possible right now.
    pub fn set_italic(&mut self, italic: bool, now: Instant) -> Result<bool> {
        if self.selection.is_italic == italic {
            return Ok(true);
        }
        self.toggle_italic(now)
    }

    /// Replace the sample text. The text key is persisted straight away.
    pub fn edit_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.selection.text = text.into();
        store::save_text(&mut *self.store, &self.selection.text)
    }

    /// Re-apply the current style and save the selection.
    pub fn apply(&mut self, now: Instant) -> Result<()> {
        self.show(self.selection.font_weight, self.selection.is_italic, now)?;
        store::save(&mut *self.store, &self.selection)
    }

    /// Back to the default selection, shown and saved.
    pub fn reset(&mut self, now: Instant) -> Result<()> {
        let defaults = Selection::default();
        if self.catalog.contains(&defaults.font_family) {
            self.selection = defaults;
        } else {
            self.selection.text = defaults.text;
            self.selection.font_weight = defaults.font_weight;
            self.selection.is_italic = defaults.is_italic;
        }
        self.apply(now)
    }

    /// Weights offered by the weight selector: the family's upright weights.
    pub fn weight_options(&self) -> Vec<Weight> {
        self.family()
            .map(FontFamily::upright_weights)
            .unwrap_or_default()
    }

    /// The italic toggle is usable when the current weight has an italic.
    pub fn italic_enabled(&self) -> bool {
        self.family()
            .map(|f| f.find(self.selection.font_weight, true).is_some())
            .unwrap_or(false)
    }

    /// Run pending stylesheet revocations.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.render.pump(now)
    }

    pub fn current_variant(&self) -> Result<&Variant> {
        Ok(resolve(
            self.family()?,
            self.selection.font_weight,
            self.selection.is_italic,
        ))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn render(&self) -> &RenderTrigger {
        &self.render
    }

    #[cfg(test)]
    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }
}
