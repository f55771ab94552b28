//! Render trigger: makes a variant's stylesheet available and styles the
//! preview text.
//!
//! A stylesheet registration only has to exist long enough for the font to
//! be fetched and cached, so each one is revoked again after
//! [`REVOKE_AFTER`]. Revocations sit in a timer queue that the event loop
//! drains with [`RenderTrigger::pump`]; nothing here spawns threads.

use crate::catalog::{Variant, Weight};
use std::time::{Duration, Instant};

/// How long a stylesheet registration is kept before it is revoked.
pub const REVOKE_AFTER: Duration = Duration::from_secs(1);

/// A registered `<link rel="stylesheet">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetLink {
    pub id: u64,
    pub href: String,
}

impl StylesheetLink {
    pub fn to_html(&self) -> String {
        format!(
            "<link rel=\"stylesheet\" href=\"{}\">",
            self.href.replace('&', "&amp;").replace('"', "&quot;")
        )
    }
}

/// The set of stylesheet links currently registered on the surface.
#[derive(Debug, Default)]
pub struct Stylesheets {
    links: Vec<StylesheetLink>,
    next_id: u64,
}

impl Stylesheets {
    fn register(&mut self, href: &str) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.links.push(StylesheetLink {
            id,
            href: href.to_string(),
        });
        id
    }

    /// Remove registration `id`. Removing one that is already gone is a no-op.
    fn revoke(&mut self, id: u64) -> bool {
        let before = self.links.len();
        self.links.retain(|l| l.id != id);
        self.links.len() != before
    }

    pub fn links(&self) -> &[StylesheetLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Visual style of the text surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub family: String,
    pub weight: Weight,
    pub italic: bool,
}

impl TextStyle {
    pub fn font_style(&self) -> &'static str {
        if self.italic {
            "italic"
        } else {
            "normal"
        }
    }

    /// Whether a terminal should draw this style bold.
    pub fn is_bold(&self) -> bool {
        self.weight >= 600
    }

    /// CSS declarations for the style.
    pub fn to_css(&self) -> String {
        format!(
            "font-family: '{}'; font-weight: {}; font-style: {};",
            self.family.replace('\'', "\\'"),
            self.weight,
            self.font_style()
        )
    }
}

#[derive(Debug)]
struct Revocation {
    id: u64,
    due: Instant,
}

#[derive(Debug, Default)]
pub struct RenderTrigger {
    stylesheets: Stylesheets,
    pending: Vec<Revocation>,
    style: Option<TextStyle>,
}

impl RenderTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the variant's stylesheet, schedule its revocation and set the
    /// text style. Earlier registrations keep their own schedules.
    pub fn apply(&mut self, family: &str, variant: &Variant, now: Instant) {
        let id = self.stylesheets.register(&variant.url);
        self.pending.push(Revocation {
            id,
            due: now + REVOKE_AFTER,
        });
        log::debug!("registered stylesheet #{id} for {family} {}", variant.label());

        self.style = Some(TextStyle {
            family: family.to_string(),
            weight: variant.weight,
            italic: variant.italic,
        });
    }

    /// Run every revocation due at `now`. Returns how many ran.
    pub fn pump(&mut self, now: Instant) -> usize {
        let mut ran = 0;
        let stylesheets = &mut self.stylesheets;
        self.pending.retain(|r| {
            if r.due <= now {
                if stylesheets.revoke(r.id) {
                    log::debug!("revoked stylesheet #{}", r.id);
                }
                ran += 1;
                false
            } else {
                true
            }
        });
        ran
    }

    /// Time until the next revocation is due, if any are pending.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.pending
            .iter()
            .map(|r| r.due.saturating_duration_since(now))
            .min()
    }

    pub fn style(&self) -> Option<&TextStyle> {
        self.style.as_ref()
    }

    pub fn stylesheets(&self) -> &Stylesheets {
        &self.stylesheets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(weight: Weight, italic: bool) -> Variant {
        Variant::new(weight, italic, format!("https://example.test/{weight}?a=1&b=2"))
    }

    #[test]
    fn apply_registers_and_styles() {
        let mut trigger = RenderTrigger::new();
        let now = Instant::now();
        trigger.apply("Roboto", &variant(700, true), now);

        assert_eq!(trigger.stylesheets().len(), 1);
        let style = trigger.style().unwrap();
        assert_eq!(style.family, "Roboto");
        assert_eq!(style.weight, 700);
        assert!(style.italic);
        assert!(style.is_bold());
    }

    #[test]
    fn registration_is_revoked_after_delay() {
        let mut trigger = RenderTrigger::new();
        let now = Instant::now();
        trigger.apply("Roboto", &variant(400, false), now);

        assert_eq!(trigger.pump(now + Duration::from_millis(999)), 0);
        assert_eq!(trigger.stylesheets().len(), 1);
        assert_eq!(trigger.pump(now + REVOKE_AFTER), 1);
        assert!(trigger.stylesheets().is_empty());
        assert_eq!(trigger.time_until_next(now), None);
    }

    #[test]
    fn overlapping_applies_revoke_independently() {
        let mut trigger = RenderTrigger::new();
        let t0 = Instant::now();
        trigger.apply("Roboto", &variant(400, false), t0);
        let t1 = t0 + Duration::from_millis(500);
        trigger.apply("Roboto", &variant(700, false), t1);

        assert_eq!(trigger.stylesheets().len(), 2);
        assert_eq!(
            trigger.time_until_next(t1),
            Some(Duration::from_millis(500))
        );

        trigger.pump(t0 + REVOKE_AFTER);
        let left: Vec<&str> = trigger
            .stylesheets()
            .links()
            .iter()
            .map(|l| l.href.as_str())
            .collect();
        assert_eq!(left, ["https://example.test/700?a=1&b=2"]);

        trigger.pump(t1 + REVOKE_AFTER);
        assert!(trigger.stylesheets().is_empty());
        // Style is whatever the last apply set.
        assert_eq!(trigger.style().unwrap().weight, 700);
    }

    #[test]
    fn css_and_html_output() {
        let style = TextStyle {
            family: "Open Sans".to_string(),
            weight: 600,
            italic: false,
        };
        assert_eq!(
            style.to_css(),
            "font-family: 'Open Sans'; font-weight: 600; font-style: normal;"
        );

        let link = StylesheetLink {
            id: 1,
            href: "https://x.test/?a=1&b=2".to_string(),
        };
        assert_eq!(
            link.to_html(),
            "<link rel=\"stylesheet\" href=\"https://x.test/?a=1&amp;b=2\">"
        );
    }
}
