//! Nearest-variant resolution.
//!
//! Picks the variant a family should render with when the requested
//! (weight, italic) pair is not one it declares.

use crate::catalog::{format_label, Catalog, FontFamily, Variant, Weight};
use crate::error::Result;

/// Resolve `(weight, italic)` against `family`.
///
/// 1. An exact match wins.
/// 2. If italic was requested and the family has any italic variant, the
///    italic variant with the nearest weight.
/// 3. Otherwise the nearest weight across all variants, italic or not.
///
/// Equal distances go to the variant declared first. Never fails: a family
/// always has at least one variant.
pub fn resolve(family: &FontFamily, weight: Weight, italic: bool) -> &Variant {
    let variants = family.variants();

    if let Some(exact) = family.find(weight, italic) {
        return exact;
    }

    if italic {
        if let Some(v) = nearest(variants.iter().filter(|v| v.italic), weight) {
            log::debug!(
                "{}: no {}, using nearest italic {}",
                family.name(),
                format_label(weight, italic),
                v.label()
            );
            return v;
        }
    }

    // Families are never empty, so the fallback always finds something.
    let v = nearest(variants.iter(), weight).unwrap_or(&variants[0]);
    log::debug!(
        "{}: no {}, falling back to {}",
        family.name(),
        format_label(weight, italic),
        v.label()
    );
    v
}

/// [`resolve`] by family name; fails only for an unknown family.
pub fn resolve_in<'a>(
    catalog: &'a Catalog,
    family: &str,
    weight: Weight,
    italic: bool,
) -> Result<&'a Variant> {
    Ok(resolve(catalog.family(family)?, weight, italic))
}

/// First variant with the minimum weight distance to `target`.
fn nearest<'a>(candidates: impl Iterator<Item = &'a Variant>, target: Weight) -> Option<&'a Variant> {
    let mut best: Option<(&Variant, u16)> = None;
    for v in candidates {
        let distance = v.weight.abs_diff(target);
        let replace = match best {
            Some((_, best_distance)) => distance < best_distance,
            None => true,
        };
        if replace {
            best = Some((v, distance));
        }
    }
    best.map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use proptest::prelude::*;

    fn family(variants: &[(Weight, bool)]) -> FontFamily {
        FontFamily::new(
            "Test",
            variants
                .iter()
                .map(|&(w, i)| Variant::new(w, i, format!("https://example.test/{w}/{i}")))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn exact_match_wins() {
        let f = family(&[(400, false), (400, true), (700, false), (700, true)]);
        let v = resolve(&f, 700, true);
        assert!(v.is(700, true));
    }

    #[test]
    fn nearest_weight_fallback() {
        let f = family(&[(400, false), (700, false)]);
        assert!(resolve(&f, 600, false).is(700, false));
        assert!(resolve(&f, 500, false).is(400, false));
    }

    #[test]
    fn equal_distance_goes_to_first_declared() {
        let f = family(&[(400, false), (600, false)]);
        for _ in 0..5 {
            assert!(resolve(&f, 500, false).is(400, false));
        }
        let reversed = family(&[(600, false), (400, false)]);
        assert!(resolve(&reversed, 500, false).is(600, false));
    }

    #[test]
    fn italic_request_prefers_nearest_italic() {
        let f = family(&[(300, false), (400, true), (800, true), (900, false)]);
        // 900 upright is closer, but an italic exists.
        assert!(resolve(&f, 900, true).is(800, true));
        assert!(resolve(&f, 500, true).is(400, true));
    }

    #[test]
    fn italic_ties_go_to_first_declared_italic() {
        let f = family(&[(400, true), (600, true), (500, false)]);
        assert!(resolve(&f, 500, true).is(400, true));
        let reversed = family(&[(600, true), (400, true), (500, false)]);
        assert!(resolve(&reversed, 500, true).is(600, true));
    }

    #[test]
    fn italic_miss_falls_back_to_upright() {
        let f = family(&[(400, false), (700, false)]);
        assert!(resolve(&f, 400, true).is(400, false));
        assert!(resolve(&f, 650, true).is(700, false));
    }

    #[test]
    fn upright_request_may_land_on_italic() {
        let f = family(&[(400, true), (700, false)]);
        assert!(resolve(&f, 400, false).is(400, true));
    }

    #[test]
    fn resolve_in_reports_unknown_family() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            resolve_in(&catalog, "Nope", 400, false),
            Err(Error::UnknownFamily(_))
        ));
        let v = resolve_in(&catalog, "Open Sans", 700, true).unwrap();
        assert!(v.is(600, true));
    }

    fn arb_family() -> impl Strategy<Value = FontFamily> {
        prop::collection::btree_set((1u16..=1000, any::<bool>()), 1..8)
            .prop_map(|set| set.into_iter().collect::<Vec<(Weight, bool)>>())
            .prop_shuffle()
            .prop_map(|pairs| family(&pairs))
    }

    proptest! {
        #[test]
        fn prop_result_belongs_to_family(f in arb_family(), w in 0u16..=1200, italic in any::<bool>()) {
            let v = resolve(&f, w, italic);
            prop_assert!(f.variants().iter().any(|c| c == v));
        }

        #[test]
        fn prop_result_is_nearest_in_its_pool(f in arb_family(), w in 0u16..=1200) {
            let v = resolve(&f, w, false);
            if f.find(w, false).is_none() {
                let best = f.variants().iter().map(|c| c.weight.abs_diff(w)).min().unwrap();
                prop_assert_eq!(v.weight.abs_diff(w), best);
            }
        }

        #[test]
        fn prop_winner_is_first_nearest_in_declared_order(
            f in arb_family(),
            w in 0u16..=1200,
            italic in any::<bool>(),
        ) {
            let v = resolve(&f, w, italic);
            if f.find(w, italic).is_none() {
                let has_italic = f.variants().iter().any(|c| c.italic);
                let pool: Vec<&Variant> = f
                    .variants()
                    .iter()
                    .filter(|c| !(italic && has_italic) || c.italic)
                    .collect();
                let best = pool.iter().map(|c| c.weight.abs_diff(w)).min().unwrap();
                let first = pool.iter().find(|c| c.weight.abs_diff(w) == best).unwrap();
                prop_assert_eq!(v, *first);
            }
        }

        #[test]
        fn prop_italic_kept_when_available(f in arb_family(), w in 0u16..=1200) {
            let has_italic = f.variants().iter().any(|v| v.italic);
            prop_assert_eq!(resolve(&f, w, true).italic, has_italic);
        }
    }
}
