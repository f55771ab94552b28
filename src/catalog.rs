//! The font catalog: families, their variants and the stylesheet URL that
//! makes each variant usable.
//!
//! The built-in catalog ships two Google Fonts families. A TOML catalog file
//! can replace them or add more; see [`Catalog::load`].

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Numeric font weight (e.g. 400, 700).
pub type Weight = u16;

pub const DEFAULT_FAMILY: &str = "Roboto";
pub const DEFAULT_WEIGHT: Weight = 400;

/// Built-in families in display order: `(name, [(weight, italic, url)])`.
const BUILTIN: &[(&str, &[(Weight, bool, &str)])] = &[
    (
        "Roboto",
        &[
            (400, false, "https://fonts.googleapis.com/css2?family=Roboto:wght@400&display=swap"),
            (400, true, "https://fonts.googleapis.com/css2?family=Roboto:ital,wght@0,400;1,400&display=swap"),
            (700, false, "https://fonts.googleapis.com/css2?family=Roboto:wght@700&display=swap"),
            (700, true, "https://fonts.googleapis.com/css2?family=Roboto:ital,wght@0,700;1,700&display=swap"),
        ],
    ),
    (
        "Open Sans",
        &[
            (400, false, "https://fonts.googleapis.com/css2?family=Open+Sans:wght@400&display=swap"),
            (400, true, "https://fonts.googleapis.com/css2?family=Open+Sans:ital,wght@0,400;1,400&display=swap"),
            (600, false, "https://fonts.googleapis.com/css2?family=Open+Sans:wght@600&display=swap"),
            (600, true, "https://fonts.googleapis.com/css2?family=Open+Sans:ital,wght@0,600;1,600&display=swap"),
        ],
    ),
];

/// One (weight, italic) face of a family and the stylesheet that loads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub weight: Weight,
    pub italic: bool,
    pub url: String,
}

impl Variant {
    pub fn new(weight: Weight, italic: bool, url: impl Into<String>) -> Self {
        Variant {
            weight,
            italic,
            url: url.into(),
        }
    }

    /// Label in catalog notation: `"400"` or `"400italic"`.
    pub fn label(&self) -> String {
        format_label(self.weight, self.italic)
    }

    pub fn is(&self, weight: Weight, italic: bool) -> bool {
        self.weight == weight && self.italic == italic
    }
}

pub fn format_label(weight: Weight, italic: bool) -> String {
    if italic {
        format!("{weight}italic")
    } else {
        weight.to_string()
    }
}

/// Parse a variant label (`"700"`, `"700italic"`) into `(weight, italic)`.
pub fn parse_label(label: &str) -> Result<(Weight, bool)> {
    let trimmed = label.trim();
    let (digits, italic) = match trimmed.strip_suffix("italic") {
        Some(rest) => (rest, true),
        None => (trimmed, false),
    };
    let weight = parse_weight(digits)?;
    Ok((weight, italic))
}

pub fn parse_weight(s: &str) -> Result<Weight> {
    match s.trim().parse::<Weight>() {
        Ok(w) if w > 0 => Ok(w),
        _ => Err(Error::InvalidWeight(s.to_string())),
    }
}

/// A named family with its ordered, non-empty variant list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    name: String,
    variants: Vec<Variant>,
}

impl FontFamily {
    /// Build a family, rejecting an empty variant list or a repeated
    /// (weight, italic) pair.
    pub fn new(name: impl Into<String>, variants: Vec<Variant>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidCatalog("family with an empty name".to_string()));
        }
        if variants.is_empty() {
            return Err(Error::InvalidCatalog(format!("family '{name}' has no variants")));
        }
        for (i, v) in variants.iter().enumerate() {
            if variants[..i].iter().any(|p| p.is(v.weight, v.italic)) {
                return Err(Error::InvalidCatalog(format!(
                    "family '{name}' declares variant '{}' twice",
                    v.label()
                )));
            }
        }
        Ok(FontFamily { name, variants })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn find(&self, weight: Weight, italic: bool) -> Option<&Variant> {
        self.variants.iter().find(|v| v.is(weight, italic))
    }

    /// Weights that have an upright variant, in declared order.
    pub fn upright_weights(&self) -> Vec<Weight> {
        self.variants
            .iter()
            .filter(|v| !v.italic)
            .map(|v| v.weight)
            .collect()
    }
}

/// Immutable, ordered set of known families.
#[derive(Debug, Clone)]
pub struct Catalog {
    families: Vec<FontFamily>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn new(families: Vec<FontFamily>) -> Result<Self> {
        if families.is_empty() {
            return Err(Error::InvalidCatalog("no font families".to_string()));
        }
        for (i, f) in families.iter().enumerate() {
            if families[..i].iter().any(|p| p.name == f.name) {
                return Err(Error::InvalidCatalog(format!(
                    "family '{}' is declared twice",
                    f.name
                )));
            }
        }
        Ok(Catalog { families })
    }

    /// The families that ship with fontpeek.
    pub fn builtin() -> Self {
        let families = BUILTIN
            .iter()
            .map(|(name, variants)| FontFamily {
                name: name.to_string(),
                variants: variants
                    .iter()
                    .map(|&(weight, italic, url)| Variant::new(weight, italic, url))
                    .collect(),
            })
            .collect();
        Catalog { families }
    }

    /// Built-in catalog, extended with `path` if given. Families in the file
    /// replace built-in families of the same name and are otherwise appended.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut catalog = Self::builtin();
        if let Some(path) = path {
            let src = fs::read_to_string(path)?;
            let extra = parse_catalog_toml(&src)?;
            log::debug!(
                "loaded {} families from catalog file {}",
                extra.len(),
                path.display()
            );
            catalog.extend(extra);
        }
        Ok(catalog)
    }

    /// Add `families`, replacing any existing family with the same name.
    pub fn extend(&mut self, families: Vec<FontFamily>) {
        for family in families {
            match self.families.iter_mut().find(|f| f.name == family.name) {
                Some(existing) => *existing = family,
                None => self.families.push(family),
            }
        }
    }

    /// Family names in display order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|f| f.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.families.iter().any(|f| f.name == name)
    }

    pub fn family(&self, name: &str) -> Result<&FontFamily> {
        self.families
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| Error::UnknownFamily(name.to_string()))
    }

    pub fn variants_of(&self, name: &str) -> Result<&[Variant]> {
        self.family(name).map(FontFamily::variants)
    }

    /// Stylesheet URL of an exact variant. Callers holding a name and a
    /// requested pair resolve first; see [`crate::resolve::resolve_in`].
    pub fn resource_of(&self, name: &str, weight: Weight, italic: bool) -> Result<&str> {
        self.family(name)?
            .find(weight, italic)
            .map(|v| v.url.as_str())
            .ok_or_else(|| Error::UnknownVariant {
                family: name.to_string(),
                label: format_label(weight, italic),
            })
    }

    /// Case-insensitive family lookup for command-line input.
    pub fn find_by_name(&self, query: &str) -> Option<&str> {
        self.families()
            .find(|f| f.eq_ignore_ascii_case(query.trim()))
    }
}

/// Parse a catalog file:
///
/// ```toml
/// [[family]]
/// name = "Lato"
///
/// [family.urls]
/// "400" = "https://fonts.googleapis.com/css2?family=Lato:wght@400&display=swap"
/// "400italic" = "..."
/// ```
///
/// Variant order follows the order of the `urls` keys.
pub fn parse_catalog_toml(src: &str) -> Result<Vec<FontFamily>> {
    let doc: toml_edit::DocumentMut = src.parse()?;

    let tables = match doc.get("family") {
        Some(item) => item.as_array_of_tables().ok_or_else(|| {
            Error::InvalidCatalog("`family` must be an array of tables ([[family]])".to_string())
        })?,
        None => return Ok(Vec::new()),
    };

    let mut families = Vec::new();
    for (i, table) in tables.iter().enumerate() {
        let name = table
            .get("name")
            .and_then(|n| n.as_str())
            .ok_or_else(|| Error::InvalidCatalog(format!("family #{} has no name", i + 1)))?;

        let urls = table
            .get("urls")
            .and_then(|u| u.as_table_like())
            .ok_or_else(|| Error::InvalidCatalog(format!("family '{name}' has no urls table")))?;

        let mut variants = Vec::new();
        for (label, value) in urls.iter() {
            let (weight, italic) = parse_label(label).map_err(|_| {
                Error::InvalidCatalog(format!("family '{name}': bad variant label '{label}'"))
            })?;
            let url = value.as_str().ok_or_else(|| {
                Error::InvalidCatalog(format!("family '{name}': url for '{label}' is not a string"))
            })?;
            variants.push(Variant::new(weight, italic, url));
        }

        families.push(FontFamily::new(name, variants)?);
    }

    if families.is_empty() {
        return Ok(families);
    }
    // Reuse the duplicate-name check.
    Catalog::new(families).map(|c| c.families)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lists_families_in_declared_order() {
        let catalog = Catalog::builtin();
        let names: Vec<&str> = catalog.families().collect();
        assert_eq!(names, ["Roboto", "Open Sans"]);
    }

    #[test]
    fn builtin_variants_keep_declared_order() {
        let catalog = Catalog::builtin();
        let labels: Vec<String> = catalog
            .variants_of("Open Sans")
            .unwrap()
            .iter()
            .map(Variant::label)
            .collect();
        assert_eq!(labels, ["400", "400italic", "600", "600italic"]);
    }

    #[test]
    fn resource_of_returns_variant_url() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.resource_of("Roboto", 700, true).unwrap(),
            "https://fonts.googleapis.com/css2?family=Roboto:ital,wght@0,700;1,700&display=swap"
        );
    }

    #[test]
    fn unknown_family_is_reported() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.variants_of("Comic Sans"),
            Err(Error::UnknownFamily(name)) if name == "Comic Sans"
        ));
        assert!(matches!(
            catalog.resource_of("Comic Sans", 400, false),
            Err(Error::UnknownFamily(_))
        ));
    }

    #[test]
    fn unknown_variant_is_reported() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.resource_of("Roboto", 300, false),
            Err(Error::UnknownVariant { label, .. }) if label == "300"
        ));
    }

    #[test]
    fn labels_parse_and_format() {
        assert_eq!(parse_label("700italic").unwrap(), (700, true));
        assert_eq!(parse_label("400").unwrap(), (400, false));
        assert_eq!(format_label(600, true), "600italic");
        assert!(parse_label("bold").is_err());
        assert!(parse_label("italic").is_err());
        assert!(parse_weight("0").is_err());
    }

    #[test]
    fn upright_weights_skip_italics() {
        let catalog = Catalog::builtin();
        let family = catalog.family("Roboto").unwrap();
        assert_eq!(family.upright_weights(), vec![400, 700]);
    }

    #[test]
    fn family_rejects_duplicate_variants() {
        let err = FontFamily::new(
            "Dup",
            vec![Variant::new(400, false, "a"), Variant::new(400, false, "b")],
        );
        assert!(matches!(err, Err(Error::InvalidCatalog(_))));
        assert!(FontFamily::new("Empty", Vec::new()).is_err());
    }

    #[test]
    fn find_by_name_ignores_case() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find_by_name("open sans"), Some("Open Sans"));
        assert_eq!(catalog.find_by_name("lato"), None);
    }

    const LATO: &str = r#"
[[family]]
name = "Lato"

[family.urls]
"300" = "https://example.test/lato-300"
"700" = "https://example.test/lato-700"
"700italic" = "https://example.test/lato-700i"

[[family]]
name = "Roboto"

[family.urls]
"500" = "https://example.test/roboto-500"
"#;

    #[test]
    fn catalog_file_parses_in_key_order() {
        let families = parse_catalog_toml(LATO).unwrap();
        assert_eq!(families.len(), 2);
        let labels: Vec<String> = families[0].variants().iter().map(Variant::label).collect();
        assert_eq!(labels, ["300", "700", "700italic"]);
    }

    #[test]
    fn catalog_file_replaces_and_appends() {
        let mut catalog = Catalog::builtin();
        catalog.extend(parse_catalog_toml(LATO).unwrap());
        let names: Vec<&str> = catalog.families().collect();
        assert_eq!(names, ["Roboto", "Open Sans", "Lato"]);
        let roboto: Vec<Weight> = catalog
            .variants_of("Roboto")
            .unwrap()
            .iter()
            .map(|v| v.weight)
            .collect();
        assert_eq!(roboto, vec![500]);
    }

    #[test]
    fn catalog_file_rejects_bad_labels() {
        let src = "[[family]]\nname = \"X\"\n[family.urls]\n\"heavy\" = \"u\"\n";
        assert!(matches!(
            parse_catalog_toml(src),
            Err(Error::InvalidCatalog(_))
        ));
    }

    #[test]
    fn catalog_file_rejects_duplicate_families() {
        let src = "[[family]]\nname = \"X\"\n[family.urls]\n\"400\" = \"u\"\n\
                   [[family]]\nname = \"X\"\n[family.urls]\n\"700\" = \"v\"\n";
        assert!(matches!(
            parse_catalog_toml(src),
            Err(Error::InvalidCatalog(_))
        ));
    }

    #[test]
    fn empty_catalog_file_adds_nothing() {
        assert!(parse_catalog_toml("").unwrap().is_empty());
    }
}
