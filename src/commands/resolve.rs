use crate::catalog::{format_label, parse_weight};
use crate::config::Options;
use crate::error::Result;

pub fn run(options: &Options, family: &str, weight: &str, italic: bool) {
    if let Err(e) = run_inner(options, family, weight, italic) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_inner(options: &Options, family: &str, weight: &str, italic: bool) -> Result<()> {
    let catalog = options.load_catalog()?;
    let family = super::family_name(&catalog, family)?;
    let weight = parse_weight(weight)?;

    let variant = crate::resolve::resolve_in(&catalog, &family, weight, italic)?;
    let requested = format_label(weight, italic);
    if variant.is(weight, italic) {
        println!("{family} {requested}");
    } else {
        println!("{family} {requested} -> {}", variant.label());
    }
    let url = catalog.resource_of(&family, variant.weight, variant.italic)?;
    println!("  {url}");
    Ok(())
}
