use crate::config::Options;
use crate::error::Result;

pub fn run(options: &Options, json: bool) {
    if let Err(e) = run_inner(options, json) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_inner(options: &Options, json: bool) -> Result<()> {
    let session = options.open_session()?;
    let selection = session.selection();

    if json {
        println!("{}", serde_json::to_string_pretty(selection)?);
        return Ok(());
    }

    println!("Family: {}", selection.font_family);
    println!("Weight: {}", selection.font_weight);
    println!("Italic: {}", if selection.is_italic { "yes" } else { "no" });
    if selection.text.is_empty() {
        println!("Text:   (empty)");
    } else {
        println!("Text:   {}", selection.text);
    }
    let variant = session.current_variant()?;
    println!("Font:   {} {}", selection.font_family, variant.label());
    println!("        {}", variant.url);
    Ok(())
}
