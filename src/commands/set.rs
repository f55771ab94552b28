use crate::catalog::parse_weight;
use crate::config::Options;
use crate::error::Result;
use std::time::Instant;

pub fn run(
    options: &Options,
    family: Option<String>,
    weight: Option<String>,
    italic: Option<bool>,
    text: Option<String>,
) {
    if let Err(e) = run_inner(options, family, weight, italic, text) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_inner(
    options: &Options,
    family: Option<String>,
    weight: Option<String>,
    italic: Option<bool>,
    text: Option<String>,
) -> Result<()> {
    let mut session = options.open_session()?;
    let now = Instant::now();

    // Same order as the preview controls: family, weight, italic, text.
    if let Some(query) = family {
        let name = super::family_name(session.catalog(), &query)?;
        session.select_family(&name, now)?;
    }
    if let Some(raw) = weight {
        let requested = parse_weight(&raw)?;
        session.select_weight(requested, now)?;
        if session.selection().font_weight != requested {
            println!(
                "{} has no weight {requested}, using {}.",
                session.selection().font_family,
                session.selection().font_weight
            );
        }
    }
    if let Some(italic) = italic {
        if !session.set_italic(italic, now)? {
            println!(
                "{} {} has no italic, keeping it upright.",
                session.selection().font_family,
                session.selection().font_weight
            );
        }
    }
    if let Some(text) = text {
        session.edit_text(text)?;
    }

    session.apply(now)?;
    let selection = session.selection();
    println!(
        "Saved {} {}.",
        selection.font_family,
        selection.label()
    );
    Ok(())
}

pub fn reset(options: &Options) {
    let result = options
        .open_session()
        .and_then(|mut session| session.reset(Instant::now()));
    match result {
        Ok(()) => println!("Restored the default selection."),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
