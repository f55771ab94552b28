use crate::config::Options;
use crate::tui;

pub fn run(options: &Options) {
    if let Err(e) = run_inner(options) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_inner(options: &Options) -> Result<(), String> {
    let mut session = options.open_session().map_err(|e| e.to_string())?;
    tui::preview(&mut session)?;

    if options.ephemeral {
        println!("Nothing saved (--ephemeral).");
    }
    Ok(())
}
