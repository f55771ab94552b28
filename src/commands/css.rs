use crate::config::Options;
use crate::error::Result;

pub fn run(options: &Options) {
    if let Err(e) = run_inner(options) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_inner(options: &Options) -> Result<()> {
    let session = options.open_session()?;

    // Opening the session applied the selection, so its registration is the
    // one still live on the surface.
    for link in session.render().stylesheets().links() {
        println!("{}", link.to_html());
    }
    if let Some(style) = session.render().style() {
        println!(".preview {{ {} }}", style.to_css());
    }
    Ok(())
}
