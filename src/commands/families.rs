use crate::catalog::Variant;
use crate::config::Options;
use crate::error::Result;

pub fn run(options: &Options) {
    if let Err(e) = run_inner(options) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_inner(options: &Options) -> Result<()> {
    let catalog = options.load_catalog()?;
    for name in catalog.families() {
        let labels: Vec<String> = catalog
            .variants_of(name)?
            .iter()
            .map(Variant::label)
            .collect();
        println!("{name}: {}", labels.join(", "));
    }
    Ok(())
}
