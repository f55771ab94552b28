pub fn run() {
    println!("fontpeek — preview web fonts and remember the choice");
    println!();
    println!("Usage: fontpeek [--data-dir DIR] [--catalog FILE] [--ephemeral] <command>");
    println!();
    println!("Commands:");
    println!("  preview      Open the interactive preview");
    println!("  families     List font families and their variants");
    println!("  resolve      Show which variant a weight/style resolves to");
    println!("  show         Print the saved selection");
    println!("  set          Change the selection and save it");
    println!("  reset        Restore the default selection");
    println!("  css          Print the stylesheet link and CSS for the selection");
    println!("  completions  Generate shell completions");
    println!();
    println!("Run `fontpeek <command> --help` for more info on a command.");
}
