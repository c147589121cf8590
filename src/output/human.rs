use console::style;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print one broken link target and the pages that reference it.
pub fn broken_link(href: &str, sources: &[String]) {
    eprintln!("  {} {}", style("→").red(), style(href).bold());
    for source in sources {
        eprintln!("      {}", style(source).dim());
    }
}
