//! `raze version` — print the crate version.

/// Run `raze version`.
pub fn run(json: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if json {
        println!(r#"{{"version":"{version}"}}"#);
    } else {
        println!("raze {version}");
    }
}
