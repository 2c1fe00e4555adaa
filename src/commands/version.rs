//! Command: print version information.

/// Print the rtk version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    let version = option_env!("RTK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("rtk {version}");
}
