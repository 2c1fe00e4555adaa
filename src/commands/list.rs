//! Command: print configs.
use crate::logging::Log;
use crate::registry::Registry;

/// Print `name`, or every config when `name` is `None`.
#[allow(clippy::print_stdout)]
pub fn run(registry: &Registry, name: Option<&str>, log: &dyn Log) {
    match name {
        None => print!("{}", registry.render_all()),
        Some(name) => match registry.render(name) {
            Some(text) => print!("{text}"),
            None => super::report_unknown(registry, name, log),
        },
    }
}
