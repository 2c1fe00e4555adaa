//! Build script: embeds `RTK_VERSION` from the environment or `git describe`.

use std::process::Command;

fn main() {
    // RTK_VERSION from the environment wins (release builds); otherwise ask git.
    if let Ok(version) = std::env::var("RTK_VERSION") {
        println!("cargo:rustc-env=RTK_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=RTK_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=RTK_VERSION");
}
