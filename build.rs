use std::process::Command;

// Embed `git describe` in `stepify --version`, falling back to the crate version
// outside a git checkout.
fn main() {
    let version = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| {
            let described = String::from_utf8_lossy(&o.stdout).trim().to_string();
            let trimmed = described.trim_start_matches('v');
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=STEPIFY_VERSION={version}");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
