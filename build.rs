use std::env;
use std::process::Command;

/// Embeds `VMCTL_VERSION` as `<pkg version> (<git sha>, <profile>)`, dropping
/// whichever parts are unavailable.
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed=PROFILE");

    let pkg_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let details: Vec<String> = [git_short_sha(), env::var("PROFILE").ok()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

    let version_string = if details.is_empty() {
        pkg_version
    } else {
        format!("{pkg_version} ({})", details.join(", "))
    };
    println!("cargo:rustc-env=VMCTL_VERSION={version_string}");
}

fn git_short_sha() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?.trim().to_string();
    if sha.is_empty() { None } else { Some(sha) }
}
