fn main() {
    println!("cargo:rerun-if-env-changed=RAINGRID_BUILD");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    let build_id = match std::env::var("RAINGRID_BUILD") {
        Ok(v) if !v.trim().is_empty() => v,
        _ => target_label(),
    };

    let build_id = match git_short_sha().or_else(github_short_sha) {
        Some(sha) => format!("{build_id} ({sha})"),
        None => build_id,
    };

    println!("cargo:rustc-env=RAINGRID_BUILD={}", build_id);
}

fn short_hex(v: &str) -> Option<String> {
    let v = v.trim();
    let short = &v[..v.len().min(7)];
    if !short.is_empty() && short.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(short.to_ascii_lowercase())
    } else {
        None
    }
}

fn github_short_sha() -> Option<String> {
    short_hex(&std::env::var("GITHUB_SHA").ok()?)
}

fn git_short_sha() -> Option<String> {
    let out = std::process::Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    short_hex(&String::from_utf8(out.stdout).ok()?)
}

fn target_label() -> String {
    let os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_else(|_| "unknown".to_string());
    let os = if os == "macos" { "darwin".to_string() } else { os };
    let arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_else(|_| "unknown".to_string());
    format!("{os}-{arch}")
}
