use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const WASM_PACKAGE: &str = "particle_field";

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR missing"));
    let workspace_root = manifest_dir
        .parent()
        .expect("backend must live inside workspace")
        .to_path_buf();
    let field_crate = workspace_root.join("frontend/particle-field");
    let pkg_dir = workspace_root.join("frontend/site/pkg");

    println!(
        "cargo:rerun-if-changed={}",
        field_crate.join("Cargo.toml").display()
    );
    println!("cargo:rerun-if-changed={}", field_crate.join("src").display());
    println!("cargo:rerun-if-changed={}", pkg_dir.display());
    println!("cargo:rerun-if-env-changed=WASM_BINDGEN");
    println!("cargo:rerun-if-env-changed=SKIP_PARTICLE_WASM_BUILD");

    let skip_wasm_build =
        env::var("CI").is_ok() || env::var("SKIP_PARTICLE_WASM_BUILD").is_ok();
    if skip_wasm_build {
        let wasm = pkg_dir.join("particle_field_bg.wasm");
        let js = pkg_dir.join("particle_field.js");
        if wasm.is_file() && js.is_file() {
            println!(
                "cargo:warning=Skipping particle_field build; using prebuilt artifacts in {}",
                pkg_dir.display()
            );
        } else {
            println!(
                "cargo:warning=Skipping particle_field build and no prebuilt bundle found (expected {} and {}); the page will have no particle background",
                wasm.display(),
                js.display()
            );
        }
        return;
    }

    if let Err(message) = build_bundle(&workspace_root, &pkg_dir) {
        println!("cargo:warning={message}; the page will have no particle background");
    }
}

fn build_bundle(workspace_root: &Path, pkg_dir: &Path) -> Result<(), String> {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let base_rustflags = env::var("RUSTFLAGS").unwrap_or_default();
    let mut rustflags = base_rustflags.trim().to_string();
    if !rustflags.is_empty() {
        rustflags.push(' ');
    }
    rustflags.push_str("-C opt-level=3 -C codegen-units=1 -C lto=fat");

    let default_target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| workspace_root.join("target"));
    let wasm_target_dir = default_target_dir.join("wasm-cache");

    let build_status = Command::new(&cargo)
        .current_dir(workspace_root)
        .args([
            "build",
            "--package",
            WASM_PACKAGE,
            "--release",
            "--target",
            "wasm32-unknown-unknown",
        ])
        .env("RUSTFLAGS", &rustflags)
        .env("CARGO_TARGET_DIR", &wasm_target_dir)
        .status()
        .map_err(|err| format!("failed to invoke cargo for {WASM_PACKAGE}: {err}"))?;

    if !build_status.success() {
        return Err(format!(
            "building {WASM_PACKAGE} failed (is the wasm32-unknown-unknown target installed?)"
        ));
    }

    let target_wasm = wasm_target_dir
        .join("wasm32-unknown-unknown/release")
        .join(format!("{WASM_PACKAGE}.wasm"));
    if !target_wasm.exists() {
        return Err(format!(
            "expected wasm artifact at {}",
            target_wasm.display()
        ));
    }

    if pkg_dir.exists() {
        fs::remove_dir_all(pkg_dir)
            .map_err(|err| format!("unable to clear previous pkg dir: {err}"))?;
    }
    fs::create_dir_all(pkg_dir).map_err(|err| format!("unable to create pkg directory: {err}"))?;

    let wasm_bindgen = env::var("WASM_BINDGEN").unwrap_or_else(|_| "wasm-bindgen".to_string());
    let bindgen_status = Command::new(&wasm_bindgen)
        .arg("--target")
        .arg("web")
        .arg("--out-dir")
        .arg(pkg_dir)
        .arg("--out-name")
        .arg(WASM_PACKAGE)
        .arg(&target_wasm)
        .status()
        .map_err(|err| {
            format!(
                "failed to run {} (install via `cargo install wasm-bindgen-cli` or set WASM_BINDGEN): {err}",
                wasm_bindgen
            )
        })?;

    if !bindgen_status.success() {
        return Err("wasm-bindgen emitted a non-zero exit status".to_string());
    }
    Ok(())
}
