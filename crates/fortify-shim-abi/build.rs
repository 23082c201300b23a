fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let version_script = format!("{manifest_dir}/version_scripts/fortify_shim.map");
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let gnu_ld_target = matches!(target_os.as_str(), "linux" | "android");
    if gnu_ld_target && std::path::Path::new(&version_script).exists() {
        println!("cargo:rustc-cdylib-link-arg=-Wl,--version-script={version_script}");
    }
    println!("cargo:rerun-if-changed=version_scripts/fortify_shim.map");
}
