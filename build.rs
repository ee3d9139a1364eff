use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/");
    println!("cargo:rerun-if-changed=cbindgen.toml");
    println!("cargo:rerun-if-changed=build.rs");

    // docs.rs builds from a read-only source tree
    if env::var_os("DOCS_RS").is_some() {
        return;
    }

    let crate_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let version = env::var("CARGO_PKG_VERSION").expect("CARGO_PKG_VERSION not set");

    let include_dir = PathBuf::from(&crate_dir).join("include").join("fast_browser");
    std::fs::create_dir_all(&include_dir).expect("Failed to create include directory");

    let mut config = cbindgen::Config::from_file("cbindgen.toml")
        .expect("Unable to find cbindgen.toml configuration file");

    // Bindings compile this in and hand it to check_version() at load time,
    // so a header from one release refuses to run against another.
    config.after_includes = Some(format!(
        "\n/* Version of fast_browser this header was generated from */\n#define FAST_BROWSER_VERSION \"{}\"\n",
        version
    ));

    cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
        .expect("Unable to generate C bindings")
        .write_to_file(include_dir.join("fast_browser.h"));
}
