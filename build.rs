use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=config.toml");

    // OUT_DIR is target/<profile>/build/<crate>-<hash>/out, the binary lives in target/<profile>
    let out_dir = env::var("OUT_DIR").unwrap();
    let profile_dir = Path::new(&out_dir)
        .ancestors()
        .nth(3)
        .expect("OUT_DIR is not inside a cargo target directory");

    // Copy config.toml next to the binary so Config::load finds it there
    fs::copy("config.toml", profile_dir.join("config.toml")).unwrap();
}
