use std::env;
use std::path::Path;

// Locates the Yices installation named by `YICES_PATH`, if any.
// Without it, the system linker search path is expected to provide libyices.

const ENV_YICES_PATH: &str = "YICES_PATH";

fn main() {
    println!("cargo:rerun-if-env-changed={ENV_YICES_PATH}");

    if let Ok(yices_path) = env::var(ENV_YICES_PATH) {
        let yices_path = Path::new(&yices_path);
        let lib_dir = yices_path.join("lib");
        if lib_dir.is_dir() {
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
        } else {
            println!(
                "cargo:warning={ENV_YICES_PATH} is set to `{}` but `{}` is not a directory",
                yices_path.display(),
                lib_dir.display()
            );
        }
        println!("cargo:include={}", yices_path.join("include").display());
    }

    println!("cargo:rustc-link-lib=dylib=yices");
}
