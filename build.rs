// Build script for mlbridge
// Handles linkage against the native library when the 'native' feature is enabled

fn main() {
    // Register native_available as a valid cfg for check-cfg
    // Using cargo: syntax for MSRV 1.70.0 compatibility
    println!("cargo:rustc-check-cfg=cfg(native_available)");

    #[cfg(feature = "native")]
    {
        println!("cargo:rustc-cfg=native_available");
        println!(
            "cargo:warning=native feature enabled - this requires the native ML library to be installed"
        );

        // Check if the native library root is available and handle gracefully
        if let Ok(root) = std::env::var("ML_NATIVE_ROOT") {
            println!("cargo:rustc-link-search=native={}/lib", root);
        } else {
            // Try common installation prefixes
            let prefixes = ["/usr/local", "/usr", "/opt/mlnative"];

            let mut found = false;
            for prefix in &prefixes {
                let lib_dir = format!("{}/lib", prefix);
                if std::path::Path::new(&lib_dir).exists() {
                    println!("cargo:rustc-link-search=native={}", lib_dir);
                    found = true;
                    break;
                }
            }

            if !found {
                println!("cargo:warning=native library not found. Set ML_NATIVE_ROOT or disable the 'native' feature");
            }
        }

        println!("cargo:rustc-link-lib=dylib=mlnative");

        // Tell cargo to rerun this build script if the native environment changes
        println!("cargo:rerun-if-env-changed=ML_NATIVE_ROOT");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
