/// Build script to load environment variables from a .env file
/// This allows compile-time override of the default chunk size

fn main() {
    let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let env_path = std::path::Path::new(&manifest_dir).join(".env");
    println!("cargo:rerun-if-changed={}", env_path.display());

    // Read .env manually (no extra build dependencies)
    let Ok(contents) = std::fs::read_to_string(&env_path) else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');

            if key == "ERASURE_CHUNK_SIZE" {
                if value.parse::<usize>().is_err() {
                    println!("cargo:warning=ignoring non-numeric ERASURE_CHUNK_SIZE={}", value);
                    continue;
                }
                println!("cargo:rustc-env={}={}", key, value);
                eprintln!("🔧 Building with chunk size: {}", value);
            }
        }
    }
}
