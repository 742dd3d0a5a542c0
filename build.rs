use std::env;
use std::fs;
use std::io;
use std::path::Path;
use toml::Value;

/// Constants written to `$OUT_DIR/app_metadata.rs` as `APP_METADATA_<KEY>`.
fn metadata_entries() -> io::Result<Vec<(String, String)>> {
    let mut entries = vec![
        ("NAME".to_string(), env::var("CARGO_PKG_NAME").map_err(io::Error::other)?),
        ("VERSION".to_string(), env::var("CARGO_PKG_VERSION").map_err(io::Error::other)?),
    ];

    let manifest = fs::read_to_string("Cargo.toml")?;
    let manifest: Value = toml::from_str(&manifest).map_err(io::Error::other)?;

    if let Some(metadata) = manifest
        .get("package")
        .and_then(|package| package.get("metadata"))
        .and_then(|metadata| metadata.as_table())
    {
        for (key, value) in metadata {
            if let Some(value) = value.as_str() {
                entries.push((key.to_uppercase(), value.to_string()));
            }
        }
    }

    Ok(entries)
}

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=Cargo.toml");

    let source: String = metadata_entries()?
        .into_iter()
        .map(|(key, value)| format!("#[allow(unused)]\npub const APP_METADATA_{}: &str = {:?};\n", key, value))
        .collect();

    let out_dir = env::var("OUT_DIR").map_err(io::Error::other)?;
    fs::write(Path::new(&out_dir).join("app_metadata.rs"), source)
}
