use super::{json_pretty, open_builder, EXIT_SUCCESS};
use std::path::Path;

pub fn run(config: &Path, json: bool) -> Result<u8, String> {
    let mut builder = open_builder(config)?;
    let lock_path = builder.lock_path();

    let Some(manifest) = builder.parse().map_err(|e| e.to_string())? else {
        if json {
            println!("{}", json_pretty(&serde_json::json!({ "status": "empty" }))?);
        } else {
            println!("no resource configuration; nothing to build");
        }
        return Ok(EXIT_SUCCESS);
    };

    if json {
        println!("{}", json_pretty(manifest)?);
    } else {
        for (key, bundle) in &manifest.bundles {
            println!("{key}");
            println!("  js:  {}", bundle.dest.javascript);
            println!("  css: {}", bundle.dest.css);
        }
        println!(
            "built {} bundles -> {}",
            manifest.len(),
            lock_path.display()
        );
    }
    Ok(EXIT_SUCCESS)
}
