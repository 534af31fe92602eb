use super::{json_pretty, open_builder, EXIT_SUCCESS};
use std::path::Path;

pub fn run(config: &Path, json: bool) -> Result<u8, String> {
    let mut builder = open_builder(config)?;
    let Some(sections) = builder.get_configs().map_err(|e| e.to_string())? else {
        if json {
            println!("{{}}");
        } else {
            println!("no resource configuration");
        }
        return Ok(EXIT_SUCCESS);
    };

    if json {
        println!("{}", json_pretty(sections)?);
        return Ok(EXIT_SUCCESS);
    }

    for (key, section) in sections {
        println!("{key}");
        println!("  javascript:  {}", section.javascript.join(", "));
        println!("  css:         {}", section.css.join(", "));
        if let Some(prefix) = &section.dest_prefix {
            println!("  dest_prefix: {prefix}");
        }
    }
    Ok(EXIT_SUCCESS)
}
