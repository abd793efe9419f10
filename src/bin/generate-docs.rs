//! # OpenAPI doc bundle generator
//!
//! Renders the gateway's OpenAPI description to a static JSON document
//! plus a browsable HTML page. Runs out-of-band (CI or release scripts),
//! never at request time.
//!
//! ```bash
//! cargo run --bin generate-docs -- --out-dir docs
//! ```

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use utoipa::OpenApi;

use land_gateway::openapi::ApiDoc;

/// Static Swagger UI page; loads the JSON document generated next to it.
const DOC_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Land Registry Gateway API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      SwaggerUIBundle({
        url: "openapi.json",
        dom_id: "#swagger-ui",
        deepLinking: true,
      });
    };
  </script>
</body>
</html>
"##;

#[derive(Parser)]
#[command(name = "generate-docs")]
#[command(about = "Render the gateway's OpenAPI doc bundle", long_about = None)]
struct Cli {
    /// Output directory for the bundle.
    #[arg(short, long, default_value = "docs")]
    out_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    fs::create_dir_all(&cli.out_dir)?;

    let spec_path = cli.out_dir.join("openapi.json");
    println!("Generating OpenAPI specification to {}", spec_path.display());

    let openapi = ApiDoc::openapi();
    let json = serde_json::to_string_pretty(&openapi)?;
    fs::write(&spec_path, json)?;

    let page_path = cli.out_dir.join("index.html");
    println!("Rendering doc page to {}", page_path.display());
    fs::write(&page_path, DOC_PAGE)?;

    println!("Doc bundle generated successfully");
    Ok(())
}
