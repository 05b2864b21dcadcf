//! Print the OpenAPI document as JSON.

use std::io::Write;

use color_eyre::eyre::{Context, Result};
use running_late::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("serialise OpenAPI document")?;
    writeln!(std::io::stdout().lock(), "{json}").wrap_err("write OpenAPI document")?;
    Ok(())
}
