use build_results_template::index_templates::{self, DEFAULT_TEMPLATE_NAME};
use build_results_template::upload;
use clap::Parser;
use std::path::PathBuf;

/// Script for generating an index template out of a document
#[derive(Debug, Parser)]
#[command(name = "generate_template", version)]
struct Args {
    /// Name of index
    #[arg(value_name = "INDEX_NAME")]
    index_name: String,

    /// File to write schema to
    #[arg(long = "output_file", value_name = "PATH")]
    output_file: Option<PathBuf>,

    /// Name the template is stored under
    #[arg(long = "template_name", default_value = DEFAULT_TEMPLATE_NAME)]
    template_name: String,

    /// Index pattern the template applies to, defaults to INDEX_NAME
    #[arg(long)]
    pattern: Option<String>,

    /// Precedence against other templates matching the same index
    #[arg(long)]
    order: Option<i64>,

    /// Also upload the template to this Elasticsearch node
    #[arg(long = "es_host")]
    es_host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let template = index_templates::generate_template(
        &args.index_name,
        &args.template_name,
        args.pattern.as_deref(),
        args.order,
    );
    let body = template.to_value();
    index_templates::write_template(&body, args.output_file.as_deref())?;
    if let Some(path) = &args.output_file {
        log::info!("[root] Template written to {}", path.display());
    }

    if let Some(host) = &args.es_host {
        let es = upload::client(host)?;
        upload::put_template(&es, template.name(), &body).await?;
    }

    Ok(())
}
