//! Product commands

use crate::ProductAction;
use anyhow::{bail, Context, Result};
use artprint_cli::output::Status;
use artprint_cli::progress::{finish_error, finish_success, spinner};
use artprint_commerce::{ProductInput, ProductsApi, ShopClient, Transport, TransportKind};
use artprint_core::snapshot::write_json;
use artprint_telemetry::Timer;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Run a product action against the shop configured in the environment
pub async fn run(kind: TransportKind, output: Option<&Path>, action: ProductAction) -> Result<()> {
    let client = ShopClient::new()?;
    Status::info(&format!("{} via {kind}", client.config().shop_name));

    let api = ProductsApi::new(kind, client);
    let value = execute(&api, action).await?;

    match output {
        Some(path) => {
            write_json(&value, path)?;
            Status::success(&format!("Saved {}", path.display()));
        }
        None => println!("{}", serde_json::to_string_pretty(&value)?),
    }
    Ok(())
}

async fn execute<T: Transport>(api: &ProductsApi<T>, action: ProductAction) -> Result<Value> {
    let label = action_label(&action);
    let pb = spinner(&format!("{label}..."));
    let timer = Timer::start(format!("products:{label}"));

    let result = dispatch(api, action).await;
    timer.stop();

    match &result {
        Ok(_) => finish_success(&pb, label),
        Err(e) => finish_error(&pb, &format!("{label}: {e}")),
    }
    result
}

async fn dispatch<T: Transport>(api: &ProductsApi<T>, action: ProductAction) -> Result<Value> {
    let value = match action {
        ProductAction::List { limit } => {
            let Some(rest) = api.rest() else {
                bail!("listing every product needs the REST transport");
            };
            serde_json::to_value(rest.list_all(limit).await?)?
        }
        ProductAction::Get { id } => serde_json::to_value(api.get(&id).await?)?,
        ProductAction::Create { data } => {
            serde_json::to_value(api.create(&read_input(&data)?).await?)?
        }
        ProductAction::Update { id, data } => {
            serde_json::to_value(api.update(&id, &read_input(&data)?).await?)?
        }
        ProductAction::Delete { id } => {
            let deleted = api.delete(&id).await?;
            json!({ "id": id, "deleted": deleted })
        }
        ProductAction::UploadImages { id, files, dir } => {
            let Some(rest) = api.rest() else {
                bail!("uploading images needs the REST transport");
            };
            rest.upload_images(&id, &resolve_files(&files, dir.as_deref())).await?
        }
    };
    Ok(value)
}

fn action_label(action: &ProductAction) -> &'static str {
    match action {
        ProductAction::List { .. } => "Listing products",
        ProductAction::Get { .. } => "Fetching product",
        ProductAction::Create { .. } => "Creating product",
        ProductAction::Update { .. } => "Updating product",
        ProductAction::Delete { .. } => "Deleting product",
        ProductAction::UploadImages { .. } => "Uploading images",
    }
}

fn read_input(path: &Path) -> Result<ProductInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading product data from {}", path.display()))?;
    let input: ProductInput = serde_json::from_str(&content)
        .with_context(|| format!("parsing product data in {}", path.display()))?;
    if !input.is_object() {
        bail!("product data in {} must be a JSON object", path.display());
    }
    Ok(input)
}

fn resolve_files(files: &[PathBuf], dir: Option<&Path>) -> Vec<PathBuf> {
    files
        .iter()
        .map(|file| match dir {
            Some(dir) if file.is_relative() => dir.join(file),
            _ => file.clone(),
        })
        .collect()
}
