use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use cellphone_service::pb::{BuyCellphoneRequest, FilterCondition};
use cellphone_service::{sample, telemetry, CellphoneClient};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Exercise the cellphone service from the command line.
#[derive(Parser, Debug)]
#[command(name = "cellphone-client")]
struct Args {
    /// Server address.
    #[arg(long, env = "CELLPHONE_TARGET", default_value = "http://127.0.0.1:9527")]
    target: String,

    /// Create one random cellphone.
    #[arg(long)]
    create: bool,

    /// Search with random thresholds over every brand.
    #[arg(long)]
    search: bool,

    /// Create a cellphone and upload this file as its cover.
    #[arg(long, value_name = "FILE")]
    upload: Option<PathBuf>,

    /// Create five cellphones and buy each of them twice.
    #[arg(long)]
    buy: bool,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    telemetry::init_tracing();
    let args = Args::parse();

    info!(addr = %args.target, "dialing");
    let mut client = CellphoneClient::connect(args.target.clone()).await?;

    if args.create {
        let id = client.create(sample::new_cellphone()).await?;
        info!(%id, "cellphone created");
    }
    if args.search {
        search(&mut client).await?;
    }
    if let Some(path) = &args.upload {
        upload(&mut client, path).await?;
    }
    if args.buy {
        buy(&mut client).await?;
    }
    Ok(())
}

async fn search(client: &mut CellphoneClient) -> Result<(), BoxError> {
    use rand::Rng;

    let condition = {
        let mut rng = rand::thread_rng();
        FilterCondition {
            min_cpu_core: rng.gen_range(1..6),
            min_ram_size: rng.gen_range(1..8),
            min_storage_size: rng.gen_range(100..1024),
            min_battery_capacity: rng.gen_range(2500..8000),
            brands: sample::CELLPHONE_BRANDS.iter().map(|b| b.to_string()).collect(),
        }
    };

    let found = client.search(condition).await?;
    if found.is_empty() {
        info!("no cellphone matched");
    }
    for cellphone in found {
        info!(id = %cellphone.id, brand = %cellphone.brand, "found");
    }
    Ok(())
}

async fn upload(client: &mut CellphoneClient, path: &Path) -> Result<(), BoxError> {
    let id = client.create(sample::new_cellphone()).await?;
    let image_type = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let file = tokio::fs::File::open(path).await?;
    let size = u32::try_from(file.metadata().await?.len()).unwrap_or(u32::MAX);

    let response = client.upload_cover(&id, &image_type, size, file).await?;
    info!(id = %response.id, bytes = response.size, "cover uploaded");
    Ok(())
}

async fn buy(client: &mut CellphoneClient) -> Result<(), BoxError> {
    let mut ids = Vec::with_capacity(5);
    for _ in 0..5 {
        ids.push(client.create(sample::new_cellphone()).await?);
    }

    let purchases = ids
        .iter()
        .cycle()
        .take(ids.len() * 2)
        .map(|id| BuyCellphoneRequest {
            id: id.clone(),
            price: sample::random_price(),
        })
        .collect();

    for response in client.buy(purchases).await? {
        info!(id = %response.id, avg = response.avg, "average price");
    }
    Ok(())
}
