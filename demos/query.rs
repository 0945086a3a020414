use std::env;

use vcloud_query::api::config::ClientConfig;
use vcloud_query::api::query::QueryParams;
use vcloud_query::api::types::record::RecordKind;
use vcloud_query::api::types::urn::Urn;
use vcloud_query::api::xml::encode_records;
use vcloud_query::VCloudDirector;

// Usage: VCD_ENDPOINT=https://host/api VCD_TOKEN=... cargo run --example query [kind] [filter]
#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match ClientConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };
    let vcd = match VCloudDirector::new(config) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Unable to create client: {}", e);
            return;
        }
    };

    let mut args = env::args().skip(1);
    let kind: RecordKind = match args.next().unwrap_or_else(|| "vm".to_string()).parse() {
        Ok(k) => k,
        Err(_) => {
            eprintln!("Unknown kind, expected one of:");
            for k in RecordKind::ALL {
                eprintln!("  {}", k);
            }
            return;
        }
    };
    let params = match args.next() {
        Some(filter) => QueryParams::filter(filter),
        None => QueryParams::default(),
    };

    match vcd.query_records(kind, &params).await {
        Ok(page) => {
            println!(
                "{} of {:?} rows (page {:?})",
                page.len(),
                page.total,
                page.page
            );
            match encode_records(&page) {
                Ok(xml) => println!("{}", xml),
                Err(e) => eprintln!("{}", e),
            }
        }
        Err(e) => eprintln!("Query failed: {}", e),
    }

    if let Some(id) = args.next() {
        match id.parse::<Urn>() {
            Ok(urn) => match vcd.resolve_entity(&urn).await {
                Ok(Some(entity)) => println!("{:?}", entity),
                Ok(None) => println!("{} does not exist", urn),
                Err(e) => eprintln!("Lookup failed: {}", e),
            },
            Err(_) => eprintln!("{} is not a vCloud URN", id),
        }
    }
}
