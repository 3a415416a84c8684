//! hello_world edge function
use edge_function_sdk::prelude::*;
use edge_function_sdk::{ipc, logging};

mod handler;

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = FunctionConfig::from_env();
    let max_len = config.max_payload_bytes;
    let function = handler::function(Arc::new(config));

    let served = ipc::run(&function, max_len)?;
    tracing::info!("Served {} requests", served);
    Ok(())
}
