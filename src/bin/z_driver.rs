use clap::Parser;
use face_coords::config::ZenohArgs;
use face_coords::transport::{open_session, slot_topic};
use face_coords::watcher::SlotWatcher;
use face_coords::{ErrorWrapper, Slot, SlotFiles};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use zenoh::prelude::r#async::*;

/// Publish slot file changes over zenoh.
#[derive(Parser, Debug)]
#[command()]
struct Args {
    /// Directory holding the five slot files.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,

    #[command(flatten)]
    zenoh: ZenohArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    face_coords::init_logging();

    let args: Args = Args::parse();

    let zenoh_session = open_session(&args.zenoh).await?;

    let mut publishers = HashMap::new();
    for slot in Slot::ALL {
        let publisher = zenoh_session
            .declare_publisher(slot_topic(slot))
            .congestion_control(CongestionControl::Drop)
            .priority(Priority::InteractiveHigh)
            .res()
            .await
            .map_err(ErrorWrapper::ZenohError)?;
        publishers.insert(slot, publisher);
    }

    tracing::info!(dir = %args.output_dir.display(), "watching slot files");
    let mut watcher = SlotWatcher::new(SlotFiles::new(&args.output_dir));
    let mut interval = tokio::time::interval(Duration::from_millis(args.interval_ms.max(1)));

    loop {
        interval.tick().await;

        for (slot, bbox) in watcher.poll() {
            let Some(publisher) = publishers.get(&slot) else {
                continue;
            };
            tracing::debug!(%slot, %bbox, "publishing slot");
            publisher
                .put(bbox.to_string().into_bytes())
                .res()
                .await
                .map_err(ErrorWrapper::ZenohError)?;
        }
    }
}
