use clap::Parser;
use face_coords::config::ZenohArgs;
use face_coords::transport::{
    all_slots_topic, decode_slot_payload, open_session, slot_from_topic,
};
use face_coords::ErrorWrapper;
use zenoh::prelude::r#async::*;

/// Log slot updates published by z_driver.
#[derive(Parser, Debug)]
#[command()]
struct Args {
    #[command(flatten)]
    zenoh: ZenohArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    face_coords::init_logging();

    let args: Args = Args::parse();

    let zenoh_session = open_session(&args.zenoh).await?;

    let subscriber = zenoh_session
        .declare_subscriber(all_slots_topic())
        .best_effort()
        .res()
        .await
        .map_err(ErrorWrapper::ZenohError)?;

    loop {
        let msg = subscriber.recv_async().await?;
        let Some(slot) = slot_from_topic(msg.key_expr.as_str()) else {
            tracing::warn!(topic = %msg.key_expr, "unexpected topic");
            continue;
        };
        let bbox = match decode_slot_payload(&msg.value) {
            Ok(bbox) => bbox,
            Err(err) => {
                tracing::warn!(%slot, %err, "malformed slot payload");
                continue;
            }
        };
        let center = bbox.center();
        tracing::info!(%slot, %bbox, center_x = center.x, center_y = center.y, "slot updated");
    }
}
