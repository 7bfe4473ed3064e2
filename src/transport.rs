use crate::bounding_box::{BoundingBox, ParseBoxError};
use crate::config::ZenohArgs;
use crate::slots::Slot;
use std::sync::Arc;
use thiserror::Error;
use zenoh::prelude::r#async::*;
use zenoh::Session;

pub const SLOT_TOPIC_PREFIX: &str = "face-coords/slot";

#[derive(Error, Debug)]
pub enum ErrorWrapper {
    #[error("Zenoh error {0:?}")]
    ZenohError(#[from] zenoh::Error),
}

pub fn slot_topic(slot: Slot) -> String {
    format!("{}/{}", SLOT_TOPIC_PREFIX, slot.name())
}

pub fn all_slots_topic() -> String {
    format!("{}/*", SLOT_TOPIC_PREFIX)
}

pub fn slot_from_topic(topic: &str) -> Option<Slot> {
    topic
        .strip_prefix(SLOT_TOPIC_PREFIX)?
        .strip_prefix('/')
        .and_then(Slot::from_name)
}

/// Reads the raw payload bytes whatever encoding the publisher tagged them with.
pub fn decode_slot_payload(value: &Value) -> Result<BoundingBox, ParseBoxError> {
    let payload = value.payload.contiguous();
    String::from_utf8_lossy(&payload).parse()
}

pub fn session_config(args: &ZenohArgs) -> Config {
    let mut zenoh_config = Config::default();
    if !args.listen.is_empty() {
        zenoh_config.listen.endpoints = args.listen.clone();
        tracing::info!(
            endpoints = ?zenoh_config.listen.endpoints,
            "configured listening endpoints"
        );
    }
    if !args.connect.is_empty() {
        zenoh_config.connect.endpoints = args.connect.clone();
        tracing::info!(
            endpoints = ?zenoh_config.connect.endpoints,
            "configured connect endpoints"
        );
    }
    zenoh_config
}

pub async fn open_session(args: &ZenohArgs) -> anyhow::Result<Arc<Session>> {
    let zenoh_session = zenoh::open(session_config(args))
        .res()
        .await
        .map_err(ErrorWrapper::ZenohError)?;
    Ok(zenoh_session.into_arc())
}
