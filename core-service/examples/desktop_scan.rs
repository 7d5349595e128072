//! Desktop scanning demonstration
//!
//! Runs the NFC module against the virtual adapter and feeds it a few tag
//! interrupts, printing what the host would receive.
//!
//! Run with:
//! ```bash
//! cargo run -p core-service --example desktop_scan
//!
//! # JSON logs, with an info page tag id
//! cargo run -p core-service --example desktop_scan -- json 04A3F2
//! ```

use std::env;
use std::sync::Arc;

use bridge_desktop::{
    ChannelEventEmitter, DesktopForegroundContext, VirtualAdapterProvider, VirtualTagIntent,
};
use bridge_traits::{logging::LogLevel, nfc::RawTag};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_service::{NfcBridgeConfig, NfcModule};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let format = match args.get(1).map(String::as_str) {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        _ => LogFormat::Pretty,
    };
    init_logging(
        LoggingConfig::default()
            .with_format(format)
            .with_level(LogLevel::Debug),
    )?;

    let (emitter, mut host_events) = ChannelEventEmitter::new();
    let config = NfcBridgeConfig::builder()
        .adapter_provider(Arc::new(VirtualAdapterProvider::default()))
        .foreground_context(Arc::new(DesktopForegroundContext::new()))
        .event_emitter(Arc::new(emitter))
        .build()?;
    let module = NfcModule::new(config)?;
    let forwarder = module.start_event_forwarding()?;

    if let Some(tag_id) = args.get(2) {
        module.set_info_page_tag_id(tag_id.as_str());
    }

    info!(supported = ?module.is_supported(), enabled = module.is_enabled(), "Probed");
    module.start_tag_reading()?;

    for id in [vec![0x04, 0xA3, 0xF2], vec![0x04, 0xA3, 0xF3], vec![0xDE, 0xAD, 0xBE, 0xEF]] {
        module.on_new_intent(&VirtualTagIntent::new(34, RawTag::new(id)));
    }
    module.stop_tag_reading()?;

    drop(module);
    forwarder.await?;

    while let Ok((name, payload)) = host_events.try_recv() {
        println!("{name}: {payload}");
    }

    Ok(())
}
