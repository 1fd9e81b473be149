use anyhow::Context;
use objc2::MainThreadMarker;
use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy};
use tracing_subscriber::EnvFilter;

use current_space::actor::notification_center::NotificationCenter;
use current_space::sys::appearance;
use current_space::sys::window_server::WindowServer;

fn main() -> anyhow::Result<()> {
    init_logging();

    let mtm = MainThreadMarker::new().context("must be launched from the main thread")?;
    let app = NSApplication::sharedApplication(mtm);
    // Background process: no dock icon, no windows.
    app.setActivationPolicy(NSApplicationActivationPolicy::Accessory);

    appearance::init_appearance_state();

    let notification_center = NotificationCenter::new(WindowServer::connect());
    notification_center.report_current_space();

    app.run();
    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
