//! Observes the global notification queues that tell us when the active
//! space may have moved or the interface theme changed, and reports the
//! active space number on each firing.

use objc2::rc::{Allocated, Retained};
use objc2::{AnyThread, DeclaredClass, Encode, Encoding, define_class, msg_send, sel};
use objc2_app_kit::NSWorkspace;
use objc2_foundation::{
    NSDistributedNotificationCenter, NSNotification, NSNotificationCenter, NSObject, NSString,
};
use tracing::{debug, info, info_span, trace, warn};

use crate::space::{ResolveError, active_space_number};
use crate::sys::appearance::{read_interface_theme, set_dark_mode_state};
use crate::sys::window_server::WindowServer;

#[repr(C)]
struct Instance {
    window_server: WindowServer,
}

unsafe impl Encode for Instance {
    const ENCODING: Encoding = Encoding::Object;
}

define_class! {
    // SAFETY:
    // - The superclass NSObject does not have any subclassing requirements.
    // - `NotificationCenterInner` does not implement `Drop`.
    #[unsafe(super(NSObject))]
    #[ivars = Box<Instance>]
    struct NotificationCenterInner;

    // SAFETY: Each of these method signatures must match their invocations.
    impl NotificationCenterInner {
        #[unsafe(method_id(initWith:))]
        fn init(this: Allocated<Self>, instance: Instance) -> Option<Retained<Self>> {
            let this = this.set_ivars(Box::new(instance));
            unsafe { msg_send![super(this), init] }
        }

        #[unsafe(method(recvSpaceChangedEvent:))]
        fn recv_space_changed_event(&self, notif: &NSNotification) {
            trace!("{notif:#?}");
            self.report_active_space();
        }

        #[unsafe(method(recvAppUpdateEvent:))]
        fn recv_app_update_event(&self, notif: &NSNotification) {
            trace!("{notif:#?}");
            self.report_active_space();
        }

        #[unsafe(method(recvThemeChangedEvent:))]
        fn recv_theme_changed_event(&self, notif: &NSNotification) {
            trace!("{notif:#?}");
            self.handle_theme_changed();
        }
    }
}

impl NotificationCenterInner {
    fn new(window_server: WindowServer) -> Retained<Self> {
        let instance = Instance { window_server };
        unsafe { msg_send![Self::alloc(), initWith: instance] }
    }

    /// Takes a fresh display/space snapshot, resolves the active space's
    /// global number, and emits it. An inconsistent snapshot produces a
    /// diagnostic (or nothing) for this invocation only.
    fn report_active_space(&self) {
        let span = info_span!("notification_center::report_active_space");
        let _s = span.enter();

        let window_server = &self.ivars().window_server;
        let Some(active_display) = window_server.active_menu_bar_display() else {
            warn!("Window server did not report an active display");
            return;
        };
        let displays = window_server.managed_display_spaces();

        match active_space_number(&displays, &active_display) {
            Ok(number) => info!("Active space number: {number}"),
            Err(ResolveError::NoActiveDisplay) => warn!("No active space found"),
            Err(ResolveError::Unnumbered(space)) => {
                debug!(space = space.get(), "Active space is fullscreen and has no number");
            }
        }
    }

    fn handle_theme_changed(&self) {
        let span = info_span!("notification_center::handle_theme_changed");
        let _s = span.enter();

        let current = read_interface_theme();
        let old = set_dark_mode_state(current);
        if old != current {
            debug!("Dark mode changed: {} -> {}", old, current);
        }
    }
}

pub struct NotificationCenter {
    inner: Retained<NotificationCenterInner>,
}

impl NotificationCenter {
    /// Registers the observer for the process lifetime; there is no
    /// unsubscribe path.
    pub fn new(window_server: WindowServer) -> Self {
        let handler = NotificationCenterInner::new(window_server);

        let workspace = &NSWorkspace::sharedWorkspace();
        let workspace_center = &workspace.notificationCenter();
        let default_center = &NSNotificationCenter::defaultCenter();
        let distributed_center = &NSDistributedNotificationCenter::defaultCenter();
        // SAFETY: Selectors have signature fn(&self, &NSNotification).
        unsafe {
            use objc2_app_kit::*;
            workspace_center.addObserver_selector_name_object(
                &handler,
                sel!(recvSpaceChangedEvent:),
                Some(NSWorkspaceActiveSpaceDidChangeNotification),
                Some(workspace),
            );
            default_center.addObserver_selector_name_object(
                &handler,
                sel!(recvAppUpdateEvent:),
                Some(NSApplicationDidUpdateNotification),
                None,
            );
            distributed_center.addObserver_selector_name_object(
                &handler,
                sel!(recvThemeChangedEvent:),
                Some(&NSString::from_str("AppleInterfaceThemeChangedNotification")),
                None,
            );
        };

        NotificationCenter { inner: handler }
    }

    /// One report before any notification arrives, so the current space is
    /// known at startup.
    pub fn report_current_space(&self) {
        self.inner.report_active_space();
    }
}
