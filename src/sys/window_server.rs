//! Typed view of the window server's managed display/space snapshot.
//!
//! `CGSCopyManagedDisplaySpaces` hands back a dynamically-typed array of
//! dictionaries. This module converts it into [`DisplaySpaces`] records,
//! skipping any display entry with missing or mistyped fields; a bad record
//! never aborts the enumeration.

use std::ptr::NonNull;

use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2_core_foundation::CFRetained;
use objc2_foundation::{NSArray, NSDictionary, NSNumber, NSString, ns_string};
use tracing::warn;

use crate::space::{DisplaySpaces, Space, SpaceId};
use crate::sys::skylight::{
    CGSCopyActiveMenuBarDisplayIdentifier, CGSCopyManagedDisplaySpaces, CGSMainConnectionID,
    ConnectionId,
};

/// Connection to the window server. Acquired once per process and treated as
/// a read-only capability thereafter.
#[derive(Debug, Clone, Copy)]
pub struct WindowServer {
    cid: ConnectionId,
}

impl WindowServer {
    pub fn connect() -> Self {
        WindowServer { cid: unsafe { CGSMainConnectionID() } }
    }

    /// Identifier of the display currently holding the menu bar, or `None`
    /// if the window server does not report one.
    pub fn active_menu_bar_display(&self) -> Option<String> {
        let ptr = unsafe { CGSCopyActiveMenuBarDisplayIdentifier(self.cid) };
        let ident = NonNull::new(ptr).map(|s| unsafe { CFRetained::from_raw(s) });
        ident.map(|s| s.to_string())
    }

    /// Fresh snapshot of every display and the spaces on it, in
    /// window-server enumeration order. Malformed display entries are
    /// dropped.
    pub fn managed_display_spaces(&self) -> Vec<DisplaySpaces> {
        let displays = unsafe { Retained::from_raw(CGSCopyManagedDisplaySpaces(self.cid)) };
        let Some(displays) = displays else {
            warn!("CGSCopyManagedDisplaySpaces returned null");
            return Vec::new();
        };
        displays.iter().filter_map(|d| parse_display(&d)).collect()
    }
}

fn parse_display(display: &NSDictionary<NSString, AnyObject>) -> Option<DisplaySpaces> {
    let display_uuid = display
        .objectForKey(ns_string!("Display Identifier"))?
        .downcast::<NSString>()
        .ok()?
        .to_string();
    let current = display
        .objectForKey(ns_string!("Current Space"))?
        .downcast::<NSDictionary>()
        .ok()?;
    let current_space = managed_space_id(&current)?;
    let spaces_list = display
        .objectForKey(ns_string!("Spaces"))?
        .downcast::<NSArray>()
        .ok()?;

    let mut spaces = Vec::with_capacity(spaces_list.len());
    for entry in spaces_list.iter() {
        let Ok(entry) = entry.downcast::<NSDictionary>() else {
            continue;
        };
        let Some(id) = managed_space_id(&entry) else {
            continue;
        };
        let is_fullscreen = entry.objectForKey(ns_string!("TileLayoutManager")).is_some();
        spaces.push(Space { id, is_fullscreen });
    }

    Some(DisplaySpaces { display_uuid, current_space, spaces })
}

fn managed_space_id(space: &NSDictionary) -> Option<SpaceId> {
    let id = space.objectForKey(ns_string!("ManagedSpaceID"))?.downcast::<NSNumber>().ok()?;
    Some(SpaceId::new(id.as_i64() as u64))
}
