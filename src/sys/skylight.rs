//! Private CGS (SkyLight) window-server API surface.
//!
//! Only read operations are declared here; a failing or null result must
//! never take the process down.

use objc2::runtime::AnyObject;
use objc2_core_foundation::CFString;
use objc2_foundation::{NSArray, NSDictionary, NSString};

pub type ConnectionId = u32;

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    pub fn CGSMainConnectionID() -> ConnectionId;

    /// Returns the managed display list: one dictionary per display, each
    /// carrying "Display Identifier", "Current Space", and "Spaces". The
    /// caller owns the returned array (Copy rule).
    pub fn CGSCopyManagedDisplaySpaces(
        cid: ConnectionId,
    ) -> *mut NSArray<NSDictionary<NSString, AnyObject>>;

    /// Returns the identifier of the display currently holding the menu bar.
    /// The caller owns the returned string (Copy rule).
    pub fn CGSCopyActiveMenuBarDisplayIdentifier(cid: ConnectionId) -> *mut CFString;
}
