//! macOS command table
//!
//! Proxy configuration on macOS goes through `networksetup`, scoped to a
//! named network service such as "Wi-Fi" or "Built-In Ethernet".

use super::PlatformCommands;

/// The `networksetup` command surface.
///
/// Setting a proxy with `-setwebproxy` also turns it on; the controller
/// compensates when the caller asked for a disabled proxy.
pub static COMMANDS: PlatformCommands = PlatformCommands {
    tool: "networksetup",
    get: "-getwebproxy",
    set: "-setwebproxy",
    state: "-setwebproxystate",
    service_order: "-listnetworkserviceorder",
    preferences_path: "/Library/Preferences/SystemConfiguration/preferences.plist",
};
