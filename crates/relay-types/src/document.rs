//! Per-user discovery document written by the provisioning process.

use serde::Deserialize;

/// Stored description of a user's controllable devices.
///
/// Fields written by newer provisioning runs are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DiscoveryDocument {
    /// Destination queue for this user's outbound commands.
    pub queue: String,
    /// Devices exposed to the voice platform.
    pub devices: Vec<DocumentDevice>,
    /// Legacy field written by older provisioning runs; ignored.
    #[serde(default)]
    pub user_token_hash: Option<String>,
}

/// A device entry inside a [`DiscoveryDocument`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DocumentDevice {
    /// Device identifier, reused as the platform endpoint id.
    pub id: String,
    /// Name users address the device by.
    pub friendly_name: String,
    /// Human-readable description.
    pub description: String,
    /// Display category as free text; checked during translation.
    pub display_category: String,
    /// Capabilities the device supports.
    pub capability_codes: Vec<CapabilityCode>,
}

/// Capability codes recognised in discovery documents.
///
/// Unknown codes fail document parsing. The enumeration is non-exhaustive so
/// translation tables outside this crate keep a fallback arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[non_exhaustive]
pub enum CapabilityCode {
    /// On/off control.
    PowerController,
    /// Brightness control.
    BrightnessController,
    /// Colour control.
    ColorController,
    /// Colour temperature control.
    ColorTemperatureController,
    /// Media transport control.
    PlaybackController,
}
