//! Load Settings
//!
//! Options that control how an [`AssetDescription`] becomes an
//! [`AssetModel`] and how fresh instances of it start out.
//!
//! ```rust,ignore
//! use myth_animator::settings::LoadSettings;
//!
//! // Second scene, start paused
//! let settings = LoadSettings {
//!     scene: Some(1),
//!     autoplay: false,
//! };
//! let model = AssetModel::load_with(desc, &settings)?;
//! ```
//!
//! [`AssetDescription`]: crate::assets::AssetDescription
//! [`AssetModel`]: crate::assets::AssetModel

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadSettings {
    /// Scene to instantiate. `None` picks the asset's default scene, or the
    /// first scene if no default is declared.
    pub scene: Option<usize>,
    /// Start playing clip 0 on every new instance when the asset has clips.
    pub autoplay: bool,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            scene: None,
            autoplay: true,
        }
    }
}
