mod values;
pub mod tracks;
pub mod clip;
pub mod binding;
pub mod player;

pub use values::Interpolatable;
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use binding::TargetPath;
pub use player::{AnimationPlayer, PlaybackState};
pub use tracks::{KeyframeTrack, sample};
