pub mod constants;
pub mod contact;
pub mod cursor;
pub mod media;
pub mod particles;
pub mod perf;
pub mod sequencer;

pub use constants::*;
pub use contact::*;
pub use cursor::*;
pub use media::*;
pub use particles::*;
pub use perf::*;
pub use sequencer::*;
