pub mod config;
pub mod error;
pub mod scroll;
pub mod driver;

pub use config::{AnimationConfig, AppConfig};
pub use driver::{MemoryViewport, ScrollDriver, ScrollHandle, ViewportHost};
pub use error::{Error, Result, ViewportError};
pub use scroll::{
    Animation, AnimationData, Dimensions, Easing, EasingType, Effect, Msg, Position, Status,
    Subscription, Target, Viewport,
};
