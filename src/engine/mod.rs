mod collision;
mod connection;
mod entity;
mod normalize;
mod selection;
mod viewport;

pub use collision::{CollisionConfig, SEPARATION_EPSILON, resolve_overlaps};
pub use connection::{ConnectionConfig, ConnectionLine, connection_line, connection_lines};
pub use entity::{Entity, LayoutConfig, RankedRecord};
pub use normalize::{ValidationError, normalize, validate_record};
pub use selection::{
    PopupAnchorPolicy, Selection, SelectionConfig, SelectionController, hit_test,
};
pub use viewport::{
    ViewportConfig, ViewportController, ViewportTransform, ZoomDirection,
};
