//! Co-authorship network visualization component.
//!
//! Renders an interactive force-directed graph of authors on an HTML canvas:
//! - Degree counting and top-country color buckets, computed once per session
//! - Radius scales selectable between degree, publications and citations
//! - Force layout with live link/charge/collide tuning and restart
//! - Pan, zoom, and click-to-inspect author tooltips
//!
//! # Example
//!
//! ```ignore
//! use coauthor_graph::{ForceControls, ForceGraphCanvas, ForceSettings, GraphData};
//!
//! let (settings, set_settings) = signal(None::<ForceSettings>);
//! view! {
//!     <ForceGraphCanvas data=data.into() settings=settings fullscreen=true />
//!     <ForceControls submit=set_settings />
//! }
//! ```

mod component;
pub mod controller;
mod controls;
pub mod layout;
pub mod preprocess;
mod render;
pub mod scale;
pub mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use controller::{ControllerState, ForceSettings};
pub use controls::ForceControls;
pub use layout::{ForceConfig, Layout, LayoutConfig, PositionSnapshot, Snapshots};
pub use preprocess::{CountryBuckets, SelfLoopPolicy};
pub use scale::{RadiusConfig, SizeMetric};
pub use state::{AuthorInfo, GraphSession, SessionConfig, Tooltip};
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, NodeId};
