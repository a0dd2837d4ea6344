//! Scene file support for RT.
//!
//! Scene files are XML documents with a `<scene>` root:
//!
//! ```xml
//! <scene ambient="0.1 0.1 0.1">
//!     <material name="red" diffuse="1 0 0" specular="0.5 0.5 0.5" hardness="50"/>
//!     <light from="0 5 5" color="1 1 1" power="1"/>
//!     <render bgcolor="0 0 0" output="render.png">
//!         <camera from="0 0 8" to="0 0 0" up="0 1 0" fov="45" width="400" height="400"/>
//!     </render>
//!     <sphere center="0 0 0" radius="1"><material ref="red"/></sphere>
//!     <node name="stack" translation="0 1 0" rotation="0 45 0" scale="1 1 1">
//!         <box min="-1 -1 -1" max="1 1 1"/>
//!     </node>
//! </scene>
//! ```
//!
//! Unknown elements and dangling references are logged and skipped.

mod loader;
mod xml;

pub use loader::*;
pub use xml::{parse_document, Element, ParseError, ParseResult};
