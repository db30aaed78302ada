//! Type Catalog
//!
//! Registry of composite value types and interface types, and which concrete
//! types satisfy which interfaces. Pure data; no logic beyond lookup.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut catalog = TypeCatalog::new();
//! let reader = catalog.register_type("reader")?;
//! let io_reader = catalog.register_interface("io.Reader", &[reader.id()])?;
//! assert_eq!(catalog.arity(io_reader.id())?, 1);
//! ```

pub mod catalog;
pub mod domain;

pub use catalog::TypeCatalog;
pub use domain::{ConcreteType, ConcreteTypeId, DispatchShape, InterfaceId, InterfaceType};
