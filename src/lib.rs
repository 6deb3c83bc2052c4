//! # value-copy
//!
//! Structural value conversion: copy the data of one runtime value into the
//! shape of another, coercing types where the intent is compatible.
//!
//! - **Sequences** copy element-wise; elements that do not convert are dropped
//! - **Records** copy field-wise by exact name
//! - **Maps** copy entry-wise; an entry is written only if key and value convert
//! - **Maps ↔ records** match text keys against field names
//! - **Scalars** coerce: `true` ↔ `"true"`, `42` ↔ `"42"`, timestamps ↔ text
//!
//! ## Note
//!
//! Copies are best effort. Nothing that fails to convert is reported as an
//! error; it is simply missing from the destination. Use [`Copier::copy`] and
//! inspect the [`CopyReport`] when a partial copy matters.
//!
//! ## Quick Start
//!
//! ```
//! use value_copy::{Map, Record, RecordType, Ty, Value, copy};
//!
//! let user = RecordType::builder("User")
//!     .field("Name", Ty::Str)
//!     .field("Age", Ty::U8)
//!     .build();
//!
//! // Form data arrives as text.
//! let form = Map::from_entries(Ty::Str, Ty::Str, [("Name", "Ada"), ("Age", "36")]);
//!
//! let mut to = Value::ptr(Record::new(&user));
//! copy(&form.into(), &mut to);
//!
//! let record = to.as_record().unwrap();
//! assert_eq!(record.get("Age"), Some(&Value::U8(36)));
//! ```
//!
//! ## Modules
//!
//! - [`value`]: Runtime value model and type descriptors
//! - [`coerce`]: Unit-level decision procedure and the [`Coerce`] strategy trait
//! - [`copy`](mod@copy): Structural copy driver
//! - [`time`]: Reference-timestamp layouts and zone handling
//! - [`config`]: Process-wide defaults for timestamps
//! - [`json`]: JSON interop

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod coerce;
pub mod config;
pub mod copy;
pub mod error;
pub mod json;
pub mod time;
pub mod value;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use value_copy::prelude::*;
/// ```
pub mod prelude {
    // Copying
    pub use crate::{Coerce, Copier, CopyReport, DefaultCoercer, copy};

    // Values
    pub use crate::{Kind, Map, Ptr, Record, RecordType, Seq, Ty, Value};

    // Time
    pub use crate::TimeConfig;
}

// =============================================================================
// Copying
// =============================================================================

pub use coerce::{Coerce, DefaultCoercer};
pub use copy::{Copier, CopyReport, copy};

// =============================================================================
// Values
// =============================================================================

pub use value::{
    FieldDef, Kind, Map, Opaque, Ptr, Record, RecordType, RecordTypeBuilder, Render, Seq, Ty,
    Value,
};

// =============================================================================
// Infrastructure
// =============================================================================

pub use config::ConfigBuilder;
pub use error::{JsonError, TimeError, ValueError};
pub use time::{DEFAULT_LAYOUT, DEFAULT_TIME_ZONE, Layout, TimeConfig};
